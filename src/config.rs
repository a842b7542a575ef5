//! Builders and settings for the render pipeline and the upstream client.

#[cfg(feature = "client")]
use std::time::Duration;

use url::Url;

use crate::error::{Result, WikiRenderError};
use crate::pipeline::Pipeline;
use crate::sanitizer::{FragmentPolicy, PruneRule, SanitizerPipeline};

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
pub const DEFAULT_RELATIVE_PREFIX: &str = "/wiki/";
#[cfg(feature = "client")]
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Builder for a [`Pipeline`].
///
/// Provides a fluent API for the site base URL, the site-relative link
/// prefix, the set of prune rules and the fragment-link policy.
///
/// # Example
///
/// ```
/// use wiki_render::{FragmentPolicy, PipelineBuilder, PruneRule};
///
/// let pipeline = PipelineBuilder::new()
///     .base_url("https://de.wikipedia.org")
///     .add_prune_rule(PruneRule::new("div", "class", "navbox"))
///     .fragment_policy(FragmentPolicy::RewriteToArticle)
///     .build()
///     .unwrap();
/// # let _ = pipeline;
/// ```
#[derive(Clone, Debug)]
pub struct PipelineBuilder {
    base_url: String,
    relative_prefix: String,
    prune_rules: Vec<PruneRule>,
    fragment_policy: FragmentPolicy,
}

impl PipelineBuilder {
    /// Create a new builder with the English Wikipedia defaults.
    ///
    /// Defaults: base URL `https://en.wikipedia.org`, relative prefix
    /// `/wiki/`, prune rules for infoboxes and edit-section links,
    /// fragment links preserved.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            relative_prefix: DEFAULT_RELATIVE_PREFIX.to_string(),
            prune_rules: vec![PruneRule::infobox(), PruneRule::edit_section()],
            fragment_policy: FragmentPolicy::default(),
        }
    }

    /// Absolute URL prepended to site-relative links.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Path prefix that marks a link as site-relative.
    pub fn relative_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.relative_prefix = prefix.into();
        self
    }

    /// Append a [`PruneRule`]. Rules run in the order they are added.
    pub fn add_prune_rule(mut self, rule: PruneRule) -> Self {
        self.prune_rules.push(rule);
        self
    }

    /// Drop all prune rules, including the defaults.
    pub fn clear_prune_rules(mut self) -> Self {
        self.prune_rules.clear();
        self
    }

    pub fn fragment_policy(mut self, policy: FragmentPolicy) -> Self {
        self.fragment_policy = policy;
        self
    }

    /// Validate the settings and build the [`Pipeline`].
    ///
    /// Fails with [`WikiRenderError::Config`] if the base URL is not an
    /// absolute `http(s)` URL or the relative prefix does not start with `/`.
    pub fn build(mut self) -> Result<Pipeline> {
        let parsed = Url::parse(&self.base_url)
            .map_err(|e| WikiRenderError::Config(format!("invalid base url {:?}: {e}", self.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(WikiRenderError::Config(format!(
                "base url must be http(s), got {:?}",
                self.base_url
            )));
        }
        if !self.relative_prefix.starts_with('/') {
            return Err(WikiRenderError::Config(format!(
                "relative prefix must start with '/', got {:?}",
                self.relative_prefix
            )));
        }
        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        Ok(self.into_pipeline())
    }

    pub(crate) fn into_pipeline(self) -> Pipeline {
        let mut pruners = SanitizerPipeline::new();
        for rule in self.prune_rules {
            pruners.add(rule);
        }
        Pipeline::new(
            self.base_url,
            self.relative_prefix,
            self.fragment_policy,
            pruners,
        )
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for [`WikiClient`](crate::WikiClient).
#[cfg(feature = "client")]
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

#[cfg(feature = "client")]
impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
