//! HTTP client for the Wikipedia API.

use url::Url;

use super::{decode_article, query_params};
use crate::article::{BodyKind, FetchedArticle};
use crate::config::ClientConfig;
use crate::error::{Result, WikiRenderError};

/// Fetches articles with one GET request per call.
///
/// # Example
///
/// ```rust,no_run
/// use wiki_render::{BodyKind, ClientConfig, Pipeline, RenderMode, WikiClient};
///
/// # async fn example() -> wiki_render::Result<()> {
/// let client = WikiClient::new(ClientConfig::default())?;
/// let article = client.fetch("Rust (programming language)", BodyKind::HtmlFragment).await?;
/// let rendered = Pipeline::default().render(&article, RenderMode::FullDocument)?;
/// # let _ = rendered;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct WikiClient {
    http: reqwest::Client,
    api_url: Url,
}

impl WikiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|e| {
            WikiRenderError::Config(format!("invalid api url {:?}: {e}", config.api_url))
        })?;
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()?;
        Ok(Self { http, api_url })
    }

    /// The full request URL for `title`.
    pub fn request_url(&self, title: &str, kind: BodyKind) -> Result<Url> {
        let title = title.trim();
        if title.is_empty() {
            return Err(WikiRenderError::MissingTitle);
        }
        let mut url = self.api_url.clone();
        url.query_pairs_mut().extend_pairs(query_params(title, kind));
        Ok(url)
    }

    /// Fetch `title` in the given representation.
    pub async fn fetch(&self, title: &str, kind: BodyKind) -> Result<FetchedArticle> {
        let url = self.request_url(title, kind)?;
        tracing::debug!("Fetching {kind} for {title:?} from {url}");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Upstream returned {status} for {title:?}");
            return Err(WikiRenderError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        tracing::debug!("Received {} bytes for {title:?}", body.len());
        decode_article(&body, title)
    }
}
