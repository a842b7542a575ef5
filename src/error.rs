//! Error types for the `wiki_render` crate.

/// All errors that can occur while fetching or rendering an article.
#[derive(Debug, thiserror::Error)]
pub enum WikiRenderError {
    /// The HTML parser could not produce a usable tree.
    #[error("Parse failure: {0}")]
    ParseFailure(String),

    /// The article parsed fine but contained nothing worth rendering.
    #[error("Article is empty")]
    EmptyArticle,

    /// No rendering strategy exists for the given body kind.
    #[error("Unsupported body kind: {0}")]
    UnsupportedBodyKind(String),

    /// A fetch was requested without a page title.
    #[error("Missing page title")]
    MissingTitle,

    /// The upstream API has no page with this title.
    #[error("No content found for {0}")]
    NotFound(String),

    /// The upstream API answered with an error object.
    #[error("Upstream error {code}: {info}")]
    Upstream { code: String, info: String },

    /// The upstream response body was not valid JSON of the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The HTTP request could not be completed.
    #[cfg(feature = "client")]
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream API answered with a non-success status.
    #[error("Upstream returned HTTP {0}")]
    Http(u16),

    /// The builder configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

/// A type alias for `Result<T, WikiRenderError>`.
pub type Result<T> = std::result::Result<T, WikiRenderError>;
