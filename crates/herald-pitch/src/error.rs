use thiserror::Error;

#[derive(Debug, Error)]
pub enum PitchError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The link points at a personal profile, not a company page.
    /// User-correctable; reported verbatim rather than as a retry prompt.
    #[error("the link points at a personal profile, not a company page")]
    InvalidInputUrl,

    #[error("profile provider error: {0}")]
    Profile(String),

    #[error("profile data carries no company name")]
    MissingCompanyName,

    #[error("text generation failed: {0}")]
    Generation(String),
}
