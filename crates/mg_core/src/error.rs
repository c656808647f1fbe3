use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("URL is required")]
    MissingUrl,

    #[error("{0} API key not configured")]
    MissingCredential(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_messages() {
        assert_eq!(Error::MissingUrl.to_string(), "URL is required");
        assert_eq!(
            Error::MissingCredential("OpenAI".to_string()).to_string(),
            "OpenAI API key not configured"
        );
    }
}
