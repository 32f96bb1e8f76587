use thiserror::Error;

/// Network and HTTP-related errors from the remote origin
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Network error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request to {url} timed out")]
    Timeout { url: String },
}

impl NetworkError {
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// 404-class responses mean the origin definitively does not have the
    /// record, as opposed to a transport failure.
    pub fn is_not_found_status(&self) -> bool {
        matches!(self, NetworkError::HttpStatus { status, .. } if *status == 404 || *status == 410)
    }
}
