use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("Timed out")]
    Timeout { url: String },
    #[error(
        "This program does not have a Scope CSV file. You can instead examine their profile on HackerOne: {profile_url}"
    )]
    EmptyOrMissingScope { program: String, profile_url: String },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid HTTP configuration: {0}")]
    Config(String),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScopeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ScopeError;

    #[test]
    fn empty_scope_message_points_at_profile() {
        let err = ScopeError::EmptyOrMissingScope {
            program: "paypal".to_string(),
            profile_url: "https://hackerone.com/paypal".to_string(),
        };
        assert!(err
            .to_string()
            .ends_with("examine their profile on HackerOne: https://hackerone.com/paypal"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn timeout_message_is_short() {
        let err = ScopeError::Timeout {
            url: "https://hackerone.com/teams/x/assets/download_csv.csv".to_string(),
        };
        assert_eq!(err.to_string(), "Timed out");
        assert!(err.is_timeout());
    }
}
