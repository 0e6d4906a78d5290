use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Program identifier as registered on the platform, e.g. `paypal`.
///
/// The handle ends up both in request paths and in the workspace directory
/// name, so only a conservative character set is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProgramHandle(String);

impl ProgramHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn profile_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl Display for ProgramHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
#[error("invalid program handle: {0:?}")]
pub struct ProgramParseError(pub String);

impl FromStr for ProgramHandle {
    type Err = ProgramParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
            return Err(ProgramParseError(s.to_string()));
        }
        let valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(ProgramParseError(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::program::ProgramHandle;

    #[test]
    fn accepts_platform_handles() {
        for raw in ["paypal", "  security_team ", "acme-corp", "x.com"] {
            let handle = ProgramHandle::from_str(raw).expect("handle should parse");
            assert_eq!(handle.as_str(), raw.trim());
        }
    }

    #[test]
    fn rejects_paths_and_empty_input() {
        for raw in ["", "   ", ".", "..", "../etc", "a/b", "paypal?x=1", "team name"] {
            assert!(ProgramHandle::from_str(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn builds_profile_url_without_double_slash() {
        let handle = ProgramHandle::from_str("paypal").expect("handle should parse");
        assert_eq!(
            handle.profile_url("https://hackerone.com/"),
            "https://hackerone.com/paypal"
        );
    }
}
