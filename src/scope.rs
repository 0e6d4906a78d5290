use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub const WILDCARD_GLYPH: char = '*';

/// `asset_type` column of the scope export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum AssetType {
    Url,
    Wildcard,
    Other(String),
}

impl From<String> for AssetType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "URL" => Self::Url,
            "WILDCARD" => Self::Wildcard,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for AssetType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl Display for AssetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url => write!(f, "URL"),
            Self::Wildcard => write!(f, "WILDCARD"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// One record of the export. Columns other than these two are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScopeRow {
    pub asset_type: AssetType,
    pub identifier: String,
}

impl ScopeRow {
    pub fn new(asset_type: impl Into<AssetType>, identifier: impl Into<String>) -> Self {
        Self {
            asset_type: asset_type.into(),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ScopeAsset {
    ExactUrl(String),
    WildcardPattern(String),
}

impl ScopeAsset {
    /// `URL` rows carrying a `*` are patterns, not addresses.
    pub fn classify(row: &ScopeRow) -> Option<Self> {
        match row.asset_type {
            AssetType::Url if !row.identifier.contains(WILDCARD_GLYPH) => {
                Some(Self::ExactUrl(row.identifier.clone()))
            }
            AssetType::Url | AssetType::Wildcard => {
                Some(Self::WildcardPattern(row.identifier.clone()))
            }
            AssetType::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedScope {
    pub exact_urls: Vec<String>,
    pub wildcard_patterns: Vec<String>,
    pub skipped: usize,
}

impl ClassifiedScope {
    pub fn push(&mut self, asset: ScopeAsset) {
        match asset {
            ScopeAsset::ExactUrl(v) => self.exact_urls.push(v),
            ScopeAsset::WildcardPattern(v) => self.wildcard_patterns.push(v),
        }
    }

    /// Classifies one row; rows of other asset types only bump `skipped`.
    /// Returns whether the row was kept.
    pub fn record(&mut self, row: &ScopeRow) -> bool {
        match ScopeAsset::classify(row) {
            Some(asset) => {
                self.push(asset);
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exact_urls.is_empty() && self.wildcard_patterns.is_empty()
    }

    pub fn total(&self) -> usize {
        self.exact_urls.len() + self.wildcard_patterns.len()
    }
}
