use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::scope::{ClassifiedScope, ScopeRow};

pub const ASSET_TYPE_COLUMN: &str = "asset_type";
pub const IDENTIFIER_COLUMN: &str = "identifier";

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Empty body, or a header without the two columns we key on.
    #[error("scope export header is missing columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },
    #[error("scope export is not valid {charset}")]
    Encoding { charset: &'static str },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("failed opening scope export {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Classifies a saved export, decoding it with the charset declared in
/// `content_type` (UTF-8 when absent or unknown).
pub fn classify_file(
    path: &Path,
    content_type: Option<&str>,
) -> Result<ClassifiedScope, ClassifyError> {
    let bytes = fs::read(path).map_err(|source| ClassifyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("classifying {}", path.display());
    let text = decode_export(&bytes, content_type)?;
    classify_str(&text)
}

pub fn classify_str(data: &str) -> Result<ClassifiedScope, ClassifyError> {
    classify_reader(data.as_bytes())
}

/// Strict decode: malformed input is an error, never replacement characters.
/// A byte order mark wins over the declared charset.
pub fn decode_export<'a>(
    bytes: &'a [u8],
    content_type: Option<&str>,
) -> Result<Cow<'a, str>, ClassifyError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(content_type), bytes),
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or(ClassifyError::Encoding {
            charset: encoding.name(),
        })
}

fn declared_encoding(content_type: Option<&str>) -> &'static Encoding {
    let Some(label) = content_type.and_then(charset_param) else {
        return UTF_8;
    };
    Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
        warn!("unknown charset {label:?} in scope export, assuming UTF-8");
        UTF_8
    })
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Partitions the export into exact URLs and wildcard patterns, keeping row
/// order. A header with no data rows is a valid, empty scope.
pub fn classify_reader<R: Read>(reader: R) -> Result<ClassifiedScope, ClassifyError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?;
    let missing: Vec<&'static str> = [ASSET_TYPE_COLUMN, IDENTIFIER_COLUMN]
        .into_iter()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(ClassifyError::MissingColumns { missing });
    }

    let mut scope = ClassifiedScope::default();
    for record in reader.deserialize::<ScopeRow>() {
        let row = record?;
        if !scope.record(&row) {
            debug!("skipping {} asset {}", row.asset_type, row.identifier);
        }
    }

    info!(
        "classified {} exact URLs, {} wildcard patterns ({} rows skipped)",
        scope.exact_urls.len(),
        scope.wildcard_patterns.len(),
        scope.skipped
    );
    Ok(scope)
}
