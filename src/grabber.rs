use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::classifier::{classify_file, ClassifyError};
use crate::error::ScopeError;
use crate::fetcher::{ExportReport, ScopeSource};
use crate::program::ProgramHandle;
use crate::workspace::ProgramWorkspace;

#[derive(Debug, Clone, Copy, Default)]
pub struct GrabOptions {
    pub include_proxy_config: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrabSummary {
    pub program: ProgramHandle,
    pub workspace: PathBuf,
    pub export: ExportReport,
    pub exact_urls: usize,
    pub wildcard_patterns: usize,
    pub skipped: usize,
    pub urls_file: PathBuf,
    pub wildcards_file: PathBuf,
    pub proxy_config: Option<PathBuf>,
    pub grabbed_at: DateTime<Utc>,
}

/// Export fetch, classification, list writes, then the optional proxy
/// config, in that order. Stops at the first failure and leaves whatever was
/// already written in place.
pub async fn grab_scope(
    source: &dyn ScopeSource,
    program: &ProgramHandle,
    workspace: &ProgramWorkspace,
    options: GrabOptions,
) -> Result<GrabSummary, ScopeError> {
    info!("fetching scope export for {program}");
    let export = source
        .fetch_scope_export(program, &workspace.scope_csv())
        .await?;

    let scope = match classify_file(&workspace.scope_csv(), export.content_type.as_deref()) {
        Ok(scope) => scope,
        Err(ClassifyError::Io { path, source: err }) => {
            return Err(ScopeError::Io { path, source: err })
        }
        Err(err) => {
            warn!(
                "export for {program} (HTTP {}) is not a usable scope CSV: {err}",
                export.status
            );
            return Err(ScopeError::EmptyOrMissingScope {
                program: program.to_string(),
                profile_url: source.profile_url(program),
            });
        }
    };
    if scope.is_empty() {
        warn!("{program} export lists no URL or wildcard assets");
    }

    workspace.write_classified(&scope)?;

    let proxy_config = if options.include_proxy_config {
        info!("fetching proxy config for {program}");
        let dest = workspace.burp_config();
        source.fetch_proxy_config(program, &dest).await?;
        Some(dest)
    } else {
        None
    };

    Ok(GrabSummary {
        program: program.clone(),
        workspace: workspace.dir().to_path_buf(),
        export,
        exact_urls: scope.exact_urls.len(),
        wildcard_patterns: scope.wildcard_patterns.len(),
        skipped: scope.skipped,
        urls_file: workspace.urls_file(),
        wildcards_file: workspace.wildcards_file(),
        proxy_config,
        grabbed_at: Utc::now(),
    })
}
