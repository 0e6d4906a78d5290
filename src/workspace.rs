use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::ScopeError;
use crate::program::ProgramHandle;
use crate::scope::ClassifiedScope;

pub const SCOPE_CSV_FILE: &str = "scope.csv";
pub const URLS_FILE: &str = "URLs.txt";
pub const WILDCARDS_FILE: &str = "Wildcards.txt";
pub const BURP_CONFIG_FILE: &str = "burp_config.json";

/// Per-program output directory. Created on demand and never cleaned up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramWorkspace {
    dir: PathBuf,
}

impl ProgramWorkspace {
    pub fn prepare(root: &Path, program: &ProgramHandle) -> Result<Self, ScopeError> {
        let dir = root.join(program.as_str());
        fs::create_dir_all(&dir).map_err(|e| ScopeError::io(&dir, e))?;
        debug!("using workspace {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn scope_csv(&self) -> PathBuf {
        self.dir.join(SCOPE_CSV_FILE)
    }

    pub fn urls_file(&self) -> PathBuf {
        self.dir.join(URLS_FILE)
    }

    pub fn wildcards_file(&self) -> PathBuf {
        self.dir.join(WILDCARDS_FILE)
    }

    pub fn burp_config(&self) -> PathBuf {
        self.dir.join(BURP_CONFIG_FILE)
    }

    pub fn write_classified(&self, scope: &ClassifiedScope) -> Result<(), ScopeError> {
        write_lines(&self.urls_file(), &scope.exact_urls)?;
        write_lines(&self.wildcards_file(), &scope.wildcard_patterns)?;
        Ok(())
    }
}

/// Newline-joined, no trailing newline, replaces any existing file.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), ScopeError> {
    fs::write(path, lines.join("\n")).map_err(|e| ScopeError::io(path, e))?;
    debug!("wrote {} entries to {}", lines.len(), path.display());
    Ok(())
}

/// Inverse of [`write_lines`]. An empty file reads back as no entries, so a
/// list holding a single empty string does not survive the round trip; every
/// other list without embedded newlines does.
pub fn read_lines(path: &Path) -> Result<Vec<String>, ScopeError> {
    let data = fs::read_to_string(path).map_err(|e| ScopeError::io(path, e))?;
    if data.is_empty() {
        return Ok(Vec::new());
    }
    Ok(data.split('\n').map(str::to_string).collect())
}
