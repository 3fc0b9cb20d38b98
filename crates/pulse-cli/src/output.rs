use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{error, info};

use crate::config::ConfigError;

pub const MARKDOWN_FILE: &str = "report.md";
pub const HTML_FILE: &str = "report.html";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error(transparent)]
    Location(#[from] ConfigError),

    #[error("create {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Per-file results of a report write. One file failing never affects the
/// other.
#[derive(Debug)]
pub struct Written {
    pub markdown: Result<PathBuf, OutputError>,
    pub html: Result<PathBuf, OutputError>,
}

impl Written {
    pub fn all_ok(&self) -> bool {
        self.markdown.is_ok() && self.html.is_ok()
    }

    /// Log each file's result on its own line.
    pub fn log(&self) {
        for (kind, result) in [("markdown", &self.markdown), ("html", &self.html)] {
            match result {
                Ok(path) => info!("{kind} report written to {}", path.display()),
                Err(e) => error!("failed to write {kind} report: {e}"),
            }
        }
    }
}

/// Create `dir` if needed, then write both documents concurrently and wait
/// for both to finish.
pub async fn write_reports(
    dir: &Path,
    markdown: &str,
    html: &str,
) -> Result<Written, OutputError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|source| OutputError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

    let (markdown, html) = tokio::join!(
        write_file(dir.join(MARKDOWN_FILE), markdown),
        write_file(dir.join(HTML_FILE), html),
    );
    Ok(Written { markdown, html })
}

async fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf, OutputError> {
    match fs::write(&path, contents).await {
        Ok(()) => Ok(path),
        Err(source) => Err(OutputError::Write { path, source }),
    }
}
