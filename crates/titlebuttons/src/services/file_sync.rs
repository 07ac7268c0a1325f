//! Writes generated stylesheets to the per-toolkit user config directories.
//!
//! Each document is written independently: a failure on one dialect is
//! reported and never prevents the other from being written. Writes go
//! through a sibling temp file and a rename so GTK never reads a half-written
//! stylesheet.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use titlebuttons_core::{Dialect, Error, GeneratedStylesheet, Result, Stylesheets};

/// Outcome of writing one dialect.
#[derive(Debug)]
pub struct SyncOutcome {
    pub dialect: Dialect,
    pub path: PathBuf,
    pub result: Result<()>,
}

/// Outcome of writing both dialects, GTK 4 first.
#[derive(Debug)]
pub struct SyncReport {
    pub outcomes: Vec<SyncOutcome>,
}

impl SyncReport {
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SyncOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Stylesheet writer rooted at a home directory.
#[derive(Debug, Clone)]
pub struct FileSync {
    home: PathBuf,
}

impl FileSync {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Writer for the current user's `$HOME`, if set.
    pub fn from_env() -> Option<Self> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(Self::new)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Destination of the stylesheet for `dialect`.
    pub fn target(&self, dialect: Dialect) -> PathBuf {
        dialect.target_path(&self.home)
    }

    /// Write one stylesheet, creating its directory if needed.
    pub fn write(&self, sheet: &GeneratedStylesheet) -> Result<PathBuf> {
        let path = self.target(sheet.dialect);
        write_atomic(&path, sheet.as_str())?;
        Ok(path)
    }

    /// Write both stylesheets and report per dialect.
    pub fn sync_all(&self, sheets: &Stylesheets) -> SyncReport {
        let outcomes = sheets
            .iter()
            .map(|sheet| {
                let path = self.target(sheet.dialect);
                let result = write_atomic(&path, sheet.as_str());
                match &result {
                    Ok(()) => info!("{} CSS written to {}", sheet.dialect.name(), path.display()),
                    Err(e) => error!("Error writing {} CSS: {}", sheet.dialect.name(), e),
                }
                SyncOutcome {
                    dialect: sheet.dialect,
                    path,
                    result,
                }
            })
            .collect();

        SyncReport { outcomes }
    }
}

/// Replace `path` with `contents` via a temp file in the same directory.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(write_err)?;
    }

    let tmp = path.with_extension("css.tmp");
    fs::write(&tmp, contents).map_err(write_err)?;

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    debug!("Replaced {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
