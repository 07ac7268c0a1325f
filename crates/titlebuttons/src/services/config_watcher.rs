//! Regenerates stylesheets whenever the config file changes.
//!
//! ## Architecture
//!
//! - A debounced watcher monitors the directory holding `config.toml`.
//! - On change, the config is reloaded. Validation problems are logged but
//!   do not block generation; parse failures keep the previous stylesheets.
//! - Both documents are regenerated and compared with the last written ones
//!   (ignoring the timestamp line). Only dialects whose content changed are
//!   written.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use notify_debouncer_mini::{DebounceEventResult, new_debouncer, notify::RecursiveMode};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use titlebuttons_core::{Config, Dialect, Stylesheets, generate};

use super::file_sync::FileSync;

/// Debounce interval (in ms) for file change events. Editors often trigger
/// multiple events for a single save; this batches them into one reload.
const FILE_CHANGE_DEBOUNCE_MS: u64 = 300;

/// How often the watch loop checks the shutdown flag.
const SHUTDOWN_POLL_MS: u64 = 200;

/// Dialects whose content differs between `previous` and `next`.
///
/// With no previous generation every dialect counts as changed.
pub fn changed_dialects(previous: Option<&Stylesheets>, next: &Stylesheets) -> Vec<Dialect> {
    Dialect::ALL
        .into_iter()
        .filter(|&dialect| match previous {
            Some(prev) => !prev.get(dialect).same_content(next.get(dialect)),
            None => true,
        })
        .collect()
}

/// Follows one config file and keeps the user stylesheets in sync with it.
pub struct ConfigWatcher {
    /// Config file being watched.
    config_path: PathBuf,
    sync: FileSync,
    /// Last stylesheets that were fully written.
    last_written: Mutex<Option<Stylesheets>>,
    /// Shutdown flag for the watch loop.
    shutdown_flag: Arc<AtomicBool>,
}

impl ConfigWatcher {
    pub fn new(config_path: PathBuf, sync: FileSync) -> Arc<Self> {
        Arc::new(Self {
            config_path,
            sync,
            last_written: Mutex::new(None),
            shutdown_flag: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Ask a running [`ConfigWatcher::run`] to return.
    pub fn stop(&self) {
        self.shutdown_flag.store(true, Ordering::Relaxed);
    }

    /// Generate from `config` and write the dialects that changed.
    ///
    /// Returns the dialects that were written successfully.
    pub fn apply(&self, config: &Config) -> Vec<Dialect> {
        let next = generate(config);
        let mut last = self.last_written.lock();

        let changed = changed_dialects(last.as_ref(), &next);
        if changed.is_empty() {
            debug!("Generated CSS unchanged, skipping write");
            return changed;
        }

        let mut written = Vec::new();
        for dialect in changed {
            match self.sync.write(next.get(dialect)) {
                Ok(path) => {
                    info!("{} CSS written to {}", dialect.name(), path.display());
                    written.push(dialect);
                }
                Err(e) => error!("Error writing {} CSS: {}", dialect.name(), e),
            }
        }

        // Unwritten dialects have no known on-disk state; forget everything so
        // the next change rewrites both.
        let all_current = Dialect::ALL.iter().all(|d| {
            written.contains(d)
                || last
                    .as_ref()
                    .is_some_and(|prev| prev.get(*d).same_content(next.get(*d)))
        });
        *last = if all_current { Some(next) } else { None };

        written
    }

    /// Reload the config file and apply it.
    pub fn reload(&self) -> Vec<Dialect> {
        let config = match Config::load(&self.config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to reload config, keeping current CSS: {}", e);
                return Vec::new();
            }
        };

        if let Err(e) = config.validate() {
            warn!("Config has out-of-range values: {}", e);
        }

        info!("Config reloaded from: {}", self.config_path.display());
        self.apply(&config)
    }

    /// Apply the current config, then block regenerating on every change
    /// until [`ConfigWatcher::stop`] is called.
    pub fn run(self: &Arc<Self>) -> anyhow::Result<()> {
        let canonical = self
            .config_path
            .canonicalize()
            .with_context(|| format!("cannot watch {}", self.config_path.display()))?;
        let watch_dir = canonical
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| canonical.clone());

        self.reload();

        let handler = Arc::clone(self);
        let debounce_duration = Duration::from_millis(FILE_CHANGE_DEBOUNCE_MS);
        let mut debouncer = new_debouncer(debounce_duration, move |res: DebounceEventResult| {
            match res {
                Ok(events) => {
                    if events.iter().any(|e| e.path == canonical) {
                        debug!("Config file change detected");
                        handler.reload();
                    }
                }
                Err(err) => {
                    error!("File watcher error: {}", err);
                }
            }
        })
        .context("failed to create file watcher")?;

        // Watch the parent directory: editors often replace the file on save
        debouncer
            .watcher()
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", watch_dir.display()))?;

        info!("Watching {} for changes", watch_dir.display());

        while !self.shutdown_flag.load(Ordering::Relaxed) {
            thread::sleep(Duration::from_millis(SHUTDOWN_POLL_MS));
        }

        debug!("Config watcher shutting down");
        Ok(())
    }
}
