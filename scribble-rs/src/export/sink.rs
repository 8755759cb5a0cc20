//! Destinations for finished exports.

use super::Download;
use crate::error::RasterResult;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Receives finished downloads.
///
/// Implementations must be shareable across threads: GIF exports complete
/// on whichever task awaits them.
pub trait DownloadSink: Send + Sync {
    fn deliver(&self, download: &Download) -> RasterResult<()>;
}

/// Writes each download to `<directory>/<filename>`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, download: &Download) -> PathBuf {
        self.directory.join(&download.filename)
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, download: &Download) -> RasterResult<()> {
        if !self.directory.exists() {
            log::info!("Creating export directory: {}", self.directory.display());
            fs::create_dir_all(&self.directory)?;
        }
        let path = self.path_for(download);
        fs::write(&path, &download.bytes)?;
        log::info!(
            "Saved {} ({} bytes)",
            path.display(),
            download.bytes.len()
        );
        Ok(())
    }
}

/// Keeps downloads in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    downloads: Arc<Mutex<Vec<Download>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, oldest first.
    pub fn downloads(&self) -> Vec<Download> {
        match self.downloads.lock() {
            Ok(downloads) => downloads.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.downloads().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DownloadSink for MemorySink {
    fn deliver(&self, download: &Download) -> RasterResult<()> {
        let mut downloads = match self.downloads.lock() {
            Ok(downloads) => downloads,
            Err(poisoned) => poisoned.into_inner(),
        };
        downloads.push(download.clone());
        Ok(())
    }
}

impl<S: DownloadSink + ?Sized> DownloadSink for Arc<S> {
    fn deliver(&self, download: &Download) -> RasterResult<()> {
        (**self).deliver(download)
    }
}
