//! Scoped temporary files
//!
//! Downloaded photos and composed collages live in one directory. Every file
//! is handed out as a `NamedTempFile`/`TempPath` and removed when dropped,
//! whichever way the request ends.

use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile, TempPath};

use crate::error::AppResult;
use crate::session::UserKey;

#[derive(Debug, Clone)]
pub struct TempWorkspace {
    dir: PathBuf,
}

impl TempWorkspace {
    /// Uses `dir`, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs_err::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Workspace in `TEMP_FILES_DIR`
    pub fn from_config() -> AppResult<Self> {
        Self::new(crate::config::TEMP_FILES_DIR.as_path())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Empty file for a photo being downloaded from `user`
    pub fn photo_file(&self, user: UserKey) -> AppResult<TempPath> {
        let file = self.named(&format!("{}_photo_", user), ".jpg")?;
        Ok(file.into_temp_path())
    }

    /// Open file for the composed collage of `user`
    pub fn collage_file(&self, user: UserKey) -> AppResult<NamedTempFile> {
        self.named(&format!("{}_collage_", user), ".jpg")
    }

    fn named(&self, prefix: &str, suffix: &str) -> AppResult<NamedTempFile> {
        let file = Builder::new().prefix(prefix).suffix(suffix).tempfile_in(&self.dir)?;
        Ok(file)
    }
}
