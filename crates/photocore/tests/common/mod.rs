//! Common test utilities
//!
//! Shared by the workflow integration tests: a reply sink that records what
//! the bot would have sent, and helpers to put photos on disk.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, Rgb, RgbImage};
use photocore::{AppError, AppResult, CollageWorkflow, ReplySink, SessionStore, TempWorkspace, UserKey};
use tempfile::{TempDir, TempPath};

/// What the workflow sent back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Dimensions of the decoded photo plus the path it was sent from
    Photo { width: u32, height: u32, path: PathBuf },
}

/// Records replies; optionally fails photo uploads like a broken transport
#[derive(Default)]
pub struct RecordingSink {
    replies: Mutex<Vec<Reply>>,
    fail_photo_upload: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_uploads() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            fail_photo_upload: true,
        }
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.replies.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.replies()
            .into_iter()
            .filter_map(|r| match r {
                Reply::Text(t) => Some(t),
                Reply::Photo { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_text(&self, text: &str) -> AppResult<()> {
        self.replies.lock().unwrap().push(Reply::Text(text.to_string()));
        Ok(())
    }

    async fn send_photo(&self, path: &Path) -> AppResult<()> {
        if self.fail_photo_upload {
            return Err(AppError::Transport("upload refused by test sink".to_string()));
        }
        let decoded = image::open(path).map_err(|e| AppError::Transport(e.to_string()))?;
        self.replies.lock().unwrap().push(Reply::Photo {
            width: decoded.width(),
            height: decoded.height(),
            path: path.to_path_buf(),
        });
        Ok(())
    }
}

/// Workflow over a private temp directory (kept alive by the returned guard)
pub struct TestEnvironment {
    pub workflow: CollageWorkflow,
    pub sessions: Arc<SessionStore>,
    pub dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let sessions = Arc::new(SessionStore::default());
        let workspace = TempWorkspace::new(dir.path()).unwrap();
        let workflow = CollageWorkflow::new(Arc::clone(&sessions), workspace);
        Self { workflow, sessions, dir }
    }

    /// Writes a small JPEG as if it had been downloaded from `user`
    pub fn downloaded_photo(&self, user: UserKey) -> TempPath {
        let path = self.workflow.workspace().photo_file(user).unwrap();
        let img = RgbImage::from_fn(70, 90, |x, y| Rgb([(x * 3) as u8, (y * 2) as u8, 128]));
        DynamicImage::ImageRgb8(img)
            .save_with_format(&path, image::ImageFormat::Jpeg)
            .unwrap();
        path
    }

    /// PNG bytes under the usual `.jpg` download name, like an image sent as a document
    pub fn png_document(&self, user: UserKey) -> TempPath {
        let path = self.workflow.workspace().photo_file(user).unwrap();
        let img = RgbImage::from_fn(70, 90, |x, _| Rgb([200, (x * 3) as u8, 40]));
        DynamicImage::ImageRgb8(img)
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        path
    }

    /// Temp file that is not an image at all
    pub fn garbage_photo(&self, user: UserKey) -> TempPath {
        let path = self.workflow.workspace().photo_file(user).unwrap();
        std::fs::write(&path, b"definitely not a jpeg").unwrap();
        path
    }

    /// Files currently in the workspace directory
    pub fn files_on_disk(&self) -> usize {
        std::fs::read_dir(self.dir.path()).unwrap().count()
    }
}
