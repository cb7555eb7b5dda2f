// Application state module
// Read-only state shared by every request

use std::path::{Path, PathBuf};

use super::types::Settings;

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directory all request paths are resolved against
    pub root_dir: PathBuf,
    pub settings: Settings,
}

impl AppState {
    pub fn new(root_dir: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            root_dir: root_dir.into(),
            settings,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}
