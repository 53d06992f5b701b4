//! TOML 文件实现的历史存储：`history = ["最新", ..., "最旧"]`。

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use mangonel_core::history_store::HistoryStore;
use serde::{Deserialize, Serialize};

use crate::{
    APP_DIR,
    error::{StoreError, StoreResult},
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    history: Vec<String>,
}

pub struct TomlHistoryStore {
    path: PathBuf,
}

impl TomlHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认位置：`<data_dir>/mangonel/history.toml`。
    pub fn default_path() -> StoreResult<PathBuf> {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR).join("history.toml"))
            .ok_or(StoreError::NoPlatformDir("data"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for TomlHistoryStore {
    type Error = StoreError;

    /// 文件不存在视为空历史。
    fn load(&self) -> StoreResult<Vec<String>> {
        let s = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::read(&self.path, e)),
        };
        let file: HistoryFile = toml::from_str(&s).map_err(|e| StoreError::parse(&self.path, e))?;
        Ok(file.history)
    }

    fn save(&self, entries: &[String]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::write(parent, e))?;
        }
        let body = toml::to_string(&HistoryFile {
            history: entries.to_vec(),
        })?;
        fs::write(&self.path, body).map_err(|e| StoreError::write(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), count = entries.len(), "history saved");
        Ok(())
    }
}
