//! 宿主侧的持久化：TOML 配置文件与历史文件。

pub mod config;
pub mod error;
pub mod history;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use history::TomlHistoryStore;

/// 应用目录名（配置与数据目录下的子目录）。
pub const APP_DIR: &str = "mangonel";
