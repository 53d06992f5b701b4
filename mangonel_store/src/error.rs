//! 配置与历史文件读写的错误类型。

use std::path::PathBuf;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// 读写启动器文件时的错误。
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 写文件或创建父目录失败
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 文件不是预期结构的 TOML
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// 当前平台找不到配置/数据目录
    #[error("No {0} directory available on this platform")]
    NoPlatformDir(&'static str),
}

impl StoreError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
