//! 错误类型：provider 失败与注册表冲突。
//!
//! 两者都不会让会话退出：查询失败只是少一份结果，执行失败只会汇报。

use std::time::Duration;

/// provider 查询或执行时的失败。
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// provider 在自己的时限内没有完成。
    #[error("provider timed out after {0:?}")]
    Timeout(Duration),

    /// 启动外部程序失败。
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// 候选载荷无法被 provider 解释。
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn launch(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            command: command.into(),
            source,
        }
    }
}

/// 注册 provider 时的错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("provider '{0}' is already registered")]
    DuplicateProvider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_error_mentions_command() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ProviderError::launch("firefox", io);
        assert!(err.to_string().contains("firefox"));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ProviderError = io.into();
        assert!(matches!(err, ProviderError::Io(_)));
    }
}
