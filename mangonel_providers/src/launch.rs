use std::process::{Command, Stdio};

use mangonel_core::ProviderError;

/// 启动外部程序，不等待它退出。
pub(crate) fn spawn_detached(program: &str, args: &[String]) -> Result<(), ProviderError> {
    tracing::debug!(program, ?args, "spawning");
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
        .map_err(|e| ProviderError::launch(program, e))
}
