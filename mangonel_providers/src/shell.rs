//! shell provider：查询的第一个词能在 `PATH` 里找到时，提供“运行这条命令”。

use std::path::PathBuf;

use mangonel_core::{Candidate, Provider, ProviderError, UNRANKED};
use serde::Deserialize;

use crate::launch::spawn_detached;

/// 配置里的 `[shell]` 段。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub enabled: bool,
    /// 执行命令用的 shell（以 `-c` 调用）
    pub shell: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            shell: "sh".to_string(),
        }
    }
}

pub struct ShellProvider {
    shell: String,
    /// 为空时查系统 `PATH`
    search_path: Option<String>,
}

impl ShellProvider {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            shell: config.shell.clone(),
            search_path: None,
        }
    }

    /// 只在给定的目录列表（`PATH` 格式）里查找命令。
    pub fn with_search_path(mut self, path: impl Into<String>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    fn resolve(&self, program: &str) -> Option<PathBuf> {
        match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().ok()?;
                which::which_in(program, Some(paths), cwd).ok()
            }
            None => which::which(program).ok(),
        }
    }
}

impl Provider for ShellProvider {
    fn search(&self, query: &str) -> Result<Vec<Candidate>, ProviderError> {
        let command = query.trim();
        let Some(program) = command.split_whitespace().next() else {
            return Ok(Vec::new());
        };
        if self.resolve(program).is_none() {
            return Ok(Vec::new());
        }
        Ok(vec![
            Candidate::new(format!("Run {command}"), command)
                .completion(command)
                .icon("utilities-terminal")
                .comment("Shell command")
                .priority(UNRANKED),
        ])
    }

    fn activate(&self, candidate: &Candidate) -> Result<(), ProviderError> {
        if candidate.payload.trim().is_empty() {
            return Err(ProviderError::InvalidPayload(candidate.payload.clone()));
        }
        spawn_detached(&self.shell, &["-c".to_string(), candidate.payload.clone()])
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::{fs, os::unix::fs::PermissionsExt};

    use pretty_assertions::assert_eq;

    use super::*;

    fn provider_with(program: &str) -> (tempfile::TempDir, ShellProvider) {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join(program);
        fs::write(&bin, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
        let provider = ShellProvider::new(&ShellConfig::default())
            .with_search_path(dir.path().display().to_string());
        (dir, provider)
    }

    #[test]
    fn known_program_offers_unranked_run() {
        let (_dir, provider) = provider_with("frobnicate");
        let found = provider.search("frobnicate --all ").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Run frobnicate --all");
        assert_eq!(found[0].completion, "frobnicate --all");
        assert_eq!(found[0].priority, UNRANKED);
    }

    #[test]
    fn unknown_program_offers_nothing() {
        let (_dir, provider) = provider_with("frobnicate");
        assert!(provider.search("definitely-not-here").unwrap().is_empty());
        assert!(provider.search("   ").unwrap().is_empty());
    }

    #[test]
    fn blank_payload_is_rejected() {
        let (_dir, provider) = provider_with("frobnicate");
        let err = provider.activate(&Candidate::new("Run", " ")).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidPayload(_)));
    }
}
