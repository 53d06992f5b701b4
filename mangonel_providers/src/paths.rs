//! 路径 provider：以 `/` 或 `~/` 开头的查询按文件系统补全。
//!
//! 只列出父目录里以已输入片段开头的条目，按多出来的字符数排序后截断；补全保留用户的写法（`~/` 不展开），
//! 目录补全末尾带 `/`，方便继续 Tab 下钻。

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use mangonel_core::{Candidate, Provider, ProviderError};
use serde::Deserialize;

use crate::launch::spawn_detached;

/// 配置里的 `[paths]` 段。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub enabled: bool,
    /// 单次查询最多返回多少条
    pub limit: usize,
    /// 打开文件/目录用的程序
    pub opener: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: 32,
            opener: "xdg-open".to_string(),
        }
    }
}

pub struct PathsProvider {
    home: Option<PathBuf>,
    limit: usize,
    opener: String,
}

impl PathsProvider {
    pub fn new(config: &PathsConfig) -> Self {
        Self {
            home: dirs::home_dir(),
            limit: config.limit.max(1),
            opener: config.opener.clone(),
        }
    }

    /// 指定 `~` 对应的目录（测试或沙箱环境用）。
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// 把用户写法的目录部分展开成真实路径。
    fn expand(&self, dir: &str) -> Option<PathBuf> {
        if let Some(rest) = dir.strip_prefix("~/") {
            return self.home.as_ref().map(|h| h.join(rest));
        }
        dir.starts_with('/').then(|| PathBuf::from(dir))
    }
}

struct Entry {
    name: String,
    path: PathBuf,
    /// 比已输入片段多出来的字符数，也就是优先级
    extra: usize,
}

fn list_dir(dir: &Path, fragment: &str) -> Result<Vec<Entry>, ProviderError> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    let show_hidden = fragment.starts_with('.');
    let mut out = Vec::new();
    for entry in read.flatten() {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.starts_with(fragment) || (name.starts_with('.') && !show_hidden) {
            continue;
        }
        let extra = name.chars().count() - fragment.chars().count();
        out.push(Entry {
            name,
            path: entry.path(),
            extra,
        });
    }
    out.sort_by(|a, b| a.extra.cmp(&b.extra).then_with(|| a.name.cmp(&b.name)));
    Ok(out)
}

impl Provider for PathsProvider {
    fn search(&self, query: &str) -> Result<Vec<Candidate>, ProviderError> {
        let Some(slash) = query.rfind('/') else {
            return Ok(Vec::new());
        };
        let (shown_dir, fragment) = query.split_at(slash + 1);
        let Some(dir) = self.expand(shown_dir) else {
            return Ok(Vec::new());
        };

        let found = list_dir(&dir, fragment)?
            .into_iter()
            .take(self.limit)
            .map(|e| {
                let is_dir = e.path.is_dir();
                let mut completion = format!("{shown_dir}{}", e.name);
                if is_dir {
                    completion.push('/');
                }
                let (icon, kind) = if is_dir {
                    ("inode-directory", "Directory")
                } else {
                    ("text-x-generic", "File")
                };
                Candidate::new(&e.name, e.path.to_string_lossy())
                    .completion(completion)
                    .icon(icon)
                    .comment(kind)
                    .priority(i32::try_from(e.extra).unwrap_or(i32::MAX - 1))
            })
            .collect();
        Ok(found)
    }

    fn activate(&self, candidate: &Candidate) -> Result<(), ProviderError> {
        spawn_detached(&self.opener, std::slice::from_ref(&candidate.payload))
    }
}
