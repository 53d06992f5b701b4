//! 应用目录 provider：按名称/关键字匹配配置里的应用条目。
//!
//! 排名规则（越小越靠前）：
//! - 名称前缀匹配：名称比查询多出来的字符数
//! - 名称中间匹配：`100 + 匹配位置`
//! - 关键字前缀匹配：`200`

use mangonel_core::{Candidate, Provider, ProviderError};
use serde::Deserialize;

use crate::launch::spawn_detached;

const SUBSTRING_BASE: i32 = 100;
const KEYWORD_PRIORITY: i32 = 200;

/// 一个可启动的应用（配置里的 `[[applications]]`）。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppEntry {
    pub name: String,
    /// 命令行（按 shell 规则拆分）
    pub exec: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl AppEntry {
    pub fn new(name: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec: exec.into(),
            icon: None,
            comment: None,
            keywords: Vec::new(),
        }
    }

    fn rank(&self, query: &str) -> Option<i32> {
        let name = self.name.to_lowercase();
        if name.starts_with(query) {
            let extra = name.chars().count().saturating_sub(query.chars().count());
            return Some(bounded(extra));
        }
        if let Some(pos) = name.find(query) {
            let pos = name[..pos].chars().count();
            return Some(SUBSTRING_BASE + bounded(pos));
        }
        self.keywords
            .iter()
            .any(|k| k.to_lowercase().starts_with(query))
            .then_some(KEYWORD_PRIORITY)
    }
}

/// 同一档内的偏移不能越过下一档。
fn bounded(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX).min(SUBSTRING_BASE - 1)
}

pub struct ApplicationsProvider {
    entries: Vec<AppEntry>,
    limit: usize,
}

impl ApplicationsProvider {
    pub fn new(entries: Vec<AppEntry>) -> Self {
        Self { entries, limit: 64 }
    }

    /// 单次查询最多返回多少条。
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }
}

impl Provider for ApplicationsProvider {
    fn search(&self, query: &str) -> Result<Vec<Candidate>, ProviderError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let mut matched: Vec<(&AppEntry, i32)> = self
            .entries
            .iter()
            .filter_map(|e| e.rank(&query).map(|p| (e, p)))
            .collect();
        // 稳定排序：同分时保持配置顺序
        matched.sort_by_key(|(_, priority)| *priority);
        let found = matched
            .into_iter()
            .take(self.limit)
            .map(|(e, priority)| {
                let mut c = Candidate::new(&e.name, &e.exec)
                    .completion(&e.name)
                    .priority(priority)
                    .comment(e.comment.as_deref().unwrap_or("Application"));
                if let Some(icon) = &e.icon {
                    c = c.icon(icon);
                }
                c
            })
            .collect();
        Ok(found)
    }

    fn activate(&self, candidate: &Candidate) -> Result<(), ProviderError> {
        let argv = shlex::split(&candidate.payload)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ProviderError::InvalidPayload(candidate.payload.clone()))?;
        spawn_detached(&argv[0], &argv[1..])
    }
}
