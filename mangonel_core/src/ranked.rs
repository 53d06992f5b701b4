//! `ranked`：把所有 provider 的结果合并成一个按优先级排序的列表。
//!
//! 约定：
//! - 优先级不降序（越小越靠前）
//! - 优先级相同时保持到达顺序：先按 provider 注册顺序，再按 provider 内返回顺序
//! - 每次查询从空列表重建，构建完成后不再局部修改

use crate::{model::Candidate, provider::ProviderRegistry};

/// 合并排序后的候选列表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedList {
    items: Vec<Candidate>,
}

impl RankedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 依次查询每个 provider 并合并；空查询不触发任何 provider。
    ///
    /// 某个 provider 失败只会少一份结果，不影响其余 provider 的合并。
    pub fn build(registry: &ProviderRegistry, query: &str) -> Self {
        let mut list = Self::new();
        if query.is_empty() {
            return list;
        }
        for (id, name, provider) in registry.iter() {
            match provider.search(query) {
                Ok(found) => {
                    tracing::trace!(provider = name, count = found.len(), "provider results");
                    for mut c in found {
                        c.provider = id;
                        list.insert_sorted(c);
                    }
                }
                Err(e) => {
                    tracing::warn!(provider = name, error = %e, "provider search failed");
                }
            }
        }
        tracing::debug!(query, count = list.len(), "ranked list rebuilt");
        list
    }

    /// 插入一个候选并返回它落在的位置。
    ///
    /// 位置是第一个优先级严格大于新候选的下标（上界），
    /// 因此相同优先级的旧候选都排在它前面。
    pub fn insert_sorted(&mut self, candidate: Candidate) -> usize {
        let index = upper_bound(&self.items, candidate.priority);
        self.items.insert(index, candidate);
        index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.items
    }
}

impl FromIterator<Candidate> for RankedList {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut list = Self::new();
        for c in iter {
            list.insert_sorted(c);
        }
        list
    }
}

/// 二分查找：`[lo, hi)` 每轮严格缩小，只访问 `lo <= mid < hi` 的下标。
fn upper_bound(items: &[Candidate], priority: i32) -> usize {
    let (mut lo, mut hi) = (0usize, items.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if items[mid].priority <= priority {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
