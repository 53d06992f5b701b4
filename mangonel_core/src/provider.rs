//! `provider`：数据源抽象与有序注册表。
//!
//! core 不关心 provider 的数据来自哪里（桌面文件、文件系统、shell……），
//! 只通过 `search`/`activate` 两个操作和它打交道。

use crate::{
    error::{ProviderError, RegistryError},
    model::{Candidate, ProviderId},
};

/// Provider：给定查询返回候选；提交时执行被选中的候选。
///
/// 约定：
/// - `search` 必须自己控制耗时（每次按键都会同步调用）
/// - `search` 不读写会话状态
/// - `activate` 失败只会被汇报，不会结束会话
pub trait Provider: Send + Sync {
    fn search(&self, query: &str) -> Result<Vec<Candidate>, ProviderError>;

    fn activate(&self, candidate: &Candidate) -> Result<(), ProviderError>;
}

/// 执行结果（汇报给宿主用于日志/提示）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// 有序的 provider 注册表：名称 -> provider，注册顺序即查询顺序。
#[derive(Default)]
pub struct ProviderRegistry {
    entries: Vec<(String, Box<dyn Provider>)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按顺序注册；名称重复时拒绝。
    pub fn register(
        &mut self,
        name: impl Into<String>,
        provider: impl Provider + 'static,
    ) -> Result<ProviderId, RegistryError> {
        let name = name.into();
        if self.entries.iter().any(|(n, _)| *n == name) {
            return Err(RegistryError::DuplicateProvider(name));
        }
        self.entries.push((name, Box::new(provider)));
        Ok(ProviderId(self.entries.len() - 1))
    }

    /// 链式注册（构造阶段使用）。
    pub fn with(
        mut self,
        name: impl Into<String>,
        provider: impl Provider + 'static,
    ) -> Result<Self, RegistryError> {
        self.register(name, provider)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn name(&self, id: ProviderId) -> Option<&str> {
        self.entries.get(id.0).map(|(n, _)| n.as_str())
    }

    pub fn get(&self, id: ProviderId) -> Option<&dyn Provider> {
        self.entries.get(id.0).map(|(_, p)| p.as_ref())
    }

    /// 按注册顺序遍历 `(id, name, provider)`。
    pub fn iter(&self) -> impl Iterator<Item = (ProviderId, &str, &dyn Provider)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (n, p))| (ProviderId(i), n.as_str(), p.as_ref()))
    }

    /// 把候选交回它的来源 provider 执行。
    pub fn activate(&self, candidate: &Candidate) -> Outcome {
        let Some(provider) = self.get(candidate.provider) else {
            tracing::warn!(provider = candidate.provider.0, "activation routed to unknown provider");
            return Outcome::Failure(format!("unknown provider #{}", candidate.provider.0));
        };
        let name = self.name(candidate.provider).unwrap_or_default();
        match provider.activate(candidate) {
            Ok(()) => {
                tracing::info!(provider = name, candidate = %candidate.name, "activated");
                Outcome::Success
            }
            Err(e) => {
                tracing::warn!(provider = name, candidate = %candidate.name, error = %e, "activation failed");
                Outcome::Failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Recorder {
        fail: bool,
        launched: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                launched: Mutex::new(Vec::new()),
            }
        }
    }

    impl Provider for Recorder {
        fn search(&self, query: &str) -> Result<Vec<Candidate>, ProviderError> {
            Ok(vec![Candidate::new(query, query)])
        }

        fn activate(&self, candidate: &Candidate) -> Result<(), ProviderError> {
            if self.fail {
                return Err(ProviderError::Other("boom".into()));
            }
            self.launched.lock().unwrap().push(candidate.payload.clone());
            Ok(())
        }
    }

    #[test]
    fn register_assigns_ids_in_order() {
        let mut registry = ProviderRegistry::new();
        let a = registry.register("applications", Recorder::new(false)).unwrap();
        let b = registry.register("paths", Recorder::new(false)).unwrap();
        assert_eq!(a, ProviderId(0));
        assert_eq!(b, ProviderId(1));
        let names: Vec<&str> = registry.iter().map(|(_, n, _)| n).collect();
        assert_eq!(names, ["applications", "paths"]);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry = ProviderRegistry::new();
        registry.register("shell", Recorder::new(false)).unwrap();
        let err = registry.register("shell", Recorder::new(false)).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateProvider("shell".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn activation_failure_is_reported_not_raised() {
        let registry = ProviderRegistry::new()
            .with("broken", Recorder::new(true))
            .unwrap();
        let outcome = registry.activate(&Candidate::new("x", "x"));
        assert_eq!(outcome, Outcome::Failure("boom".into()));
    }

    #[test]
    fn activation_to_unknown_provider_fails() {
        let registry = ProviderRegistry::new();
        let mut c = Candidate::new("x", "x");
        c.provider = ProviderId(3);
        assert!(!registry.activate(&c).is_success());
    }
}
