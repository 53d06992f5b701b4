//! `Session`：对上层（CLI/GUI）提供的会话对象。
//!
//! `Session` 自身不做业务逻辑判断，而是：
//! - 持有 `Context`（状态）与 provider 注册表
//! - 持有 processors 链（可插拔）
//! - 把每次 `InputEvent` 依次交给 processors，直到被消费
//! - 最后输出 `DisplayState` + `Action`
//!
//! `handle` 需要 `&mut self`，一次事件处理完之前不可能再进来第二个。

use serde::Deserialize;

use crate::{
    context::Context,
    history_store::HistoryStore,
    key_event::{Action, InputEvent},
    model::DisplayState,
    processor::{
        CommitProcessor, CompletionProcessor, EditingProcessor, HistoryProcessor,
        NavigationProcessor, ProcessStatus, Processor,
    },
    provider::ProviderRegistry,
    query::{History, QuerySession},
};

/// 会话配置（通常来自配置文件的 `[session]` 段）。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 历史条数上限
    pub history_cap: usize,
    /// 编辑后恰好等于它时清空输入
    pub path_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_cap: 50,
            path_prefix: "~/".to_string(),
        }
    }
}

/// 启动器会话。
pub struct Session {
    registry: ProviderRegistry,
    ctx: Context,
    config: SessionConfig,
    processors: Vec<Box<dyn Processor>>,
}

impl Session {
    /// 创建会话（初始为隐藏），并组装默认 processors 链。
    pub fn new(registry: ProviderRegistry, config: SessionConfig) -> Self {
        let query = QuerySession::new(History::new(config.history_cap), config.path_prefix.clone());
        Self {
            registry,
            ctx: Context::new(query),
            config,
            processors: vec![
                Box::new(EditingProcessor),
                Box::new(CompletionProcessor),
                Box::new(NavigationProcessor),
                Box::new(HistoryProcessor),
                Box::new(CommitProcessor),
            ],
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn is_visible(&self) -> bool {
        self.ctx.visible
    }

    /// 获取当前显示快照（只读）。
    pub fn display_state(&self) -> DisplayState {
        self.ctx.display_state()
    }

    /// 历史（最新的在前）。
    pub fn history(&self) -> Vec<String> {
        self.ctx.query.history().entries().map(str::to_owned).collect()
    }

    pub fn show(&mut self) {
        self.ctx.show();
    }

    pub fn hide(&mut self) -> Vec<Action> {
        self.ctx.hide()
    }

    pub fn toggle(&mut self) -> Vec<Action> {
        if self.ctx.visible {
            self.hide()
        } else {
            self.show();
            Vec::new()
        }
    }

    /// 处理一个输入事件，返回最新显示快照与动作列表；隐藏时忽略事件。
    pub fn handle(&mut self, ev: InputEvent) -> (DisplayState, Vec<Action>) {
        let mut actions = Vec::new();
        if !self.ctx.visible {
            tracing::trace!(?ev, "event ignored while hidden");
            return (self.ctx.display_state(), actions);
        }
        for p in &mut self.processors {
            let (status, mut a) = p.process(&self.registry, &mut self.ctx, &ev);
            actions.append(&mut a);
            if status == ProcessStatus::Consume {
                break;
            }
        }
        (self.ctx.display_state(), actions)
    }

    /// 会话开始时从存储恢复历史；当前输入和候选列表一并清空。
    pub fn restore_history<S: HistoryStore>(&mut self, store: &S) -> Result<(), S::Error> {
        let entries = store.load()?;
        tracing::debug!(count = entries.len(), "history restored");
        let history = History::from_entries(entries, self.config.history_cap);
        self.ctx
            .replace_query(QuerySession::new(history, self.config.path_prefix.clone()));
        Ok(())
    }

    /// 会话结束时保存历史。
    pub fn persist_history<S: HistoryStore>(&self, store: &S) -> Result<(), S::Error> {
        store.save(&self.history())
    }
}
