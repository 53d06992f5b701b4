//! `Context`：processor 链共享的唯一状态容器。
//!
//! 约定：
//! - `query`：输入文本、pre-edit、历史
//! - `carousel`：本次查询的排序列表 + 当前选择（每次文本变化整体重建）
//! - `completion`：当前选中候选的补全建议，随选择事件更新
use crate::{
    key_event::Action,
    model::DisplayState,
    provider::ProviderRegistry,
    query::QuerySession,
    ranked::RankedList,
    selection::{Carousel, SelectionChanged},
};

/// 启动器会话上下文。
#[derive(Debug, Clone)]
pub struct Context {
    pub query: QuerySession,
    pub carousel: Carousel,
    pub completion: String,
    pub visible: bool,
}

impl Context {
    pub fn new(query: QuerySession) -> Self {
        Self {
            query,
            carousel: Carousel::default(),
            completion: String::new(),
            visible: false,
        }
    }

    /// 按当前文本重新查询所有 provider，并复位选择。
    pub fn refresh(&mut self, registry: &ProviderRegistry) -> Action {
        let list = RankedList::build(registry, self.query.text());
        let ev = self.carousel.rebuild(list);
        self.selection_changed(ev)
    }

    pub fn selection_changed(&mut self, ev: SelectionChanged) -> Action {
        self.completion.clone_from(&ev.completion);
        ev.into()
    }

    /// 显示：历史游标回到实时文本，历史内容保留。
    pub fn show(&mut self) {
        self.visible = true;
        self.query.reset_recall();
    }

    /// 隐藏：丢弃输入、列表与选择。
    ///
    /// 可见时先发出选择清空事件，再发出 `Hidden`。
    pub fn hide(&mut self) -> Vec<Action> {
        self.query.clear();
        let cleared = self.carousel.clear();
        let cleared = self.selection_changed(cleared);
        if !self.visible {
            return Vec::new();
        }
        self.visible = false;
        vec![cleared, Action::Hidden]
    }

    /// 换一个查询会话（比如恢复历史之后），旧列表随之作废。
    pub fn replace_query(&mut self, query: QuerySession) {
        self.query = query;
        self.carousel.clear();
        self.completion.clear();
    }

    /// 生成显示层只读快照。
    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            visible: self.visible,
            text: self.query.text().to_owned(),
            composition: self.query.composition().to_owned(),
            completion: self.completion.clone(),
            selected: self.carousel.selection().index(),
            candidates: self.carousel.list().as_slice().to_vec(),
        }
    }
}
