//! `processor`：输入事件处理链。
//!
//! 按顺序处理 `InputEvent`，对 `Context` 做状态变更，并可产生 `Action`。
//!
//! 当前链路（`Session::new` 默认组装）：
//! - `EditingProcessor`：字符/退格/粘贴/输入法，文本变化后重建候选
//! - `CompletionProcessor`：Tab 用当前候选的补全替换输入
//! - `NavigationProcessor`：左右移动选择
//! - `HistoryProcessor`：上下回溯历史
//! - `CommitProcessor`：回车提交执行，Esc 放弃

use crate::{
    context::Context,
    key_event::{Action, InputEvent},
    provider::ProviderRegistry,
};

/// Processor 执行结果：是否“消费”了本次事件。
///
/// - `Consume`：本 processor 已处理该事件，后续 processor 不再执行
/// - `Continue`：本 processor 不处理该事件，交给下一个 processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Consume,
    Continue,
}

/// Processor：处理输入事件并改变 Context；必要时产生输出动作。
pub trait Processor: Send + Sync {
    fn process(
        &mut self,
        registry: &ProviderRegistry,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>);
}

fn refresh_if(changed: bool, registry: &ProviderRegistry, context: &mut Context) -> Vec<Action> {
    if changed {
        vec![context.refresh(registry)]
    } else {
        Vec::new()
    }
}

/// 编辑输入的 processor。
pub struct EditingProcessor;

impl Processor for EditingProcessor {
    fn process(
        &mut self,
        registry: &ProviderRegistry,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        let changed = match input_event {
            InputEvent::Char(ch) => context.query.push_char(*ch),
            InputEvent::Backspace => context.query.backspace(),
            InputEvent::Paste(text) => context.query.paste(text),
            InputEvent::Composition(ev) => context.query.compose(ev),
            _ => return (ProcessStatus::Continue, Vec::new()),
        };
        (ProcessStatus::Consume, refresh_if(changed, registry, context))
    }
}

pub struct CompletionProcessor;

impl Processor for CompletionProcessor {
    fn process(
        &mut self,
        registry: &ProviderRegistry,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        if *input_event != InputEvent::Tab {
            return (ProcessStatus::Continue, Vec::new());
        }
        let completion = context
            .carousel
            .selected()
            .map(|c| c.completion.clone())
            .unwrap_or_default();
        let changed = context.query.complete(&completion);
        (ProcessStatus::Consume, refresh_if(changed, registry, context))
    }
}

pub struct NavigationProcessor;

impl Processor for NavigationProcessor {
    fn process(
        &mut self,
        _registry: &ProviderRegistry,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        let moved = match input_event {
            InputEvent::Left => context.carousel.move_left(),
            InputEvent::Right => context.carousel.move_right(),
            _ => return (ProcessStatus::Continue, Vec::new()),
        };
        let actions = moved
            .map(|ev| context.selection_changed(ev))
            .into_iter()
            .collect();
        (ProcessStatus::Consume, actions)
    }
}

pub struct HistoryProcessor;

impl Processor for HistoryProcessor {
    fn process(
        &mut self,
        registry: &ProviderRegistry,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        let changed = match input_event {
            InputEvent::Up => context.query.history_up(),
            InputEvent::Down => context.query.history_down(),
            _ => return (ProcessStatus::Continue, Vec::new()),
        };
        (ProcessStatus::Consume, refresh_if(changed, registry, context))
    }
}

pub struct CommitProcessor;

impl Processor for CommitProcessor {
    fn process(
        &mut self,
        registry: &ProviderRegistry,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match input_event {
            InputEvent::Enter => {
                let mut actions = Vec::new();
                context.query.commit();
                if let Some(candidate) = context.carousel.selected() {
                    let outcome = registry.activate(candidate);
                    actions.push(Action::Activated {
                        provider: registry
                            .name(candidate.provider)
                            .unwrap_or_default()
                            .to_owned(),
                        name: candidate.name.clone(),
                        outcome,
                    });
                }
                actions.append(&mut context.hide());
                (ProcessStatus::Consume, actions)
            }
            InputEvent::Escape => (ProcessStatus::Consume, context.hide()),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}
