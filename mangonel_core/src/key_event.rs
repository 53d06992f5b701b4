use crate::provider::Outcome;

/// 输入法事件：提交串 + 新的 pre-edit。
///
/// `replacement_start <= 0` 表示先删掉已提交文本末尾的这么多个字符，再追加 `commit`。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Composition {
    pub commit: String,
    pub preedit: String,
    pub replacement_start: i32,
}

impl Composition {
    /// 只更新 pre-edit，不提交任何文本。
    pub fn preedit(preedit: impl Into<String>) -> Self {
        Self {
            preedit: preedit.into(),
            ..Self::default()
        }
    }

    /// 提交文本并结束组合。
    pub fn commit(commit: impl Into<String>) -> Self {
        Self {
            commit: commit.into(),
            ..Self::default()
        }
    }
}

/// 输入事件（逻辑键盘事件）。
///
/// 说明：
/// - `Session`/processor 只关心“语义事件”，不关心具体平台键值。
/// - 前端负责把系统按键、剪贴板、输入法回调转换成这些事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// 追加一个字符
    Char(char),
    /// 删除末尾一个字符
    Backspace,
    /// 粘贴（剪贴板或选区），原样追加
    Paste(String),
    /// 输入法组合
    Composition(Composition),
    /// 用当前候选的补全替换整个输入
    Tab,
    Left,
    Right,
    /// 历史：更旧
    Up,
    /// 历史：更新
    Down,
    /// 提交并执行当前候选
    Enter,
    /// 放弃并隐藏
    Escape,
}

/// 会话输出动作（对宿主的通知/副作用请求）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 选择变化（重建或左右移动）
    SelectionChanged {
        index: Option<usize>,
        completion: String,
    },
    /// 提交后 provider 的执行结果
    Activated {
        provider: String,
        name: String,
        outcome: Outcome,
    },
    /// 会话已隐藏
    Hidden,
}

impl From<crate::selection::SelectionChanged> for Action {
    fn from(ev: crate::selection::SelectionChanged) -> Self {
        Action::SelectionChanged {
            index: ev.index,
            completion: ev.completion,
        }
    }
}
