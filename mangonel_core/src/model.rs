/// 未排名的优先级哨兵值（排在所有有排名的候选之后）。
pub const UNRANKED: i32 = i32::MAX;

/// 候选来源 provider 的键：注册表中的位置，不持有 provider 本身。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProviderId(pub usize);

/// 候选项（一次查询中某个 provider 返回的一条结果）。
///
/// 注意：`provider` 由聚合方在合并时填写，provider 自己构造候选时不用关心。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 展示名称
    pub name: String,
    /// Tab 补全时整体替换输入框的文本
    pub completion: String,
    /// 图标名（由渲染层解释）
    pub icon: String,
    /// 优先级（越小越靠前），`UNRANKED` 表示未排名
    pub priority: i32,
    /// 交给 provider 执行的载荷（core 不解释）
    pub payload: String,
    /// 备注（例如 "Application"），显示在名称下面
    pub comment: Option<String>,
    /// 来源 provider
    pub provider: ProviderId,
}

impl Candidate {
    pub fn new(name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completion: String::new(),
            icon: String::new(),
            priority: UNRANKED,
            payload: payload.into(),
            comment: None,
            provider: ProviderId::default(),
        }
    }

    pub fn completion(mut self, completion: impl Into<String>) -> Self {
        self.completion = completion.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// 给显示层的只读快照。
///
/// - 显示层只读 `DisplayState`，不直接读写 `Context`
/// - 每次事件处理之后刷新一次
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayState {
    /// 会话是否可见
    pub visible: bool,
    /// 已提交的输入文本
    pub text: String,
    /// 输入法 pre-edit（未提交）
    pub composition: String,
    /// 当前选中候选的补全建议
    pub completion: String,
    /// 选中位置；`None` 表示没有选中
    pub selected: Option<usize>,
    /// 合并排序后的候选列表
    pub candidates: Vec<Candidate>,
}

impl DisplayState {
    /// 当前选中的候选。
    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.selected.and_then(|i| self.candidates.get(i))
    }
}
