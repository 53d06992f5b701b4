//! `query`：输入文本、输入法 pre-edit 与历史回溯。
//!
//! 约定：
//! - `text`：已提交的输入，发给 provider 查询、提交时写入历史
//! - `composition`：输入法尚未提交的 pre-edit，单独保存，不参与查询也不写入历史
//! - 历史最新的在前，超过上限时静默丢弃最旧的
//!
//! 编辑方法都返回“文本是否变化”，调用方据此决定是否重建候选。

use std::collections::VecDeque;

use crate::key_event::Composition;

/// 有上限的历史记录 + 回溯游标。
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    cap: usize,
    /// `None` 表示正在编辑实时文本
    cursor: Option<usize>,
}

/// 向新方向回溯一步的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Newer<'a> {
    /// 已经在实时文本上
    Unchanged,
    /// 回到实时文本
    Live,
    Entry(&'a str),
}

impl History {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap,
            cursor: None,
        }
    }

    /// 从持久化的列表恢复（最新的在前），超出上限的部分丢弃。
    pub fn from_entries(entries: impl IntoIterator<Item = String>, cap: usize) -> Self {
        Self {
            entries: entries.into_iter().take(cap).collect(),
            cap,
            cursor: None,
        }
    }

    /// 写入最前面；空串不记录。
    pub fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        if entry.is_empty() {
            return;
        }
        self.entries.push_front(entry);
        self.entries.truncate(self.cap);
        self.cursor = None;
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// 向更旧方向走一步；已到最旧一条时不动，返回 `None`。
    fn older(&mut self) -> Option<&str> {
        let next = self.cursor.map_or(0, |i| i + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    fn newer(&mut self) -> Newer<'_> {
        match self.cursor {
            None => Newer::Unchanged,
            Some(0) => {
                self.cursor = None;
                Newer::Live
            }
            Some(i) => {
                self.cursor = Some(i - 1);
                self.entries
                    .get(i - 1)
                    .map_or(Newer::Unchanged, |e| Newer::Entry(e.as_str()))
            }
        }
    }
}

/// 一次输入会话的文本状态。
#[derive(Debug, Clone)]
pub struct QuerySession {
    text: String,
    composition: String,
    history: History,
    /// 开始回溯前的实时文本，回到游标 `None` 时恢复
    live: Option<String>,
    /// 路径前缀（例如 `"~/"`）：编辑后恰好等于它时清空输入
    path_prefix: String,
}

impl QuerySession {
    pub fn new(history: History, path_prefix: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            composition: String::new(),
            history,
            live: None,
            path_prefix: path_prefix.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn composition(&self) -> &str {
        &self.composition
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.text.push(ch);
        true
    }

    /// 删掉一个字符；若剩下的恰好是路径前缀则整体清空。
    pub fn backspace(&mut self) -> bool {
        if self.text.pop().is_none() {
            return false;
        }
        self.collapse_path_prefix();
        true
    }

    pub fn paste(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.text.push_str(text);
        true
    }

    /// 应用一次输入法事件：替换末尾、追加提交串，pre-edit 只更新覆盖层。
    pub fn compose(&mut self, ev: &Composition) -> bool {
        let before = self.text.clone();
        if ev.replacement_start < 0 {
            let keep = self
                .text
                .chars()
                .count()
                .saturating_sub(ev.replacement_start.unsigned_abs() as usize);
            self.truncate_chars(keep);
        }
        self.text.push_str(&ev.commit);
        self.collapse_path_prefix();
        self.composition = ev.preedit.clone();
        self.text != before
    }

    /// 用补全整体替换输入；补全为空时不动。
    pub fn complete(&mut self, completion: &str) -> bool {
        if completion.is_empty() {
            return false;
        }
        self.composition.clear();
        if self.text == completion {
            return false;
        }
        self.text = completion.to_owned();
        true
    }

    /// Up：载入更旧的一条历史。
    pub fn history_up(&mut self) -> bool {
        let was_live = self.history.cursor().is_none();
        let Some(entry) = self.history.older().map(str::to_owned) else {
            return false;
        };
        if was_live {
            self.live = Some(std::mem::take(&mut self.text));
        }
        self.set_text(entry);
        true
    }

    /// Down：载入更新的一条历史，走回起点时恢复实时文本。
    pub fn history_down(&mut self) -> bool {
        let next = match self.history.newer() {
            Newer::Unchanged => return false,
            Newer::Live => self.live.take().unwrap_or_default(),
            Newer::Entry(e) => e.to_owned(),
        };
        self.set_text(next);
        true
    }

    /// 提交：把当前文本写入历史（pre-edit 不写入；空文本不记录）。
    pub fn commit(&mut self) {
        self.history.push(self.text.clone());
        self.live = None;
        self.composition.clear();
    }

    /// 隐藏时清空输入，历史保留。
    pub fn clear(&mut self) {
        self.text.clear();
        self.composition.clear();
        self.reset_recall();
    }

    /// 重新显示时游标回到实时文本。
    pub fn reset_recall(&mut self) {
        self.history.reset_cursor();
        self.live = None;
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
        self.composition.clear();
    }

    fn collapse_path_prefix(&mut self) {
        if !self.path_prefix.is_empty() && self.text == self.path_prefix {
            self.text.clear();
        }
    }

    fn truncate_chars(&mut self, keep: usize) {
        if let Some((byte, _)) = self.text.char_indices().nth(keep) {
            self.text.truncate(byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn session(cap: usize) -> QuerySession {
        QuerySession::new(History::new(cap), "~/")
    }

    fn type_str(q: &mut QuerySession, s: &str) {
        for ch in s.chars() {
            q.push_char(ch);
        }
    }

    #[test]
    fn backspace_to_path_prefix_clears_field() {
        let mut q = session(5);
        type_str(&mut q, "~/d");
        assert!(q.backspace());
        assert_eq!(q.text(), "");
    }

    #[test]
    fn backspace_elsewhere_removes_one_char() {
        let mut q = session(5);
        type_str(&mut q, "a~/x");
        q.backspace();
        assert_eq!(q.text(), "a~/");
        let mut q = session(5);
        type_str(&mut q, "~/ab");
        q.backspace();
        assert_eq!(q.text(), "~/a");
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut q = session(5);
        assert!(!q.backspace());
    }

    #[test]
    fn control_chars_are_ignored() {
        let mut q = session(5);
        assert!(!q.push_char('\u{8}'));
        assert_eq!(q.text(), "");
    }

    #[test]
    fn paste_appends_verbatim() {
        let mut q = session(5);
        type_str(&mut q, "ls ");
        q.paste("/tmp/a b");
        assert_eq!(q.text(), "ls /tmp/a b");
    }

    #[test]
    fn tab_replaces_whole_text() {
        let mut q = session(5);
        type_str(&mut q, "fo");
        assert!(q.complete("foo.txt"));
        assert_eq!(q.text(), "foo.txt");
        assert!(!q.complete(""));
        assert_eq!(q.text(), "foo.txt");
    }

    #[test]
    fn composition_is_kept_apart_from_text() {
        let mut q = session(5);
        type_str(&mut q, "ab");
        assert!(!q.compose(&Composition::preedit("ni")));
        assert_eq!(q.text(), "ab");
        assert_eq!(q.composition(), "ni");

        assert!(q.compose(&Composition::commit("你")));
        assert_eq!(q.text(), "ab你");
        assert_eq!(q.composition(), "");
    }

    #[test]
    fn composition_replacement_removes_trailing_chars() {
        let mut q = session(5);
        type_str(&mut q, "abc");
        q.compose(&Composition {
            commit: "é".into(),
            preedit: String::new(),
            replacement_start: -1,
        });
        assert_eq!(q.text(), "abé");
    }

    #[test]
    fn composition_committing_path_prefix_clears() {
        let mut q = session(5);
        q.push_char('~');
        q.compose(&Composition::commit("/"));
        assert_eq!(q.text(), "");
    }

    #[test]
    fn commit_never_persists_preedit() {
        let mut q = session(5);
        type_str(&mut q, "kate");
        q.compose(&Composition::preedit("xyz"));
        q.commit();
        assert_eq!(q.history().entries().collect::<Vec<_>>(), ["kate"]);
    }

    #[test]
    fn overflow_recall_returns_most_recent_first() {
        let cap = 3;
        let mut q = session(cap);
        for i in 0..5 {
            q.clear();
            type_str(&mut q, &format!("cmd{i}"));
            q.commit();
        }
        q.clear();
        type_str(&mut q, "live");

        let mut seen = Vec::new();
        for _ in 0..cap {
            assert!(q.history_up());
            seen.push(q.text().to_owned());
        }
        assert_eq!(seen, ["cmd4", "cmd3", "cmd2"]);
        assert!(!q.history_up());
        assert_eq!(q.text(), "cmd2");

        for _ in 0..cap {
            assert!(q.history_down());
        }
        assert_eq!(q.text(), "live");
        assert!(!q.history_down());
        assert_eq!(q.history().cursor(), None);
    }

    #[test]
    fn up_on_empty_history_keeps_text() {
        let mut q = session(3);
        type_str(&mut q, "abc");
        assert!(!q.history_up());
        assert_eq!(q.text(), "abc");
    }

    #[test]
    fn reset_recall_keeps_entries() {
        let mut q = session(3);
        type_str(&mut q, "one");
        q.commit();
        q.history_up();
        q.clear();
        assert_eq!(q.history().cursor(), None);
        assert_eq!(q.history().len(), 1);
    }

    #[test]
    fn empty_text_is_not_recorded() {
        let mut q = session(3);
        q.commit();
        assert!(q.history().is_empty());
    }

    #[test]
    fn restored_history_is_capped() {
        let h = History::from_entries(["a", "b", "c"].map(String::from), 2);
        assert_eq!(h.entries().collect::<Vec<_>>(), ["a", "b"]);
    }
}
