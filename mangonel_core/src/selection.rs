//! `selection`：候选轮播（carousel）上的选择状态机。
//!
//! 状态只有两种：`Empty` 与 `Positioned(i)`。`Carousel` 同时持有列表和选择，
//! 所以下标不可能越界；这里不包含任何渲染或动画逻辑。

use crate::{model::Candidate, ranked::RankedList};

/// 选择状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Positioned(usize),
}

impl Selection {
    pub fn index(self) -> Option<usize> {
        match self {
            Selection::Empty => None,
            Selection::Positioned(i) => Some(i),
        }
    }
}

/// 选择变化事件：显示层唯一需要消费的输出。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    pub index: Option<usize>,
    /// 新选中候选的补全文本；`Empty` 时为空串
    pub completion: String,
}

/// 排序列表 + 当前选择。
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    list: RankedList,
    selection: Selection,
}

impl Carousel {
    /// 用新列表整体替换旧列表，并把选择复位到第一项（或 `Empty`）。
    pub fn rebuild(&mut self, list: RankedList) -> SelectionChanged {
        self.selection = if list.is_empty() {
            Selection::Empty
        } else {
            Selection::Positioned(0)
        };
        self.list = list;
        self.changed()
    }

    pub fn clear(&mut self) -> SelectionChanged {
        self.rebuild(RankedList::new())
    }

    /// 向右移动一格；已在末尾或为空时不变，返回 `None`。
    pub fn move_right(&mut self) -> Option<SelectionChanged> {
        match self.selection {
            Selection::Positioned(i) if i + 1 < self.list.len() => {
                self.selection = Selection::Positioned(i + 1);
                Some(self.changed())
            }
            _ => None,
        }
    }

    /// 向左移动一格；已在开头或为空时不变，返回 `None`。
    pub fn move_left(&mut self) -> Option<SelectionChanged> {
        match self.selection {
            Selection::Positioned(i) if i >= 1 => {
                self.selection = Selection::Positioned(i - 1);
                Some(self.changed())
            }
            _ => None,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.selection.index().and_then(|i| self.list.get(i))
    }

    pub fn list(&self) -> &RankedList {
        &self.list
    }

    fn changed(&self) -> SelectionChanged {
        SelectionChanged {
            index: self.selection.index(),
            completion: self
                .selected()
                .map(|c| c.completion.clone())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn list_of(n: usize) -> RankedList {
        (0..n)
            .map(|i| {
                Candidate::new(format!("c{i}"), "")
                    .completion(format!("done{i}"))
                    .priority(i as i32)
            })
            .collect()
    }

    #[test]
    fn rebuild_positions_first_or_empty() {
        let mut carousel = Carousel::default();
        let ev = carousel.rebuild(list_of(3));
        assert_eq!(
            ev,
            SelectionChanged {
                index: Some(0),
                completion: "done0".into()
            }
        );

        let ev = carousel.rebuild(RankedList::new());
        assert_eq!(
            ev,
            SelectionChanged {
                index: None,
                completion: String::new()
            }
        );
        assert_eq!(carousel.selection(), Selection::Empty);
    }

    #[test]
    fn empty_ignores_navigation() {
        let mut carousel = Carousel::default();
        assert_eq!(carousel.move_right(), None);
        assert_eq!(carousel.move_left(), None);
        assert_eq!(carousel.selection(), Selection::Empty);
    }

    #[test]
    fn singleton_cannot_move() {
        let mut carousel = Carousel::default();
        carousel.rebuild(list_of(1));
        assert_eq!(carousel.move_right(), None);
        assert_eq!(carousel.move_left(), None);
        assert_eq!(carousel.selection(), Selection::Positioned(0));
    }

    #[test]
    fn move_emits_new_completion() {
        let mut carousel = Carousel::default();
        carousel.rebuild(list_of(3));
        let ev = carousel.move_right().unwrap();
        assert_eq!(ev.index, Some(1));
        assert_eq!(ev.completion, "done1");
        assert_eq!(carousel.selected().map(|c| c.name.as_str()), Some("c1"));
    }

    proptest! {
        #[test]
        fn walk_to_both_ends_and_stop(len in 1usize..40) {
            let mut carousel = Carousel::default();
            carousel.rebuild(list_of(len));

            for step in 1..len {
                let ev = carousel.move_right();
                prop_assert_eq!(ev.and_then(|e| e.index), Some(step));
            }
            prop_assert_eq!(carousel.selection(), Selection::Positioned(len - 1));
            prop_assert!(carousel.move_right().is_none());
            prop_assert_eq!(carousel.selection(), Selection::Positioned(len - 1));

            for step in (0..len - 1).rev() {
                let ev = carousel.move_left();
                prop_assert_eq!(ev.and_then(|e| e.index), Some(step));
            }
            prop_assert!(carousel.move_left().is_none());
            prop_assert_eq!(carousel.selection(), Selection::Positioned(0));
        }
    }
}
