//! # Observer 模块
//!
//! 索引变化通知。任何 `FnMut(usize)` 闭包都可以直接作为观察者使用，
//! 参数为切换后的新索引。

use super::state::IndexChange;

/// 观察者标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// 轮播观察者
pub trait RotationObserver {
    /// 索引真正变化后调用，来源可以是计时器或手动命令
    fn on_index_change(&mut self, change: IndexChange);
}

impl<F> RotationObserver for F
where
    F: FnMut(usize),
{
    fn on_index_change(&mut self, change: IndexChange) {
        self(change.to)
    }
}

/// 观察者列表
#[derive(Default)]
pub(crate) struct ObserverList {
    entries: Vec<(ObserverId, Box<dyn RotationObserver>)>,
    next_id: u64,
}

impl ObserverList {
    pub fn add(&mut self, observer: Box<dyn RotationObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, change: IndexChange) {
        for (_, observer) in &mut self.entries {
            observer.on_index_change(change);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.entries.len())
            .finish()
    }
}
