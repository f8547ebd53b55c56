//! # State 模块
//!
//! 轮播索引状态与导航命令。
//!
//! ## 不变量
//!
//! - 标题数量至少为 1
//! - `index` 始终位于 `[0, len - 1]`
//! - 只有索引真正变化时才产生 [`IndexChange`]

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, MotionResult};

/// 索引变化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexChange {
    pub from: usize,
    pub to: usize,
}

/// 宿主向轮播组件发出的导航命令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationCommand {
    /// 下一个标题
    Next,
    /// 上一个标题
    Previous,
    /// 跳转到指定索引（越界时钳制）
    JumpTo { index: i64 },
    /// 回到第一个标题
    Reset,
}

/// 轮播索引状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    index: usize,
    len: usize,
    loop_enabled: bool,
}

impl RotationState {
    /// 创建状态，`len` 为 0 时返回错误
    pub fn new(len: usize, loop_enabled: bool) -> MotionResult<Self> {
        if len == 0 {
            return Err(MotionError::EmptyCaptions);
        }
        Ok(Self {
            index: 0,
            len,
            loop_enabled,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// 状态至少包含一个标题，恒为 false
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    pub fn set_loop(&mut self, loop_enabled: bool) {
        self.loop_enabled = loop_enabled;
    }

    /// 前进到下一个索引
    ///
    /// 位于末尾时：循环模式回到 0，否则保持不动。
    pub fn advance(&mut self) -> Option<IndexChange> {
        let next = if self.index + 1 == self.len {
            if self.loop_enabled { 0 } else { self.index }
        } else {
            self.index + 1
        };
        self.move_to(next)
    }

    /// 后退到上一个索引
    ///
    /// 位于开头时：循环模式跳到末尾，否则保持不动。
    pub fn retreat(&mut self) -> Option<IndexChange> {
        let previous = if self.index == 0 {
            if self.loop_enabled {
                self.len - 1
            } else {
                self.index
            }
        } else {
            self.index - 1
        };
        self.move_to(previous)
    }

    /// 跳转到指定索引，结果为 `max(0, min(index, len - 1))`
    pub fn jump_to(&mut self, index: i64) -> Option<IndexChange> {
        let last = (self.len - 1) as i64;
        self.move_to(index.clamp(0, last) as usize)
    }

    /// 回到索引 0
    pub fn reset(&mut self) -> Option<IndexChange> {
        self.move_to(0)
    }

    /// 执行导航命令
    pub fn apply(&mut self, command: RotationCommand) -> Option<IndexChange> {
        match command {
            RotationCommand::Next => self.advance(),
            RotationCommand::Previous => self.retreat(),
            RotationCommand::JumpTo { index } => self.jump_to(index),
            RotationCommand::Reset => self.reset(),
        }
    }

    fn move_to(&mut self, to: usize) -> Option<IndexChange> {
        if to == self.index {
            return None;
        }
        let from = self.index;
        self.index = to;
        Some(IndexChange { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        assert_eq!(RotationState::new(0, true), Err(MotionError::EmptyCaptions));
    }

    #[test]
    fn test_advance_wraps_when_looping() {
        let mut state = RotationState::new(3, true).unwrap();
        for _ in 0..3 {
            assert!(state.advance().is_some());
        }
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_advance_holds_without_loop() {
        let mut state = RotationState::new(2, false).unwrap();
        assert_eq!(state.advance(), Some(IndexChange { from: 0, to: 1 }));
        assert_eq!(state.advance(), None);
        assert_eq!(state.index(), 1);
    }

    #[test]
    fn test_retreat() {
        let mut state = RotationState::new(3, true).unwrap();
        assert_eq!(state.retreat(), Some(IndexChange { from: 0, to: 2 }));
        assert_eq!(state.retreat(), Some(IndexChange { from: 2, to: 1 }));

        state.set_loop(false);
        state.retreat();
        assert_eq!(state.retreat(), None);
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_single_caption_never_changes() {
        for loop_enabled in [true, false] {
            let mut state = RotationState::new(1, loop_enabled).unwrap();
            assert_eq!(state.advance(), None);
            assert_eq!(state.retreat(), None);
            assert_eq!(state.index(), 0);
        }
    }

    #[test]
    fn test_jump_to_clamps() {
        let mut state = RotationState::new(4, true).unwrap();
        let cases = [
            (-5, 0),
            (0, 0),
            (2, 2),
            (3, 3),
            (99, 3),
            (i64::MAX, 3),
            (i64::MIN, 0),
        ];
        for (input, expected) in cases {
            state.jump_to(input);
            assert_eq!(state.index(), expected, "jump_to({input})");
        }
    }

    #[test]
    fn test_reset() {
        let mut state = RotationState::new(3, true).unwrap();
        assert_eq!(state.reset(), None);
        state.jump_to(2);
        assert_eq!(state.reset(), Some(IndexChange { from: 2, to: 0 }));
    }

    #[test]
    fn test_apply_command() {
        let mut state = RotationState::new(3, true).unwrap();
        state.apply(RotationCommand::JumpTo { index: 2 });
        state.apply(RotationCommand::Next);
        assert_eq!(state.index(), 0);
        state.apply(RotationCommand::Previous);
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn test_command_serialization() {
        let json = serde_json::to_string(&RotationCommand::JumpTo { index: 3 }).unwrap();
        assert_eq!(json, r#"{"jump_to":{"index":3}}"#);
        let parsed: RotationCommand = serde_json::from_str(r#""next""#).unwrap();
        assert_eq!(parsed, RotationCommand::Next);
    }
}
