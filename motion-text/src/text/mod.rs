//! # Text 模块
//!
//! 标题文本的切分与显示单元模型。

pub mod split;

pub use split::{DisplayUnit, SplitBy, SplitCaption, UnitGroup, split_caption};
