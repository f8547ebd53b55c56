//! # Motion Text
//!
//! 动态文本组件的核心逻辑库。
//!
//! ## 架构概述
//!
//! `motion-text` 是纯逻辑核心，不依赖任何 IO、计时器或渲染表面。
//! 宿主（Host）负责推进时间、提供布局几何并把输出画出来：
//!
//! ```text
//! Host                              motion-text
//!   │                                    │
//!   │──── update(dt) / next() ─────────►│ CyclingText
//!   │◄─── RotationEvent / CaptionFrame ──│
//!   │                                    │
//!   │──── relayout(layout) ────────────►│ ProximityMapper
//!   │──── pointer_moved(p) ────────────►│
//!   │◄─── Vec<GlyphStyle> ───────────────│
//! ```
//!
//! ## 核心类型
//!
//! - [`CyclingText`]：轮播文本组件
//! - [`ProximityMapper`]：压感文本映射器
//! - [`RotatorConfig`] / [`PressureConfig`]：组件配置
//! - [`LayoutProvider`]：宿主注入的布局能力
//!
//! ## 使用示例
//!
//! ```ignore
//! use motion_text::{CyclingText, RotatorConfig};
//!
//! let mut text = CyclingText::new(["Rust", "Systems", "Tools"], RotatorConfig::default())?;
//! text.on_next(|index| println!("now showing {index}"));
//!
//! loop {
//!     for event in text.update(frame_dt) {
//!         // ...
//!     }
//!     draw(text.frame());
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`text`]：标题切分
//! - [`stagger`]：错峰延迟
//! - [`easing`]：缓动函数
//! - [`rotation`]：轮播文本
//! - [`proximity`]：压感文本
//! - [`config`]：配置记录
//! - [`error`]：错误类型定义

pub mod config;
pub mod easing;
pub mod error;
pub mod proximity;
pub mod rotation;
pub mod stagger;
pub mod text;

// 重导出核心类型
pub use config::{PressureConfig, RotatorConfig};
pub use easing::Easing;
pub use error::{MotionError, MotionResult};
pub use proximity::{
    Falloff, GlyphStyle, LayoutProvider, MonospaceLayout, Point, PointerSmoother, PressureAxes,
    ProximityMapper, Rect, StyleAxis,
};
pub use rotation::{
    CaptionFrame, CyclingText, IndexChange, ObserverId, RotationCommand, RotationEvent,
    RotationObserver, RotationState, UnitFrame, UnitPhase,
};
pub use stagger::{StaggerFrom, StaggerPlan, stagger_delay};
pub use text::{DisplayUnit, SplitBy, SplitCaption, UnitGroup, split_caption};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证所有公共类型都可以正常使用
        let _split = split_caption("Hello", &SplitBy::Characters);

        let _command = RotationCommand::JumpTo { index: 1 };

        let _point = Point::new(1.0, 2.0);

        let _config = (RotatorConfig::default(), PressureConfig::default());
    }
}
