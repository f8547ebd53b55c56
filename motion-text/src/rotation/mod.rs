//! # Rotation 模块
//!
//! 轮播文本：索引状态、自动轮播计时、切换动画与组件本体。
//!
//! ## 模块结构
//!
//! - [`state`]：索引状态与导航命令
//! - [`autoplay`]：宿主驱动的计时器
//! - [`transition`]：先退后进的切换动画
//! - [`observer`]：索引变化通知
//! - [`presenter`]：组件本体 [`CyclingText`]

pub mod autoplay;
pub mod observer;
pub mod presenter;
pub mod state;
pub mod transition;

pub use autoplay::AutoplayTimer;
pub use observer::{ObserverId, RotationObserver};
pub use presenter::{CyclingText, RotationEvent};
pub use state::{IndexChange, RotationCommand, RotationState};
pub use transition::{CaptionFrame, StagedCaption, Transition, UnitFrame, UnitPhase};
