//! # Proximity 模块
//!
//! 压感文本：指针靠近时字形逐渐加粗/变宽，远离时回到基础样式。
//!
//! ## 模块结构
//!
//! - [`geometry`]：点、矩形与注入式布局能力
//! - [`falloff`]：距离到强调系数的衰减曲线
//! - [`axes`]：可变字体样式轴
//! - [`pointer`]：指针平滑
//! - [`mapper`]：压感映射器

pub mod axes;
pub mod falloff;
pub mod geometry;
pub mod mapper;
pub mod pointer;

pub use axes::{PressureAxes, StyleAxis};
pub use falloff::Falloff;
pub use geometry::{LayoutProvider, MonospaceLayout, Point, Rect};
pub use mapper::{GlyphStyle, ProximityMapper};
pub use pointer::PointerSmoother;
