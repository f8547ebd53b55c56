//! # Geometry 模块
//!
//! 容器局部坐标系下的点、矩形，以及注入式布局能力 [`LayoutProvider`]。
//!
//! 压感计算只依赖 `LayoutProvider` 返回的字形包围盒，不关心具体的渲染表面。

use serde::{Deserialize, Serialize};

/// 容器局部坐标中的点
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 欧氏距离
    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// 轴对齐矩形
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 中心点
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// 宽或高为零（尚未布局）
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// 布局能力
///
/// 由宿主实现，返回当前布局下容器与每个字形的包围盒（容器局部坐标）。
pub trait LayoutProvider {
    /// 容器包围盒
    fn container(&self) -> Rect;

    /// 每个字形的包围盒，顺序与 `glyphs` 一致
    ///
    /// 返回数量与 `glyphs` 不一致时视为布局不可用。
    fn glyph_rects(&self, glyphs: &[&str]) -> Vec<Rect>;
}

/// 等宽网格布局
///
/// 每个字形占据固定的 `advance` 宽度，遇到换行符另起一行。
/// 适用于终端宿主和测试。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceLayout {
    pub container: Rect,
    pub advance: f32,
    pub line_height: f32,
}

impl MonospaceLayout {
    pub fn new(container: Rect, advance: f32, line_height: f32) -> Self {
        Self {
            container,
            advance,
            line_height,
        }
    }
}

impl LayoutProvider for MonospaceLayout {
    fn container(&self) -> Rect {
        self.container
    }

    fn glyph_rects(&self, glyphs: &[&str]) -> Vec<Rect> {
        let mut column = 0usize;
        let mut row = 0usize;
        let mut rects = Vec::with_capacity(glyphs.len());

        for glyph in glyphs {
            rects.push(Rect::new(
                column as f32 * self.advance,
                row as f32 * self.line_height,
                self.advance,
                self.line_height,
            ));
            if *glyph == "\n" || *glyph == "\r\n" {
                column = 0;
                row += 1;
            } else {
                column += 1;
            }
        }
        rects
    }
}
