//! # Mapper 模块
//!
//! 压感映射器：根据指针与每个字形中心的距离，为字形计算强调系数与样式轴取值。
//!
//! ## 生命周期
//!
//! ```text
//! new(label)        -> 切分字素，位置缓存为空
//! relayout(layout)  -> 容器尺寸或文本变化时重算字形中心
//! pointer_moved(p)  -> 记录最新指针
//! frame()           -> 每帧输出样式（启用平滑时先推进跟踪点）
//! dispose()         -> 释放缓存
//! ```
//!
//! 容器尚未布局（宽或高为零）时，所有字形保持基础样式。

use serde::Serialize;
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

use super::geometry::{LayoutProvider, Point, Rect};
use super::pointer::PointerSmoother;
use crate::config::PressureConfig;
use crate::error::MotionResult;

/// 单个字形的样式
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphStyle {
    pub grapheme: String,
    /// 强调系数
    pub t: f32,
    pub weight: Option<f32>,
    pub width: Option<f32>,
    pub slant: Option<f32>,
    pub alpha: Option<f32>,
}

/// 压感映射器
#[derive(Debug, Clone)]
pub struct ProximityMapper {
    config: PressureConfig,
    label: String,
    glyphs: Vec<String>,
    container: Rect,
    /// 字形中心缓存，None 表示布局不可用
    centers: Option<Vec<Point>>,
    smoother: PointerSmoother,
}

impl ProximityMapper {
    /// 创建映射器
    pub fn new(label: impl Into<String>, config: PressureConfig) -> MotionResult<Self> {
        config.validate()?;
        let label = label.into();
        let smoother = PointerSmoother::new(config.smoothing.unwrap_or(1.0));
        Ok(Self {
            glyphs: graphemes(&label),
            label,
            config,
            container: Rect::default(),
            centers: None,
            smoother,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    pub fn config(&self) -> &PressureConfig {
        &self.config
    }

    /// 替换文本，位置缓存失效，需要重新 `relayout`
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.glyphs = graphemes(&self.label);
        self.centers = None;
    }

    /// 位置缓存是否可用
    pub fn is_laid_out(&self) -> bool {
        self.centers.is_some() && !self.container.is_empty()
    }

    /// 根据当前布局重算字形中心
    pub fn relayout<L: LayoutProvider + ?Sized>(&mut self, layout: &L) {
        self.container = layout.container();
        if self.glyphs.is_empty() {
            self.centers = Some(Vec::new());
            return;
        }

        let glyphs: Vec<&str> = self.glyphs.iter().map(String::as_str).collect();
        let rects = layout.glyph_rects(&glyphs);
        if rects.len() != glyphs.len() {
            warn!(
                expected = glyphs.len(),
                actual = rects.len(),
                "字形包围盒数量不匹配，使用基础样式"
            );
            self.centers = None;
            return;
        }

        if self.container.is_empty() {
            debug!("容器尚未布局，使用基础样式");
        }
        self.centers = Some(rects.iter().map(Rect::center).collect());
    }

    /// 当前生效的影响半径
    pub fn radius(&self) -> f32 {
        self.config
            .radius
            .unwrap_or(self.container.width / 2.0)
    }

    /// 计算每个字形的强调系数
    ///
    /// 纯函数：只依赖指针位置与位置缓存。
    pub fn emphasis(&self, pointer: Point) -> Vec<f32> {
        let centers = match &self.centers {
            Some(centers) if !self.container.is_empty() => centers,
            _ => return vec![0.0; self.glyphs.len()],
        };

        let radius = self.radius();
        centers
            .iter()
            .map(|center| self.config.falloff.factor(pointer.distance(*center), radius))
            .collect()
    }

    /// 计算每个字形的样式
    pub fn styles(&self, pointer: Point) -> Vec<GlyphStyle> {
        let emphasis = self.emphasis(pointer);
        self.glyphs
            .iter()
            .zip(emphasis)
            .map(|(grapheme, t)| self.style_for(grapheme, t))
            .collect()
    }

    /// 所有字形的基础样式
    pub fn base_styles(&self) -> Vec<GlyphStyle> {
        self.glyphs
            .iter()
            .map(|grapheme| self.style_for(grapheme, 0.0))
            .collect()
    }

    /// 记录最新的指针位置
    pub fn pointer_moved(&mut self, pointer: Point) {
        self.smoother.set_target(pointer);
    }

    /// 指针离开容器
    pub fn pointer_left(&mut self) {
        self.smoother.clear();
    }

    /// 推进一帧并输出样式
    ///
    /// 还没有任何指针采样时输出基础样式。
    pub fn frame(&mut self) -> Vec<GlyphStyle> {
        match self.smoother.step() {
            Some(pointer) => self.styles(pointer),
            None => self.base_styles(),
        }
    }

    /// 当前跟踪的指针位置
    pub fn tracked_pointer(&self) -> Option<Point> {
        self.smoother.current()
    }

    /// 销毁映射器
    pub fn dispose(self) {
        debug!(label = %self.label, "压感映射器已销毁");
    }

    fn style_for(&self, grapheme: &str, t: f32) -> GlyphStyle {
        let axes = &self.config.axes;
        GlyphStyle {
            grapheme: grapheme.to_owned(),
            t,
            weight: axes.weight.map(|a| a.lerp(t)),
            width: axes.width.map(|a| a.lerp(t)),
            slant: axes.slant.map(|a| a.lerp(t)),
            alpha: axes.alpha.map(|a| a.lerp(t)),
        }
    }
}

fn graphemes(label: &str) -> Vec<String> {
    label.graphemes(true).map(str::to_owned).collect()
}
