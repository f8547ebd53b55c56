//! # Axes 模块
//!
//! 可变字体样式轴。每个轴在 `base`（t = 0）与 `peak`（t = 1）之间线性插值。

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, MotionResult};

/// 单个样式轴
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleAxis {
    pub base: f32,
    pub peak: f32,
}

impl StyleAxis {
    pub const fn new(base: f32, peak: f32) -> Self {
        Self { base, peak }
    }

    /// 在 base 与 peak 之间插值
    pub fn lerp(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        self.base + (self.peak - self.base) * t
    }
}

/// 压感文本使用的样式轴集合
///
/// 为 `None` 的轴不参与插值，渲染时保持字体默认值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureAxes {
    /// 字重（wght）
    #[serde(default = "default_weight")]
    pub weight: Option<StyleAxis>,
    /// 字宽（wdth）
    #[serde(default = "default_width")]
    pub width: Option<StyleAxis>,
    /// 倾斜（ital）
    #[serde(default = "default_slant")]
    pub slant: Option<StyleAxis>,
    /// 不透明度
    #[serde(default)]
    pub alpha: Option<StyleAxis>,
}

impl PressureAxes {
    /// 只启用字重轴
    pub fn weight_only(base: f32, peak: f32) -> Self {
        Self {
            weight: Some(StyleAxis::new(base, peak)),
            width: None,
            slant: None,
            alpha: None,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        let axes = [
            ("axes.weight", self.weight),
            ("axes.width", self.width),
            ("axes.slant", self.slant),
            ("axes.alpha", self.alpha),
        ];
        for (field, axis) in axes {
            if let Some(axis) = axis
                && !(axis.base.is_finite() && axis.peak.is_finite())
            {
                return Err(MotionError::invalid_config(field, "base/peak 必须是有限数"));
            }
        }
        Ok(())
    }
}

impl Default for PressureAxes {
    fn default() -> Self {
        Self {
            weight: default_weight(),
            width: default_width(),
            slant: default_slant(),
            alpha: None,
        }
    }
}

fn default_weight() -> Option<StyleAxis> {
    Some(StyleAxis::new(100.0, 900.0))
}

fn default_width() -> Option<StyleAxis> {
    Some(StyleAxis::new(5.0, 200.0))
}

fn default_slant() -> Option<StyleAxis> {
    Some(StyleAxis::new(0.0, 1.0))
}
