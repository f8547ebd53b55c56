//! # Falloff 模块
//!
//! 将字形到指针的距离映射为强调系数 `t ∈ [0, 1]`。

use serde::{Deserialize, Serialize};

/// 衰减曲线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Falloff {
    /// `t = 1 - d / r`
    #[default]
    Linear,
    /// `t = exp(-d² / (2σ²))`，σ = r / 2
    Gaussian,
}

impl Falloff {
    /// 计算强调系数
    ///
    /// 距离超过半径时一律为 0。半径非正时只有距离为 0 的字形得到 1。
    pub fn factor(&self, distance: f32, radius: f32) -> f32 {
        if !distance.is_finite() {
            return 0.0;
        }
        let distance = distance.max(0.0);
        if radius <= 0.0 || !radius.is_finite() {
            return if distance == 0.0 { 1.0 } else { 0.0 };
        }
        if distance > radius {
            return 0.0;
        }

        let t = match self {
            Falloff::Linear => 1.0 - distance / radius,
            Falloff::Gaussian => {
                let sigma = radius / 2.0;
                (-(distance * distance) / (2.0 * sigma * sigma)).exp()
            }
        };
        t.clamp(0.0, 1.0)
    }
}
