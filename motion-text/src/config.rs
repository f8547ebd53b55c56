//! # Config 模块
//!
//! 两个组件的配置记录。所有字段都有默认值，可以从 JSON 局部覆盖。
//!
//! ```json
//! {
//!   "rotation_interval_ms": 2500,
//!   "split_by": "words",
//!   "stagger_from": "center"
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{MotionError, MotionResult};
use crate::proximity::{Falloff, PressureAxes};
use crate::stagger::StaggerFrom;
use crate::text::SplitBy;

/// 轮播文本配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotatorConfig {
    /// 自动轮播间隔（毫秒）
    #[serde(default = "default_rotation_interval_ms")]
    pub rotation_interval_ms: u64,

    /// 切分粒度
    #[serde(default)]
    pub split_by: SplitBy,

    /// 错峰起点
    #[serde(default)]
    pub stagger_from: StaggerFrom,

    /// 相邻单元之间的错峰间隔（毫秒）
    #[serde(default = "default_stagger_duration_ms")]
    pub stagger_duration_ms: u64,

    /// 单个单元进场/退场动画时长（毫秒）
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    /// 进场/退场缓动
    #[serde(default)]
    pub easing: Easing,

    /// 到达末尾后是否回到开头
    #[serde(default = "default_true")]
    pub loop_enabled: bool,

    /// 是否自动轮播
    #[serde(default = "default_true")]
    pub autoplay: bool,

    /// 首次挂载时是否播放进场动画
    #[serde(default = "default_true")]
    pub initial_animation: bool,

    /// 随机错峰的种子（为空时使用系统随机源）
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RotatorConfig {
    pub fn rotation_interval(&self) -> Duration {
        Duration::from_millis(self.rotation_interval_ms)
    }

    pub fn stagger_step(&self) -> Duration {
        Duration::from_millis(self.stagger_duration_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> MotionResult<()> {
        if self.autoplay && self.rotation_interval_ms == 0 {
            return Err(MotionError::invalid_config(
                "rotation_interval_ms",
                "自动轮播时间隔必须大于 0",
            ));
        }
        Ok(())
    }
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            rotation_interval_ms: default_rotation_interval_ms(),
            split_by: SplitBy::default(),
            stagger_from: StaggerFrom::default(),
            stagger_duration_ms: default_stagger_duration_ms(),
            transition_ms: default_transition_ms(),
            easing: Easing::default(),
            loop_enabled: true,
            autoplay: true,
            initial_animation: true,
            seed: None,
        }
    }
}

/// 压感文本配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PressureConfig {
    /// 影响半径（像素）
    ///
    /// 为空时取容器宽度的一半。
    #[serde(default)]
    pub radius: Option<f32>,

    /// 衰减曲线
    #[serde(default)]
    pub falloff: Falloff,

    /// 样式轴
    #[serde(default)]
    pub axes: PressureAxes,

    /// 指针平滑系数（每帧向目标靠近的比例）
    ///
    /// 为空时直接使用最新的指针位置。
    #[serde(default)]
    pub smoothing: Option<f32>,
}

impl PressureConfig {
    /// 验证配置有效性
    pub fn validate(&self) -> MotionResult<()> {
        if let Some(radius) = self.radius
            && !(radius.is_finite() && radius > 0.0)
        {
            return Err(MotionError::invalid_config("radius", "半径必须是正数"));
        }

        if let Some(smoothing) = self.smoothing
            && !(smoothing > 0.0 && smoothing <= 1.0)
        {
            return Err(MotionError::invalid_config(
                "smoothing",
                "平滑系数必须在 (0.0, 1.0] 之间",
            ));
        }

        self.axes.validate()
    }
}

// 默认值函数
fn default_rotation_interval_ms() -> u64 {
    2000
}

fn default_stagger_duration_ms() -> u64 {
    25
}

fn default_transition_ms() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rotator_config() {
        let config = RotatorConfig::default();
        assert_eq!(config.rotation_interval(), Duration::from_secs(2));
        assert_eq!(config.split_by, SplitBy::Characters);
        assert!(config.loop_enabled);
        assert!(config.autoplay);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RotatorConfig =
            serde_json::from_str(r#"{ "split_by": "words", "loop_enabled": false }"#).unwrap();
        assert_eq!(config.split_by, SplitBy::Words);
        assert!(!config.loop_enabled);
        assert_eq!(config.rotation_interval_ms, 2000);
        assert_eq!(config.stagger_duration_ms, 25);
    }

    #[test]
    fn test_rotator_validation() {
        let mut config = RotatorConfig {
            rotation_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // 手动驱动时间隔不参与计算
        config.autoplay = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pressure_validation() {
        let mut config = PressureConfig::default();
        assert!(config.validate().is_ok());

        config.radius = Some(0.0);
        assert!(config.validate().is_err());
        config.radius = Some(30.0);

        config.smoothing = Some(1.5);
        assert!(config.validate().is_err());
        config.smoothing = Some(1.0 / 15.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pressure_config_serialization() {
        let config = PressureConfig {
            radius: Some(30.0),
            falloff: Falloff::Gaussian,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let loaded: PressureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }
}
