//! # Easing 模块
//!
//! 缓动函数，用于显示单元进场/退场动画的时间插值。

use std::f32::consts::PI;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// 线性（匀速）
    Linear,
    /// 三次缓入
    EaseIn,
    /// 三次缓出
    #[default]
    EaseOut,
    /// 三次缓入缓出
    EaseInOut,
    /// 二次缓出
    EaseOutQuad,
    /// 正弦缓入缓出
    EaseInOutSine,
    /// 弹性缓出（会短暂超过 1.0）
    EaseOutElastic,
    /// 弹跳缓出
    EaseOutBounce,
}

impl Easing {
    /// 计算缓动值
    ///
    /// `t` 会先被限制在 0.0 - 1.0 之间。
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::EaseOutElastic => ease_out_elastic(t),
            Easing::EaseOutBounce => ease_out_bounce(t),
        }
    }

    /// 按经过时间采样带延迟的动画进度
    ///
    /// 延迟期内返回 0.0，结束后返回 1.0。`duration` 为零时视为瞬间完成。
    pub fn sample(&self, elapsed: Duration, delay: Duration, duration: Duration) -> f32 {
        let Some(local) = elapsed.checked_sub(delay) else {
            return 0.0;
        };
        if duration.is_zero() {
            return 1.0;
        }
        self.apply(local.as_secs_f32() / duration.as_secs_f32())
    }
}

fn ease_out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        let c4 = (2.0 * PI) / 3.0;
        2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
    }
}

fn ease_out_bounce(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}
