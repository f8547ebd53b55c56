//! # Autoplay 模块
//!
//! 宿主驱动的自动轮播计时器。
//!
//! 计时器不持有任何系统定时资源，宿主每帧调用 `tick(dt)`。
//! 一次 `tick` 最多触发一次，超出的时间直接丢弃，不会补发。

use std::time::Duration;

/// 自动轮播计时器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayTimer {
    interval: Duration,
    elapsed: Duration,
    enabled: bool,
}

impl AutoplayTimer {
    pub fn new(interval: Duration, enabled: bool) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 启用或停用，两种情况都会清空已累计的时间
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.elapsed = Duration::ZERO;
    }

    /// 取消挂起的触发
    pub fn cancel(&mut self) {
        self.set_enabled(false);
    }

    /// 重新开始计时
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// 距离下次触发的剩余时间，停用时为 None
    pub fn remaining(&self) -> Option<Duration> {
        self.enabled
            .then(|| self.interval.saturating_sub(self.elapsed))
    }

    /// 推进计时，返回本次是否触发
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.enabled || self.interval.is_zero() {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }
}
