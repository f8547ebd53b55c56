//! # Stagger 模块
//!
//! 错峰延迟计算：每个显示单元的动画起始时间由其在当前标题中的位置决定。
//!
//! ```text
//! First     -> index * step
//! Last      -> (total - 1 - index) * step
//! Center    -> |total / 2 - index| * step
//! Index(i)  -> |i - index| * step
//! Random    -> |origin - index| * step，origin 每次渲染重新随机
//! ```

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 错峰起点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerFrom {
    /// 从第一个单元开始
    #[default]
    First,
    /// 从最后一个单元开始
    Last,
    /// 从中间向两侧扩散
    Center,
    /// 从随机位置向两侧扩散
    Random,
    /// 从指定位置向两侧扩散
    Index(usize),
}

/// 计算单元的错峰延迟
///
/// `Random` 在此函数中没有随机源，按 `First` 处理；需要随机起点时使用 [`StaggerPlan`]。
pub fn stagger_delay(index: usize, total: usize, from: StaggerFrom, step: Duration) -> Duration {
    if total == 0 {
        return Duration::ZERO;
    }
    let origin = match from {
        StaggerFrom::First | StaggerFrom::Random => 0,
        StaggerFrom::Last => total - 1,
        StaggerFrom::Center => total / 2,
        StaggerFrom::Index(i) => i,
    };
    step * origin.abs_diff(index) as u32
}

/// 单次渲染的错峰计划
///
/// 随机起点在构造时确定，整个渲染期间保持不变。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggerPlan {
    total: usize,
    from: StaggerFrom,
    step: Duration,
}

impl StaggerPlan {
    /// 创建错峰计划
    pub fn new<R: Rng + ?Sized>(
        total: usize,
        from: StaggerFrom,
        step: Duration,
        rng: &mut R,
    ) -> Self {
        let from = match from {
            StaggerFrom::Random if total > 0 => StaggerFrom::Index(rng.random_range(0..total)),
            other => other,
        };
        Self { total, from, step }
    }

    /// 单元总数
    pub fn total(&self) -> usize {
        self.total
    }

    /// 解析后的起点（`Random` 已替换为具体位置）
    pub fn origin(&self) -> StaggerFrom {
        self.from
    }

    /// 指定单元的延迟
    pub fn delay(&self, index: usize) -> Duration {
        stagger_delay(index, self.total, self.from, self.step)
    }

    /// 所有单元中最大的延迟
    pub fn max_delay(&self) -> Duration {
        (0..self.total)
            .map(|i| self.delay(i))
            .max()
            .unwrap_or(Duration::ZERO)
    }
}
