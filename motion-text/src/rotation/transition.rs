//! # Transition 模块
//!
//! 标题切换动画。采用"先退后进"模式：旧标题的单元全部错峰退场后，
//! 新标题的单元再错峰进场。
//!
//! ```text
//! 0 ─── exit_span ─────────── exit_span + enter_span
//! │  旧单元 Exiting  │  新单元 Entering  │ Settled
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::stagger::StaggerPlan;
use crate::text::SplitCaption;

/// 单元所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitPhase {
    Entering,
    Exiting,
    Settled,
}

/// 单元的一帧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitFrame {
    pub text: String,
    /// 单元前的原始空白（只出现在首个单元）
    pub leading: String,
    /// 单元后的原始分隔文本
    pub trailing: String,
    pub trailing_space: bool,
    pub phase: UnitPhase,
    /// 当前阶段的缓动进度
    pub progress: f32,
}

impl UnitFrame {
    /// 可见程度：进场时随进度增加，退场时随进度减少
    pub fn visibility(&self) -> f32 {
        match self.phase {
            UnitPhase::Entering => self.progress,
            UnitPhase::Exiting => 1.0 - self.progress,
            UnitPhase::Settled => 1.0,
        }
    }
}

/// 标题的一帧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionFrame {
    /// 当前帧显示的标题索引
    pub index: usize,
    pub units: Vec<UnitFrame>,
}

impl CaptionFrame {
    /// 所有单元都已就位
    pub fn is_settled(&self) -> bool {
        self.units.iter().all(|u| u.phase == UnitPhase::Settled)
    }
}

/// 带错峰计划的标题
#[derive(Debug, Clone, PartialEq)]
pub struct StagedCaption {
    pub index: usize,
    pub split: SplitCaption,
    pub plan: StaggerPlan,
}

impl StagedCaption {
    /// 全部单元完成动画所需时间
    fn span(&self, duration: Duration) -> Duration {
        if self.plan.total() == 0 {
            return Duration::ZERO;
        }
        self.plan.max_delay() + duration
    }

    fn frame(&self, phase: UnitPhase, progress: impl Fn(usize) -> f32) -> CaptionFrame {
        let units = self
            .split
            .units()
            .into_iter()
            .enumerate()
            .map(|(i, unit)| UnitFrame {
                text: unit.text,
                leading: unit.leading,
                trailing: unit.trailing,
                trailing_space: unit.trailing_space,
                phase,
                progress: progress(i),
            })
            .collect();
        CaptionFrame {
            index: self.index,
            units,
        }
    }

    /// 静止帧
    pub fn settled_frame(&self) -> CaptionFrame {
        self.frame(UnitPhase::Settled, |_| 1.0)
    }
}

/// 一次标题切换
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    exiting: Option<StagedCaption>,
    entering: StagedCaption,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
}

impl Transition {
    pub fn new(
        exiting: Option<StagedCaption>,
        entering: StagedCaption,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            exiting,
            entering,
            duration,
            easing,
            elapsed: Duration::ZERO,
        }
    }

    pub fn entering(&self) -> &StagedCaption {
        &self.entering
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn exit_span(&self) -> Duration {
        self.exiting
            .as_ref()
            .map(|caption| caption.span(self.duration))
            .unwrap_or(Duration::ZERO)
    }

    /// 整个切换的总时长
    pub fn total_span(&self) -> Duration {
        self.exit_span() + self.entering.span(self.duration)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_span()
    }

    /// 采样当前帧
    pub fn frame(&self) -> CaptionFrame {
        let exit_span = self.exit_span();

        if let Some(exiting) = &self.exiting
            && self.elapsed < exit_span
        {
            return exiting.frame(UnitPhase::Exiting, |i| {
                self.easing
                    .sample(self.elapsed, exiting.plan.delay(i), self.duration)
            });
        }

        if self.is_finished() {
            return self.entering.settled_frame();
        }

        let local = self.elapsed - exit_span;
        self.entering.frame(UnitPhase::Entering, |i| {
            self.easing
                .sample(local, self.entering.plan.delay(i), self.duration)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stagger::StaggerFrom;
    use crate::text::{SplitBy, split_caption};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const STEP: Duration = Duration::from_millis(10);
    const DURATION: Duration = Duration::from_millis(100);

    fn staged(index: usize, caption: &str) -> StagedCaption {
        let split = split_caption(caption, &SplitBy::Characters);
        let mut rng = StdRng::seed_from_u64(0);
        let plan = StaggerPlan::new(split.unit_count(), StaggerFrom::First, STEP, &mut rng);
        StagedCaption { index, split, plan }
    }

    #[test]
    fn test_exit_then_enter() {
        let mut transition = Transition::new(
            Some(staged(0, "ab")),
            staged(1, "xyz"),
            DURATION,
            Easing::Linear,
        );
        // 退场 10 + 100，进场 20 + 100
        assert_eq!(transition.total_span(), Duration::from_millis(230));

        let frame = transition.frame();
        assert_eq!(frame.index, 0);
        assert!(frame.units.iter().all(|u| u.phase == UnitPhase::Exiting));
        assert_eq!(frame.units[0].visibility(), 1.0);

        transition.advance(Duration::from_millis(60));
        let frame = transition.frame();
        assert!((frame.units[0].progress - 0.6).abs() < 1e-6);
        assert!((frame.units[1].progress - 0.5).abs() < 1e-6);

        transition.advance(Duration::from_millis(60));
        let frame = transition.frame();
        assert_eq!(frame.index, 1);
        assert!(frame.units.iter().all(|u| u.phase == UnitPhase::Entering));
        assert!((frame.units[0].progress - 0.1).abs() < 1e-6);
        assert_eq!(frame.units[2].progress, 0.0);

        transition.advance(Duration::from_millis(200));
        assert!(transition.is_finished());
        assert!(transition.frame().is_settled());
    }

    #[test]
    fn test_initial_enter_only() {
        let mut transition = Transition::new(None, staged(0, "hi"), DURATION, Easing::EaseOut);
        assert_eq!(transition.total_span(), Duration::from_millis(110));
        assert_eq!(transition.frame().units[0].phase, UnitPhase::Entering);

        transition.advance(Duration::from_millis(110));
        assert!(transition.frame().is_settled());
    }

    #[test]
    fn test_empty_captions_finish_immediately() {
        let transition = Transition::new(
            Some(staged(0, "")),
            staged(1, ""),
            DURATION,
            Easing::Linear,
        );
        assert!(transition.is_finished());
        assert!(transition.frame().units.is_empty());
    }
}
