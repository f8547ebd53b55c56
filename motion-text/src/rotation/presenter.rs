//! # Presenter 模块
//!
//! 轮播文本组件：一次显示一个标题，按计时器或外部命令切换，
//! 切换时每个显示单元错峰退场/进场。
//!
//! ## 驱动模型
//!
//! ```text
//! Host                          CyclingText
//!   │── update(dt) ───────────────►│ 推进计时器与切换动画
//!   │◄── Vec<RotationEvent> ───────│
//!   │── next()/previous()/... ────►│ 手动导航
//!   │── frame() ──────────────────►│ 采样当前帧用于渲染
//!   │── dispose() ────────────────►│ 取消计时器、移除观察者
//! ```
//!
//! 组件不持有系统定时器，`dispose` 消耗实例，之后不可能再触发任何回调。

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::autoplay::AutoplayTimer;
use super::observer::{ObserverId, ObserverList, RotationObserver};
use super::state::{IndexChange, RotationCommand, RotationState};
use super::transition::{CaptionFrame, StagedCaption, Transition};
use crate::config::RotatorConfig;
use crate::error::MotionResult;
use crate::stagger::StaggerPlan;
use crate::text::{SplitCaption, split_caption};

/// `update` 产生的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationEvent {
    /// 计时器触发的切换
    IndexChanged(IndexChange),
    /// 切换动画播放完毕
    TransitionFinished { index: usize },
}

/// 轮播文本组件
#[derive(Debug)]
pub struct CyclingText {
    captions: Vec<String>,
    config: RotatorConfig,
    state: RotationState,
    timer: AutoplayTimer,
    displayed: StagedCaption,
    transition: Option<Transition>,
    observers: ObserverList,
    rng: StdRng,
}

impl CyclingText {
    /// 创建组件
    ///
    /// 标题列表为空或配置无效时返回错误。
    pub fn new<I, S>(captions: I, config: RotatorConfig) -> MotionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;
        let captions: Vec<String> = captions.into_iter().map(Into::into).collect();
        let state = RotationState::new(captions.len(), config.loop_enabled)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let displayed = stage(&captions, 0, &config, &mut rng);
        let transition = config.initial_animation.then(|| {
            Transition::new(None, displayed.clone(), config.transition(), config.easing)
        });
        let timer = AutoplayTimer::new(config.rotation_interval(), config.autoplay);

        debug!(
            captions = captions.len(),
            autoplay = config.autoplay,
            "轮播文本已挂载"
        );

        Ok(Self {
            captions,
            config,
            state,
            timer,
            displayed,
            transition,
            observers: ObserverList::default(),
            rng,
        })
    }

    pub fn captions(&self) -> &[String] {
        &self.captions
    }

    pub fn config(&self) -> &RotatorConfig {
        &self.config
    }

    /// 当前索引
    pub fn current_index(&self) -> usize {
        self.state.index()
    }

    /// 当前标题文本
    pub fn current_caption(&self) -> &str {
        &self.captions[self.state.index()]
    }

    /// 当前标题的切分结果
    pub fn current_split(&self) -> &SplitCaption {
        &self.displayed.split
    }

    /// 当前标题的错峰计划（随机起点已确定）
    pub fn stagger_plan(&self) -> &StaggerPlan {
        &self.displayed.plan
    }

    /// 是否有切换动画在播放
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn autoplay(&self) -> bool {
        self.timer.is_enabled()
    }

    /// 开启或关闭自动轮播，关闭时取消挂起的触发
    pub fn set_autoplay(&mut self, enabled: bool) {
        self.config.autoplay = enabled;
        self.timer.set_enabled(enabled);
    }

    pub fn set_loop(&mut self, loop_enabled: bool) {
        self.config.loop_enabled = loop_enabled;
        self.state.set_loop(loop_enabled);
    }

    /// 距离下次自动切换的时间
    pub fn time_until_next(&self) -> Option<Duration> {
        self.timer.remaining()
    }

    /// 下一个标题
    pub fn next(&mut self) -> Option<IndexChange> {
        let change = self.state.advance();
        self.on_change(change)
    }

    /// 上一个标题
    pub fn previous(&mut self) -> Option<IndexChange> {
        let change = self.state.retreat();
        self.on_change(change)
    }

    /// 跳转到指定索引（越界时钳制）
    pub fn jump_to(&mut self, index: i64) -> Option<IndexChange> {
        let change = self.state.jump_to(index);
        self.on_change(change)
    }

    /// 回到第一个标题
    pub fn reset(&mut self) -> Option<IndexChange> {
        let change = self.state.reset();
        self.on_change(change)
    }

    /// 执行导航命令
    pub fn apply(&mut self, command: RotationCommand) -> Option<IndexChange> {
        let change = self.state.apply(command);
        self.on_change(change)
    }

    /// 注册回调，参数为切换后的新索引
    pub fn on_next(&mut self, callback: impl FnMut(usize) + 'static) -> ObserverId {
        self.observers.add(Box::new(callback))
    }

    /// 注册观察者
    pub fn subscribe(&mut self, observer: impl RotationObserver + 'static) -> ObserverId {
        self.observers.add(Box::new(observer))
    }

    /// 移除观察者
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// 推进时间
    ///
    /// 先推进正在播放的切换动画，再推进自动轮播计时器。
    pub fn update(&mut self, dt: Duration) -> Vec<RotationEvent> {
        let mut events = Vec::new();

        if let Some(transition) = &mut self.transition {
            transition.advance(dt);
            if transition.is_finished() {
                let index = transition.entering().index;
                self.transition = None;
                events.push(RotationEvent::TransitionFinished { index });
            }
        }

        if self.timer.tick(dt)
            && let Some(change) = self.next()
        {
            events.push(RotationEvent::IndexChanged(change));
        }

        events
    }

    /// 采样当前帧
    pub fn frame(&self) -> CaptionFrame {
        match &self.transition {
            Some(transition) => transition.frame(),
            None => self.displayed.settled_frame(),
        }
    }

    /// 销毁组件
    ///
    /// 取消计时器并移除所有观察者。
    pub fn dispose(mut self) {
        self.timer.cancel();
        self.observers.clear();
        self.transition = None;
        debug!(index = self.state.index(), "轮播文本已销毁");
    }

    fn on_change(&mut self, change: Option<IndexChange>) -> Option<IndexChange> {
        let change = change?;

        // 索引变化后重新计时
        self.timer.restart();

        let entering = stage(&self.captions, change.to, &self.config, &mut self.rng);
        let exiting = std::mem::replace(&mut self.displayed, entering.clone());
        self.transition = Some(Transition::new(
            Some(exiting),
            entering,
            self.config.transition(),
            self.config.easing,
        ));

        debug!(from = change.from, to = change.to, "切换标题");
        self.observers.notify(change);
        Some(change)
    }
}

fn stage(
    captions: &[String],
    index: usize,
    config: &RotatorConfig,
    rng: &mut StdRng,
) -> StagedCaption {
    let split = split_caption(&captions[index], &config.split_by);
    let plan = StaggerPlan::new(
        split.unit_count(),
        config.stagger_from,
        config.stagger_step(),
        rng,
    );
    StagedCaption { index, split, plan }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MotionError;
    use crate::rotation::transition::UnitPhase;
    use crate::stagger::StaggerFrom;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manual_config() -> RotatorConfig {
        RotatorConfig {
            autoplay: false,
            initial_animation: false,
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_captions_rejected() {
        let err = CyclingText::new(Vec::<String>::new(), RotatorConfig::default()).unwrap_err();
        assert_eq!(err, MotionError::EmptyCaptions);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RotatorConfig {
            rotation_interval_ms: 0,
            ..Default::default()
        };
        assert!(CyclingText::new(["a"], config).is_err());
    }

    #[test]
    fn test_a_bb_scenario() {
        let mut text = CyclingText::new(["A", "BB"], manual_config()).unwrap();
        assert_eq!(text.current_index(), 0);

        text.next();
        assert_eq!(text.current_index(), 1);
        assert_eq!(text.current_caption(), "BB");
        assert_eq!(text.current_split().unit_count(), 2);

        text.next();
        assert_eq!(text.current_index(), 0);
        assert_eq!(text.current_caption(), "A");
    }

    #[test]
    fn test_callback_for_manual_and_timer() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let config = RotatorConfig {
            autoplay: true,
            rotation_interval_ms: 1000,
            ..manual_config()
        };
        let mut text = CyclingText::new(["a", "b", "c"], config).unwrap();
        let sink = Rc::clone(&seen);
        text.on_next(move |index| sink.borrow_mut().push(index));

        text.jump_to(2);
        let events = text.update(Duration::from_millis(1000));
        assert!(events.contains(&RotationEvent::IndexChanged(IndexChange { from: 2, to: 0 })));
        text.previous();

        assert_eq!(*seen.borrow(), vec![2, 0, 2]);
    }

    #[test]
    fn test_single_caption_never_notifies() {
        let count = Rc::new(RefCell::new(0));
        let config = RotatorConfig {
            autoplay: true,
            rotation_interval_ms: 100,
            ..manual_config()
        };
        let mut text = CyclingText::new(["only"], config).unwrap();
        let sink = Rc::clone(&count);
        text.on_next(move |_| *sink.borrow_mut() += 1);

        assert_eq!(text.next(), None);
        assert_eq!(text.previous(), None);
        for _ in 0..5 {
            assert!(text.update(Duration::from_millis(100)).is_empty());
        }
        assert!(!text.is_animating());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_manual_change_restarts_timer() {
        let config = RotatorConfig {
            autoplay: true,
            rotation_interval_ms: 1000,
            ..manual_config()
        };
        let mut text = CyclingText::new(["a", "b", "c"], config).unwrap();
        text.update(Duration::from_millis(800));
        text.next();
        assert_eq!(text.time_until_next(), Some(Duration::from_millis(1000)));

        text.update(Duration::from_millis(800));
        assert_eq!(text.current_index(), 1);
    }

    #[test]
    fn test_disable_autoplay_cancels_timer() {
        let config = RotatorConfig {
            autoplay: true,
            rotation_interval_ms: 500,
            ..manual_config()
        };
        let mut text = CyclingText::new(["a", "b"], config).unwrap();
        text.update(Duration::from_millis(400));
        text.set_autoplay(false);
        assert_eq!(text.time_until_next(), None);

        text.update(Duration::from_secs(5));
        assert_eq!(text.current_index(), 0);
    }

    #[test]
    fn test_transition_frames() {
        let config = RotatorConfig {
            stagger_duration_ms: 0,
            transition_ms: 100,
            ..manual_config()
        };
        let mut text = CyclingText::new(["ab", "cd"], config).unwrap();
        assert!(text.frame().is_settled());

        text.next();
        assert!(text.is_animating());
        let frame = text.frame();
        assert_eq!(frame.index, 0);
        assert_eq!(frame.units[0].phase, UnitPhase::Exiting);

        text.update(Duration::from_millis(150));
        let frame = text.frame();
        assert_eq!(frame.index, 1);
        assert_eq!(frame.units[0].text, "c");
        assert_eq!(frame.units[0].phase, UnitPhase::Entering);

        let events = text.update(Duration::from_millis(50));
        assert_eq!(events, vec![RotationEvent::TransitionFinished { index: 1 }]);
        assert!(text.frame().is_settled());
    }

    #[test]
    fn test_initial_animation() {
        let config = RotatorConfig {
            initial_animation: true,
            ..manual_config()
        };
        let text = CyclingText::new(["hello"], config).unwrap();
        assert!(text.is_animating());
        assert_eq!(text.frame().units[0].phase, UnitPhase::Entering);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut text = CyclingText::new(["a", "b"], manual_config()).unwrap();
        let sink = Rc::clone(&count);
        let id = text.on_next(move |_| *sink.borrow_mut() += 1);

        text.next();
        assert!(text.unsubscribe(id));
        text.next();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_dispose_drops_observers() {
        let marker = Rc::new(());
        let mut text = CyclingText::new(["a", "b"], manual_config()).unwrap();
        let held = Rc::clone(&marker);
        text.on_next(move |_| {
            let _ = &held;
        });
        assert_eq!(Rc::strong_count(&marker), 2);

        text.dispose();
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_random_origin_rerolled_per_transition() {
        let config = RotatorConfig {
            stagger_from: StaggerFrom::Random,
            ..manual_config()
        };
        let captions = ["abcdefghijkl", "mnopqrstuvwx", "ABCDEFGHIJKL"];
        let mut text = CyclingText::new(captions, config).unwrap();

        let mut origins = Vec::new();
        for _ in 0..8 {
            text.next();
            let plan = text.stagger_plan();
            let StaggerFrom::Index(origin) = plan.origin() else {
                panic!("random origin should be resolved, got {:?}", plan.origin());
            };
            assert!(origin < plan.total());
            // 同一次渲染内起点不变
            assert_eq!(plan.delay(origin), Duration::ZERO);
            origins.push(origin);
        }

        origins.sort_unstable();
        origins.dedup();
        assert!(origins.len() > 1, "origin never changed: {origins:?}");
    }
}
