//! # Driver 模块
//!
//! 驱动组件运行：推进时间、执行手动命令、把每一帧写到输出。
//!
//! ## 设计说明
//!
//! - [`RotationSession`] 与 [`PressureSweep`] 是同步的，时间由调用方传入，便于测试
//! - [`run_autoplay`] 用 tokio 单线程定时器按帧间隔推进会话
//! - 会话结束时销毁组件，之后不会再有任何回调

use std::io::{self, Write};
use std::str::FromStr;
use std::time::Duration;

use motion_text::{
    CyclingText, IndexChange, LayoutProvider, Point, ProximityMapper, RotationCommand,
    RotationEvent,
};
use thiserror::Error;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::render::{phase_marker, render_caption, render_heat};

/// 等待动画结束的最大帧数
const MAX_SETTLE_FRAMES: usize = 10_000;

/// 轮播会话
pub struct RotationSession<W: Write> {
    text: CyclingText,
    out: W,
    last_line: Option<String>,
    lines_written: usize,
}

impl<W: Write> RotationSession<W> {
    pub fn new(text: CyclingText, out: W) -> Self {
        Self {
            text,
            out,
            last_line: None,
            lines_written: 0,
        }
    }

    pub fn text(&self) -> &CyclingText {
        &self.text
    }

    /// 已写出的行数
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// 推进一帧
    pub fn step(&mut self, dt: Duration) -> io::Result<Vec<RotationEvent>> {
        let events = self.text.update(dt);
        for event in &events {
            if let RotationEvent::IndexChanged(change) = event {
                debug!(from = change.from, to = change.to, "自动切换");
            }
        }
        self.emit()?;
        Ok(events)
    }

    /// 执行手动命令
    pub fn apply(&mut self, command: RotationCommand) -> io::Result<Option<IndexChange>> {
        let change = self.text.apply(command);
        self.emit()?;
        Ok(change)
    }

    /// 按帧推进直到切换动画结束
    pub fn settle(&mut self, dt: Duration) -> io::Result<()> {
        let mut frames = 0;
        while self.text.is_animating() && frames < MAX_SETTLE_FRAMES {
            self.step(dt)?;
            frames += 1;
        }
        Ok(())
    }

    /// 依次执行脚本，每条命令后等待动画结束
    pub fn run_script(&mut self, script: &[ScriptCommand], dt: Duration) -> io::Result<()> {
        self.emit()?;
        self.settle(dt)?;
        for command in script {
            let change = self.apply(command.0)?;
            if change.is_none() {
                debug!(command = ?command.0, "索引未变化");
            }
            self.settle(dt)?;
        }
        Ok(())
    }

    /// 结束会话，销毁组件并取回输出
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        self.text.dispose();
        Ok(self.out)
    }

    fn emit(&mut self) -> io::Result<()> {
        let frame = self.text.frame();
        let line = format!("[{}{}] {}", frame.index, phase_marker(&frame), render_caption(&frame));
        if self.last_line.as_deref() != Some(line.as_str()) {
            writeln!(self.out, "{line}")?;
            self.lines_written += 1;
            self.last_line = Some(line);
        }
        Ok(())
    }
}

/// 用 tokio 定时器驱动自动轮播，运行 `duration` 后结束
pub async fn run_autoplay<W: Write>(
    mut session: RotationSession<W>,
    frame: Duration,
    duration: Duration,
) -> io::Result<W> {
    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let deadline = tokio::time::sleep(duration);
    tokio::pin!(deadline);

    let mut last = Instant::now();
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            now = ticker.tick() => {
                let dt = now.saturating_duration_since(last);
                last = now;
                session.step(dt)?;
            }
        }
    }

    info!(lines = session.lines_written(), "自动轮播结束");
    session.finish()
}

/// 压感扫描：指针从文本左侧匀速移动到右侧
pub struct PressureSweep<L: LayoutProvider> {
    mapper: ProximityMapper,
    layout: L,
}

impl<L: LayoutProvider> PressureSweep<L> {
    pub fn new(mut mapper: ProximityMapper, layout: L) -> Self {
        mapper.relayout(&layout);
        Self { mapper, layout }
    }

    pub fn mapper(&self) -> &ProximityMapper {
        &self.mapper
    }

    /// 以 `frames` 帧扫过容器，每帧写出一行热度条
    pub fn run<W: Write>(&mut self, frames: usize, out: &mut W) -> io::Result<()> {
        let container = self.layout.container();
        let y = container.y + container.height / 2.0;
        let steps = frames.max(2) - 1;

        for i in 0..frames {
            let x = container.x + container.width * i as f32 / steps as f32;
            self.mapper.pointer_moved(Point::new(x, y));
            let styles = self.mapper.frame();
            writeln!(out, "{:>7.1} |{}|", x, render_heat(&styles))?;
        }
        Ok(())
    }

    pub fn finish(self) {
        self.mapper.dispose();
    }
}

/// 脚本命令
///
/// 文本格式：`next`、`prev`、`reset`、`jump:N`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptCommand(pub RotationCommand);

/// 脚本解析错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("未知命令 '{0}'")]
    UnknownCommand(String),

    #[error("无效的跳转索引 '{0}'")]
    InvalidIndex(String),
}

impl FromStr for ScriptCommand {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let command = match s {
            "next" | "n" => RotationCommand::Next,
            "prev" | "previous" | "p" => RotationCommand::Previous,
            "reset" | "r" => RotationCommand::Reset,
            _ => {
                let Some(index) = s.strip_prefix("jump:") else {
                    return Err(ScriptError::UnknownCommand(s.to_string()));
                };
                let index = index
                    .trim()
                    .parse()
                    .map_err(|_| ScriptError::InvalidIndex(index.to_string()))?;
                RotationCommand::JumpTo { index }
            }
        };
        Ok(Self(command))
    }
}

/// 解析逗号分隔的脚本
pub fn parse_script(script: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    script
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = parse_script("next, prev,jump:-2 ,reset,,").unwrap();
        assert_eq!(
            script,
            vec![
                ScriptCommand(RotationCommand::Next),
                ScriptCommand(RotationCommand::Previous),
                ScriptCommand(RotationCommand::JumpTo { index: -2 }),
                ScriptCommand(RotationCommand::Reset),
            ]
        );
    }

    #[test]
    fn test_parse_script_errors() {
        assert_eq!(
            parse_script("next,skip"),
            Err(ScriptError::UnknownCommand("skip".to_string()))
        );
        assert_eq!(
            parse_script("jump:x"),
            Err(ScriptError::InvalidIndex("x".to_string()))
        );
    }
}
