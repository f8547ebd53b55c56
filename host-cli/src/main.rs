//! # motion-cli
//!
//! 在终端中运行动态文本组件。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p host-cli -- rotate
//! cargo run -p host-cli -- rotate --captions "Rust,Go,Zig" --duration-ms 8000
//! cargo run -p host-cli -- rotate --script "next,next,jump:0,prev"
//! cargo run -p host-cli -- pressure --label "Hi" --pointer 6,12 --radius 30
//! cargo run -p host-cli -- pressure --sweep
//! cargo run -p host-cli -- dump-config
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use host_cli::config::AppConfig;
use host_cli::driver::{
    PressureSweep, RotationSession, ScriptCommand, parse_script, run_autoplay,
};
use host_cli::render::{render_heat, render_styles};
use motion_text::{CyclingText, Falloff, MonospaceLayout, Point, ProximityMapper, Rect, SplitBy};
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "motion-cli")]
#[command(about = "在终端中运行动态文本组件")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件路径
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// 日志级别（trace/debug/info/warn/error）
    #[arg(long, default_value = "info", global = true)]
    log_level: Level,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行轮播文本
    Rotate {
        /// 逗号分隔的标题（覆盖配置文件）
        #[arg(long, value_delimiter = ',')]
        captions: Option<Vec<String>>,

        /// 自动轮播间隔（毫秒）
        #[arg(long)]
        interval_ms: Option<u64>,

        /// 切分粒度：characters / words / lines，其他值视为自定义分隔符
        #[arg(long)]
        split_by: Option<String>,

        /// 运行时长（毫秒）
        #[arg(long, default_value = "6000")]
        duration_ms: u64,

        /// 手动命令脚本，例如 "next,prev,jump:2,reset"
        ///
        /// 指定后关闭自动轮播。
        #[arg(long)]
        script: Option<String>,
    },

    /// 计算压感文本样式
    Pressure {
        /// 文本（覆盖配置文件）
        #[arg(long)]
        label: Option<String>,

        /// 指针位置 "x,y"（容器局部坐标）
        #[arg(long, value_parser = parse_point, default_value = "0,0")]
        pointer: Point,

        /// 影响半径
        #[arg(long)]
        radius: Option<f32>,

        /// 衰减曲线
        #[arg(long, value_enum)]
        falloff: Option<FalloffArg>,

        /// 让指针从左到右扫过文本
        #[arg(long)]
        sweep: bool,

        /// 扫描帧数
        #[arg(long, default_value = "24")]
        frames: usize,
    },

    /// 打印生效的配置
    DumpConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum FalloffArg {
    Linear,
    Gaussian,
}

impl From<FalloffArg> for Falloff {
    fn from(arg: FalloffArg) -> Self {
        match arg {
            FalloffArg::Linear => Falloff::Linear,
            FalloffArg::Gaussian => Falloff::Gaussian,
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("期望 \"x,y\" 格式，实际为 '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("无效的 x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("无效的 y: {e}"))?;
    Ok(Point::new(x, y))
}

fn parse_split_by(s: &str) -> SplitBy {
    match s {
        "characters" | "chars" => SplitBy::Characters,
        "words" => SplitBy::Words,
        "lines" => SplitBy::Lines,
        other => SplitBy::Custom(other.to_string()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    let mut config = AppConfig::load(&cli.config);

    match cli.command {
        Commands::Rotate {
            captions,
            interval_ms,
            split_by,
            duration_ms,
            script,
        } => {
            if let Some(captions) = captions {
                config.captions = captions;
            }
            if let Some(interval_ms) = interval_ms {
                config.rotator.rotation_interval_ms = interval_ms;
            }
            if let Some(split_by) = split_by {
                config.rotator.split_by = parse_split_by(&split_by);
            }
            let script = script
                .as_deref()
                .map(parse_script)
                .transpose()
                .context("解析命令脚本失败")?;
            if script.is_some() {
                config.rotator.autoplay = false;
            }
            config.validate().context("配置无效")?;

            rotate(&config, Duration::from_millis(duration_ms), script)
        }
        Commands::Pressure {
            label,
            pointer,
            radius,
            falloff,
            sweep,
            frames,
        } => {
            if let Some(label) = label {
                config.label = label;
            }
            if radius.is_some() {
                config.pressure.radius = radius;
            }
            if let Some(falloff) = falloff {
                config.pressure.falloff = falloff.into();
            }
            if sweep && config.pressure.smoothing.is_none() {
                config.pressure.smoothing = Some(1.0 / 15.0);
            }
            config.validate().context("配置无效")?;

            pressure(&config, pointer, sweep.then_some(frames))
        }
        Commands::DumpConfig => {
            let json = serde_json::to_string_pretty(&config).context("序列化配置失败")?;
            println!("{json}");
            Ok(())
        }
    }
}

fn rotate(
    config: &AppConfig,
    duration: Duration,
    script: Option<Vec<ScriptCommand>>,
) -> anyhow::Result<()> {
    let text = CyclingText::new(config.captions.clone(), config.rotator.clone())
        .context("创建轮播文本失败")?;
    info!(
        captions = text.captions().len(),
        autoplay = text.autoplay(),
        interval_ms = text.config().rotation_interval_ms,
        "开始轮播"
    );
    let frame = config.terminal.frame_interval();
    let mut session = RotationSession::new(text, io::stdout().lock());

    match script {
        Some(script) => {
            session.run_script(&script, frame)?;
            session.finish()?;
        }
        None => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("创建 tokio 运行时失败")?;
            runtime.block_on(run_autoplay(session, frame, duration))?;
        }
    }
    Ok(())
}

fn pressure(config: &AppConfig, pointer: Point, sweep_frames: Option<usize>) -> anyhow::Result<()> {
    let mapper = ProximityMapper::new(config.label.clone(), config.pressure.clone())
        .context("创建压感映射器失败")?;

    let terminal = &config.terminal;
    let columns = mapper.glyphs().len().max(1) as f32;
    let layout = MonospaceLayout::new(
        Rect::new(
            0.0,
            0.0,
            columns * terminal.glyph_advance,
            terminal.line_height,
        ),
        terminal.glyph_advance,
        terminal.line_height,
    );

    let mut stdout = io::stdout().lock();
    match sweep_frames {
        Some(frames) => {
            let mut sweep = PressureSweep::new(mapper, layout);
            sweep.run(frames, &mut stdout)?;
            sweep.finish();
        }
        None => {
            let mut mapper = mapper;
            mapper.relayout(&layout);
            let styles = mapper.styles(pointer);
            writeln!(stdout, "|{}|", render_heat(&styles))?;
            write!(stdout, "{}", render_styles(&styles))?;
            mapper.dispose();
        }
    }
    Ok(())
}
