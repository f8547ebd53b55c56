//! # Host CLI
//!
//! motion-text 的终端宿主：加载配置、驱动组件、把帧输出为文本。
//!
//! ## 模块结构
//!
//! - [`config`]：配置文件与默认值
//! - [`driver`]：会话驱动与 tokio 定时循环
//! - [`render`]：终端文本渲染

pub mod config;
pub mod driver;
pub mod render;

pub use config::{AppConfig, ConfigError, TerminalConfig};
pub use driver::{PressureSweep, RotationSession, ScriptCommand, parse_script, run_autoplay};
