//! # Config 模块
//!
//! 宿主配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;
use std::time::Duration;

use motion_text::{MotionError, PressureConfig, RotatorConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 轮播标题
    #[serde(default = "default_captions")]
    pub captions: Vec<String>,

    /// 压感文本内容
    #[serde(default = "default_label")]
    pub label: String,

    /// 轮播文本配置
    #[serde(default)]
    pub rotator: RotatorConfig,

    /// 压感文本配置
    #[serde(default)]
    pub pressure: PressureConfig,

    /// 终端输出配置
    #[serde(default)]
    pub terminal: TerminalConfig,
}

/// 终端输出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// 帧间隔（毫秒）
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,

    /// 单个字形的宽度（像素）
    #[serde(default = "default_glyph_advance")]
    pub glyph_advance: f32,

    /// 行高（像素）
    #[serde(default = "default_line_height")]
    pub line_height: f32,
}

impl TerminalConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            glyph_advance: default_glyph_advance(),
            line_height: default_line_height(),
        }
    }
}

// 默认值函数
fn default_captions() -> Vec<String> {
    vec![
        "Full-Stack Developer".to_string(),
        "Systems Programmer".to_string(),
        "Open Source Contributor".to_string(),
    ]
}

fn default_label() -> String {
    "Hello!".to_string()
}

fn default_frame_ms() -> u64 {
    16
}

fn default_glyph_advance() -> f32 {
    12.0
}

fn default_line_height() -> f32 {
    24.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            captions: default_captions(),
            label: default_label(),
            rotator: RotatorConfig::default(),
            pressure: PressureConfig::default(),
            terminal: TerminalConfig::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => {
                info!(path = %path.display(), "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 读取并解析配置文件
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.captions.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "captions 至少需要一个标题".to_string(),
            ));
        }

        if self.terminal.frame_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "terminal.frame_ms 必须大于 0".to_string(),
            ));
        }

        if !(self.terminal.glyph_advance > 0.0 && self.terminal.line_height > 0.0) {
            return Err(ConfigError::ValidationFailed(
                "terminal.glyph_advance 与 terminal.line_height 必须是正数".to_string(),
            ));
        }

        self.rotator.validate()?;
        self.pressure.validate()?;
        Ok(())
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 解析/序列化失败
    #[error("配置序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    /// 组件配置无效
    #[error("组件配置无效: {0}")]
    Motion(#[from] MotionError),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_text::SplitBy;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.captions.len(), 3);
        assert_eq!(config.terminal.frame_interval(), Duration::from_millis(16));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();

        // 反序列化
        let loaded: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "captions": ["one", "two"], "rotator": { "split_by": "words" } }"#,
        )
        .unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.captions, ["one", "two"]);
        assert_eq!(config.rotator.split_by, SplitBy::Words);
        assert_eq!(config.label, "Hello!");
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load(dir.path().join("nope.json")), AppConfig::default());

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppConfig::load(&path), AppConfig::default());
        assert!(matches!(AppConfig::read(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_save_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.json");
        let mut config = AppConfig::default();
        config.label = "Saved".to_string();
        config.save(&path).unwrap();

        assert_eq!(AppConfig::read(&path).unwrap(), config);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.captions.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));

        config.captions.push("back".to_string());
        config.rotator.rotation_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Motion(_))));
    }
}
