//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-core`: 运行 motion-text 覆盖率
//! - `config-check`: 检查配置文件（JSON 语法、字段取值）

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use motion_text::{PressureConfig, RotatorConfig};
use serde_json::Value;
use walkdir::WalkDir;
use xshell::{Cmd, Shell, cmd};

fn run(step: &str, cmd: Cmd<'_>) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    cmd.run().map_err(|e| anyhow::anyhow!("{step} failed: {e}"))
}

fn ensure_cargo_llvm_cov_available(sh: &Shell) -> anyhow::Result<()> {
    match cmd!(sh, "cargo llvm-cov --version").quiet().ignore_stdout().run() {
        Ok(()) => Ok(()),
        Err(_) => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());
    let sh = Shell::new()?;

    match sub.as_str() {
        "check-all" => {
            run(
                "cargo fmt --all -- --check",
                cmd!(sh, "cargo fmt --all -- --check"),
            )?;
            run(
                "cargo clippy --workspace --all-targets",
                cmd!(sh, "cargo clippy --workspace --all-targets"),
            )?;
            run("cargo test --workspace", cmd!(sh, "cargo test --workspace"))?;
        }
        "cov-core" => {
            ensure_cargo_llvm_cov_available(&sh)?;

            run(
                "cargo llvm-cov -p motion-text --all-features --html",
                cmd!(sh, "cargo llvm-cov -p motion-text --all-features --html"),
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "config-check" => {
            let path = args.next();
            config_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-core        运行 motion-text 覆盖率报告
  config-check    检查配置文件

CONFIG-CHECK:
  cargo xtask config-check [path]

  不带参数：检查当前目录下的 config.json
  带路径参数：检查指定文件，或目录下所有 .json 文件

  检查内容：
    - JSON 语法错误
    - captions 为空
    - rotator / pressure 字段取值（间隔、半径、平滑系数、样式轴）
"#
    );
}

//=============================================================================
// config-check 命令实现
//=============================================================================

/// 单个文件的检查问题
struct ConfigIssue {
    file: String,
    message: String,
}

/// 执行配置检查
fn config_check(path: Option<&str>) -> anyhow::Result<()> {
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                collect_config_files(&path)
            } else {
                anyhow::bail!("路径不存在: {}", p);
            }
        }
        None => {
            let default = PathBuf::from("config.json");
            if !default.exists() {
                anyhow::bail!("默认配置文件不存在: config.json\n请指定配置路径");
            }
            vec![default]
        }
    };

    if files.is_empty() {
        eprintln!("未找到配置文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个配置文件...\n", files.len());

    let mut issues = Vec::new();
    for file in &files {
        check_config_file(file, &mut issues);
    }

    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个文件", files.len());
    eprintln!();
    for issue in &issues {
        eprintln!("[ERROR] {}: {}", issue.file, issue.message);
    }

    if !issues.is_empty() {
        eprintln!();
        eprintln!("❌ {} 个错误", issues.len());
        anyhow::bail!("配置检查发现错误");
    }

    eprintln!("✅ 检查通过，无错误");
    Ok(())
}

/// 收集目录下的所有 .json 文件
fn collect_config_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// 检查单个配置文件
///
/// 顶层可以是宿主配置（含 `rotator` / `pressure`），
/// 也可以直接是一份组件配置。
fn check_config_file(file: &Path, issues: &mut Vec<ConfigIssue>) {
    let name = file.display().to_string();
    let mut report = |message: String| {
        issues.push(ConfigIssue {
            file: name.clone(),
            message,
        })
    };

    let value: Value = match std::fs::read_to_string(file)
        .map_err(|e| e.to_string())
        .and_then(|c| serde_json::from_str(&c).map_err(|e| e.to_string()))
    {
        Ok(v) => v,
        Err(e) => {
            report(e);
            return;
        }
    };

    if let Some(captions) = value.get("captions") {
        match captions.as_array() {
            Some(list) if list.is_empty() => report("captions 至少需要一个标题".to_string()),
            Some(list) if !list.iter().all(Value::is_string) => {
                report("captions 只能包含字符串".to_string())
            }
            Some(_) => {}
            None => report("captions 必须是数组".to_string()),
        }
    }

    let sections: Vec<(&str, &Value)> = ["rotator", "pressure"]
        .into_iter()
        .filter_map(|key| value.get(key).map(|v| (key, v)))
        .collect();

    if sections.is_empty() {
        // 直接是组件配置：按字段猜测类型
        if value.get("radius").is_some()
            || value.get("falloff").is_some()
            || value.get("axes").is_some()
        {
            check_section("pressure", &value, &mut report);
        } else {
            check_section("rotator", &value, &mut report);
        }
        return;
    }

    for (key, section) in sections {
        check_section(key, section, &mut report);
    }
}

fn check_section(key: &str, section: &Value, report: &mut impl FnMut(String)) {
    let result = match key {
        "pressure" => serde_json::from_value::<PressureConfig>(section.clone())
            .map_err(|e| e.to_string())
            .and_then(|c| c.validate().map_err(|e| e.to_string())),
        _ => serde_json::from_value::<RotatorConfig>(section.clone())
            .map_err(|e| e.to_string())
            .and_then(|c| c.validate().map_err(|e| e.to_string())),
    };
    if let Err(e) = result {
        report(format!("{key}: {e}"));
    }
}
