//! # Render 模块
//!
//! 把组件输出渲染为终端文本。

use std::fmt::Write as _;

use motion_text::{CaptionFrame, GlyphStyle, UnitPhase};
use unicode_width::UnicodeWidthStr;

/// 强调系数对应的灰度字符，从弱到强
const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// 可见程度低于该值的单元渲染为空白
const VISIBLE_THRESHOLD: f32 = 0.5;

/// 渲染标题帧
///
/// 未达到可见阈值的单元按显示宽度以空白占位，保证切换过程中文本不抖动。
pub fn render_caption(frame: &CaptionFrame) -> String {
    let mut line = String::new();
    for unit in &frame.units {
        push_gap(&mut line, &unit.leading);
        if unit.visibility() >= VISIBLE_THRESHOLD {
            line.push_str(&unit.text);
        } else {
            line.extend(std::iter::repeat_n(' ', unit.text.width()));
        }
        push_gap(&mut line, &unit.trailing);
    }
    line.trim_end().to_string()
}

/// 单行输出中换行、制表符等控制字符各占一格
fn push_gap(line: &mut String, gap: &str) {
    for ch in gap.chars() {
        line.push(if ch.is_control() { ' ' } else { ch });
    }
}

/// 帧所处阶段的简写标记
pub fn phase_marker(frame: &CaptionFrame) -> char {
    if frame.units.iter().any(|u| u.phase == UnitPhase::Exiting) {
        '<'
    } else if frame.units.iter().any(|u| u.phase == UnitPhase::Entering) {
        '>'
    } else {
        '='
    }
}

/// 把强调系数映射为灰度字符
pub fn ramp_char(t: f32) -> char {
    let last = RAMP.len() - 1;
    let index = (t.clamp(0.0, 1.0) * last as f32).round() as usize;
    RAMP[index.min(last)]
}

/// 渲染压感热度条，每个字形一个字符
pub fn render_heat(styles: &[GlyphStyle]) -> String {
    styles.iter().map(|s| ramp_char(s.t)).collect()
}

/// 渲染压感明细表
pub fn render_styles(styles: &[GlyphStyle]) -> String {
    let mut out = String::new();
    for style in styles {
        let shown = style.grapheme.escape_debug().to_string();
        let _ = write!(out, "{shown:<4} t={:.3}", style.t);
        for (name, value) in [
            ("wght", style.weight),
            ("wdth", style.width),
            ("ital", style.slant),
            ("alpha", style.alpha),
        ] {
            if let Some(value) = value {
                let _ = write!(out, " {name}={value:.1}");
            }
        }
        out.push('\n');
    }
    out
}
