//! # Split 模块
//!
//! 将标题文本按配置的粒度切分为可独立动画的显示单元。
//!
//! ## 切分规则
//!
//! ```text
//! Characters  -> 按空白串切成单词，单词内再按字素簇切分
//! Words       -> 按空白串切分，每个单词一个单元
//! Lines       -> 按换行符切分，每行一个单元
//! Custom(sep) -> 按自定义分隔符切分
//! ```
//!
//! 每个分组（单词/行/片段）记录紧跟其后的原始分隔文本，首个单词之前的空白单独记录。
//! 因此无论按分组还是按显示单元拼接，都能得到与原文完全一致的字符串。

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// 切分粒度
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitBy {
    /// 按字素簇（用户感知的字符）
    #[default]
    Characters,
    /// 按单词
    Words,
    /// 按行
    Lines,
    /// 按自定义分隔符
    Custom(String),
}

/// 显示单元
///
/// 单个字素、单词或行。`leading` / `trailing` 保存单元前后的原始分隔文本，
/// 只有首个单元可能带 `leading`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUnit {
    pub text: String,
    pub leading: String,
    pub trailing: String,
    /// 渲染该单元后是否需要补分隔符（`trailing` 非空）
    pub trailing_space: bool,
}

/// 单元分组
///
/// 字符粒度下，一个分组对应一个原始单词；其他粒度下每个分组只有一个单元。
/// 分组永远不为空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitGroup {
    pub units: Vec<String>,
    /// 分组之后的分隔文本，最后一个分组可能为空
    pub separator: String,
}

impl UnitGroup {
    pub fn needs_space(&self) -> bool {
        !self.separator.is_empty()
    }
}

/// 切分后的标题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCaption {
    split_by: SplitBy,
    leading: String,
    groups: Vec<UnitGroup>,
}

impl SplitCaption {
    /// 所有分组
    pub fn groups(&self) -> &[UnitGroup] {
        &self.groups
    }

    /// 首个分组之前的空白
    pub fn leading(&self) -> &str {
        &self.leading
    }

    /// 切分粒度
    pub fn split_by(&self) -> &SplitBy {
        &self.split_by
    }

    /// 展平后的显示单元序列
    ///
    /// 分组的分隔文本落在该分组最后一个单元上，前导空白落在第一个单元上。
    pub fn units(&self) -> Vec<DisplayUnit> {
        let mut units = Vec::with_capacity(self.unit_count());
        let mut leading = self.leading.as_str();
        for group in &self.groups {
            let last = group.units.len().saturating_sub(1);
            for (i, text) in group.units.iter().enumerate() {
                let trailing = if i == last {
                    group.separator.as_str()
                } else {
                    ""
                };
                units.push(DisplayUnit {
                    text: text.clone(),
                    leading: std::mem::take(&mut leading).to_owned(),
                    trailing: trailing.to_owned(),
                    trailing_space: !trailing.is_empty(),
                });
            }
        }
        units
    }

    /// 单元总数（错峰延迟按此计算）
    pub fn unit_count(&self) -> usize {
        self.groups.iter().map(|g| g.units.len()).sum()
    }

    /// 按分组重新拼接原始文本
    pub fn rejoin(&self) -> String {
        let mut out = self.leading.clone();
        for group in &self.groups {
            for unit in &group.units {
                out.push_str(unit);
            }
            out.push_str(&group.separator);
        }
        out
    }
}

/// 按粒度切分标题
pub fn split_caption(caption: &str, split_by: &SplitBy) -> SplitCaption {
    let (leading, groups) = match split_by {
        SplitBy::Characters => split_words(caption, true),
        SplitBy::Words => split_words(caption, false),
        SplitBy::Lines => (String::new(), split_whole(caption, "\n")),
        // 空分隔符退化为字符粒度
        SplitBy::Custom(sep) if sep.is_empty() => split_words(caption, true),
        SplitBy::Custom(sep) => (String::new(), split_whole(caption, sep)),
    };

    SplitCaption {
        split_by: split_by.clone(),
        leading,
        groups,
    }
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// 把文本切成交替出现的空白串与非空白串，以字素簇为最小粒度
fn blank_runs(caption: &str) -> Vec<(bool, &str)> {
    let mut spans: Vec<(bool, usize, usize)> = Vec::new();
    for (start, grapheme) in caption.grapheme_indices(true) {
        let blank = is_blank(grapheme);
        let end = start + grapheme.len();
        match spans.last_mut() {
            Some((b, _, e)) if *b == blank => *e = end,
            _ => spans.push((blank, start, end)),
        }
    }
    spans
        .into_iter()
        .map(|(blank, start, end)| (blank, &caption[start..end]))
        .collect()
}

fn split_words(caption: &str, graphemes: bool) -> (String, Vec<UnitGroup>) {
    let mut runs = blank_runs(caption).into_iter().peekable();
    let leading = runs.next_if(|(blank, _)| *blank).map_or("", |(_, s)| s);

    let mut groups = Vec::new();
    while let Some((_, word)) = runs.next() {
        let separator = runs.next().map_or("", |(_, gap)| gap);
        let units = if graphemes {
            word.graphemes(true).map(str::to_owned).collect()
        } else {
            vec![word.to_owned()]
        };
        groups.push(UnitGroup {
            units,
            separator: separator.to_owned(),
        });
    }
    (leading.to_owned(), groups)
}

fn split_whole(caption: &str, separator: &str) -> Vec<UnitGroup> {
    if caption.is_empty() {
        return Vec::new();
    }
    let parts: Vec<&str> = caption.split(separator).collect();
    let last = parts.len() - 1;
    parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| UnitGroup {
            units: vec![part.to_owned()],
            separator: if i == last {
                String::new()
            } else {
                separator.to_owned()
            },
        })
        .collect()
}
