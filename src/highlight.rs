//! 高亮渲染
//!
//! 使用与校验相同的词边界正则重新扫描原文，命中的词包裹 `<span>`，
//! 其余字符（空白、标点）原样按序输出

use std::collections::HashSet;

use crate::nlp::{normalize_key, WORD_RE};

/// 默认高亮颜色
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "red";

/// 高亮渲染器（纯函数，无内部状态变化）
#[derive(Debug, Clone)]
pub struct Highlighter {
    color: String,
}

impl Highlighter {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
        }
    }

    /// 高亮标记词
    ///
    /// 除插入的标记外，输出与原文逐字节一致
    pub fn render<I, S>(&self, text: &str, flagged_words: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.render_with(text, flagged_words, |s| s.to_string())
    }

    /// 高亮标记词，并对词之间的文本做 HTML 转义
    ///
    /// 词本身只含词字符，无需转义
    pub fn render_escaped<I, S>(&self, text: &str, flagged_words: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.render_with(text, flagged_words, escape_html)
    }

    fn render_with<I, S, F>(&self, text: &str, flagged_words: I, gap: F) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> String,
    {
        let flagged: HashSet<String> = flagged_words
            .into_iter()
            .map(|w| normalize_key(w.as_ref()))
            .collect();

        if flagged.is_empty() {
            return gap(text);
        }

        let mut result = String::with_capacity(text.len() + flagged.len() * 32);
        let mut last_end = 0;

        for m in WORD_RE.find_iter(text) {
            // 添加词之前的文本
            result.push_str(&gap(&text[last_end..m.start()]));

            let word = m.as_str();
            if flagged.contains(&normalize_key(word)) {
                result.push_str(&format!(
                    r#"<span style="color: {}">{}</span>"#,
                    self.color, word
                ));
            } else {
                result.push_str(word);
            }

            last_end = m.end();
        }

        // 添加剩余文本
        result.push_str(&gap(&text[last_end..]));
        result
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_COLOR)
    }
}

/// 使用默认颜色高亮
pub fn highlight<I, S>(text: &str, flagged_words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Highlighter::default().render(text, flagged_words)
}

/// HTML 转义
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
