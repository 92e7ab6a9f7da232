//! 校验报告渲染
//!
//! HTML 片段供页面直接插入，纯文本供命令行工具输出

use serde::Serialize;

use crate::highlight::Highlighter;
use crate::validator::{ErrorCounts, ValidationResult};

const COMPLIANT_HTML: &str =
    r#"✓ <span style="color:green">The text is compliant with the vocabulary list.</span>"#;
const NON_COMPLIANT_HTML: &str = r#"✗ <span style="color:red">Non-compliant words found:</span>"#;

/// 校验报告
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub result: ValidationResult,
    /// 通过/未通过状态行
    pub status_html: String,
    /// 不合规词列表（合规时为空）
    pub errors_html: String,
    /// 高亮后的原文面板
    pub highlighted_html: String,
}

impl ValidationReport {
    pub fn build(text: &str, result: ValidationResult, highlighter: &Highlighter) -> Self {
        let status_html = status_html(result.compliant).to_string();
        let errors_html = errors_html(&result.errors);
        let highlighted = highlighter.render_escaped(text, result.errors.keys());
        let highlighted_html = format!(r#"<div class="highlight">{}</div>"#, highlighted);

        Self {
            result,
            status_html,
            errors_html,
            highlighted_html,
        }
    }
}

pub fn status_html(compliant: bool) -> &'static str {
    if compliant {
        COMPLIANT_HTML
    } else {
        NON_COMPLIANT_HTML
    }
}

/// 不合规词列表，出现多次时追加次数
pub fn errors_html(errors: &ErrorCounts) -> String {
    errors
        .iter()
        .map(|(word, count)| {
            if count > 1 {
                format!(
                    r#"<div class="error-word">• {} <span style="color:blue">({} times)</span></div>"#,
                    word, count
                )
            } else {
                format!(r#"<div class="error-word">• {}</div>"#, word)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 纯文本报告
pub fn render_plain(result: &ValidationResult) -> String {
    let mut lines = Vec::new();

    if result.compliant {
        lines.push("✓ The text is compliant with the vocabulary list.".to_string());
    } else {
        lines.push("✗ Non-compliant words found:".to_string());
        for (word, count) in result.errors.iter() {
            if count > 1 {
                lines.push(format!("• {} ({} times)", word, count));
            } else {
                lines.push(format!("• {}", word));
            }
        }
    }

    if !result.suggestions.is_empty() {
        lines.push(String::new());
        lines.push("Closest vocabulary words:".to_string());
        for s in &result.suggestions {
            lines.push(format!("• {} → {}", s.word, s.suggestion));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(words: &[&str]) -> ValidationResult {
        let errors: ErrorCounts = words.iter().copied().collect();
        ValidationResult {
            compliant: errors.is_empty(),
            total_words: words.len(),
            errors,
            suggestions: Vec::new(),
        }
    }

    #[test]
    fn test_errors_html_count_suffix() {
        let errors: ErrorCounts = ["hoy", "pescados", "hoy"].into_iter().collect();
        let html = errors_html(&errors);
        assert!(html.contains(r#"• hoy <span style="color:blue">(2 times)</span>"#));
        assert!(html.contains("• pescados</div>"));
        assert!(!html.contains("(1 times)"));
    }

    #[test]
    fn test_build_report_compliant() {
        let report = ValidationReport::build("hola", result_with(&[]), &Highlighter::default());
        assert_eq!(report.status_html, COMPLIANT_HTML);
        assert!(report.errors_html.is_empty());
        assert_eq!(report.highlighted_html, r#"<div class="highlight">hola</div>"#);
    }

    #[test]
    fn test_build_report_non_compliant() {
        let report = ValidationReport::build(
            "hola <mundo>",
            result_with(&["mundo"]),
            &Highlighter::default(),
        );
        assert_eq!(report.status_html, NON_COMPLIANT_HTML);
        assert_eq!(
            report.highlighted_html,
            r#"<div class="highlight">hola &lt;<span style="color: red">mundo</span>&gt;</div>"#
        );
    }

    #[test]
    fn test_render_plain() {
        let plain = render_plain(&result_with(&["hoy", "hoy", "pescados"]));
        assert_eq!(
            plain,
            "✗ Non-compliant words found:\n• hoy (2 times)\n• pescados"
        );

        let plain = render_plain(&result_with(&[]));
        assert_eq!(plain, "✓ The text is compliant with the vocabulary list.");
    }
}
