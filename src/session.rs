// 会话状态与交互命令
//
// 每个命令返回 Result<T, String>，错误信息直接展示给用户

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::config::AppConfig;
use crate::highlight::Highlighter;
use crate::report::ValidationReport;
use crate::validator::Validator;
use crate::vocabulary::Vocabulary;

pub const MISSING_VOCABULARY_WARNING: &str = "Please load a vocabulary file first.";
pub const MISSING_TEXT_WARNING: &str = "Please enter some text to validate.";

/// 应用状态（所有字段均可廉价克隆）
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<Validator>,
    pub highlighter: Arc<Highlighter>,
    /// 当前词表（最后一次上传生效）
    pub vocabulary: Arc<Mutex<Vocabulary>>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(validator: Arc<Validator>, config: &AppConfig) -> Self {
        Self {
            validator,
            highlighter: Arc::new(Highlighter::new(config.highlight.color.trim())),
            vocabulary: Arc::new(Mutex::new(Vocabulary::new())),
            max_upload_bytes: config.vocabulary.max_upload_bytes,
        }
    }
}

/// 词表状态
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VocabularySummary {
    pub word_count: usize,
    pub message: String,
}

impl VocabularySummary {
    fn of(vocabulary: &Vocabulary) -> Self {
        Self {
            word_count: vocabulary.len(),
            message: format!("Vocabulary loaded: {} words", vocabulary.len()),
        }
    }
}

/// 校验命令结果
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidateOutcome {
    /// 输入前置条件不满足，未执行校验
    Warning { message: String },
    /// 校验完成
    Report(ValidationReport),
}

fn lock_vocabulary_or_recover(vocabulary: &Mutex<Vocabulary>) -> MutexGuard<'_, Vocabulary> {
    match vocabulary.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("词表锁已 poisoned，继续使用恢复后的数据");
            poisoned.into_inner()
        }
    }
}

/// 上传词表（替换当前词表）
///
/// 解析失败时保留原词表
pub fn load_vocabulary(state: &AppState, bytes: &[u8]) -> Result<VocabularySummary, String> {
    if bytes.len() > state.max_upload_bytes {
        tracing::warn!(
            "词表文件过大: {} 字节 (上限 {})",
            bytes.len(),
            state.max_upload_bytes
        );
        return Err(format!(
            "Vocabulary file is too large ({} bytes, limit {} bytes).",
            bytes.len(),
            state.max_upload_bytes
        ));
    }

    let parsed = Vocabulary::from_bytes(bytes).map_err(|e| {
        tracing::warn!("解析词表失败: {:#}", e);
        format!("Could not read vocabulary file: {}", e.root_cause())
    })?;

    Ok(replace_vocabulary(state, parsed))
}

/// 替换当前词表（本地文件等不受上传大小限制的来源）
pub fn replace_vocabulary(state: &AppState, parsed: Vocabulary) -> VocabularySummary {
    let mut vocabulary = lock_vocabulary_or_recover(&state.vocabulary);
    *vocabulary = parsed;
    tracing::info!("词表已加载: {} 个词", vocabulary.len());
    VocabularySummary::of(&vocabulary)
}

/// 清空词表
pub fn clear_vocabulary(state: &AppState) -> VocabularySummary {
    let mut vocabulary = lock_vocabulary_or_recover(&state.vocabulary);
    *vocabulary = Vocabulary::new();
    tracing::info!("词表已清空");
    VocabularySummary::of(&vocabulary)
}

pub fn vocabulary_status(state: &AppState) -> VocabularySummary {
    VocabularySummary::of(&lock_vocabulary_or_recover(&state.vocabulary))
}

/// 校验文本
///
/// 词表为空或文本为空白时只返回警告，不执行校验
pub fn validate_text(state: &AppState, text: &str) -> ValidateOutcome {
    let vocabulary = lock_vocabulary_or_recover(&state.vocabulary);

    if vocabulary.is_empty() {
        tracing::warn!("未加载词表，跳过校验");
        return ValidateOutcome::Warning {
            message: MISSING_VOCABULARY_WARNING.to_string(),
        };
    }
    if text.trim().is_empty() {
        tracing::warn!("文本为空，跳过校验");
        return ValidateOutcome::Warning {
            message: MISSING_TEXT_WARNING.to_string(),
        };
    }

    let result = state.validator.validate(text, &vocabulary);
    drop(vocabulary);

    ValidateOutcome::Report(ValidationReport::build(text, result, &state.highlighter))
}
