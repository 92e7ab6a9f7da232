//! 词性标注接口定义

use serde::{Deserialize, Serialize};

/// 词性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    /// 专有名词（人名、地名、机构名等）
    ProperNoun,
    /// 数词
    Numeral,
    /// 限定词（冠词、指示词、物主词等）
    Determiner,
    /// 介词
    Adposition,
    /// 代词
    Pronoun,
    /// 连词
    Conjunction,
    /// 副词
    Adverb,
    /// 标点
    Punctuation,
    /// 其他实词
    Other,
}

/// 标注结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedToken {
    /// 片段文本（标注器自身分词的结果）
    pub text: String,
    /// 起始位置（字节索引）
    pub start: usize,
    /// 结束位置（字节索引，不含）
    pub end: usize,
    /// 词性
    pub pos: PosTag,
    /// 是否像数字（阿拉伯数字或数词）
    pub like_num: bool,
}

impl TaggedToken {
    pub fn is_proper_noun(&self) -> bool {
        self.pos == PosTag::ProperNoun
    }
}

/// 词性标注器
///
/// 构建一次后只读共享，实现必须可跨线程使用
pub trait Tagger: Send + Sync {
    /// 标注器名称（用于日志与健康检查）
    fn name(&self) -> &str;

    /// 对文本分词并标注
    fn tag(&self, text: &str) -> Vec<TaggedToken>;
}
