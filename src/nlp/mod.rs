//! NLP 层 - 分词与词性标注
//!
//! 校验器依赖两套独立的分词：
//! 1. 词边界正则分词（`\b\w+\b`），用于统计与高亮
//! 2. 标注器自身的分词，用于识别专有名词和数词
//!
//! 两者在带撇号的词、数字分隔符上可能不一致，这是已知行为。

mod lexicon;
mod spanish;
mod tagger;
mod tokenizer;

pub use lexicon::{is_digit_form, Lexicon, LexiconFile};
pub use spanish::SpanishTagger;
pub use tagger::{PosTag, TaggedToken, Tagger};
pub use tokenizer::{normalize_key, Token, Tokenizer, WORD_RE};
