//! 词边界分词器
//!
//! 提取原文中所有连续的词字符序列（Unicode `\w`，含字母、数字、下划线、组合符号）

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// 词边界正则（校验与高亮共用同一模式）
    pub static ref WORD_RE: Regex = Regex::new(r"\b\w+\b").expect("词边界正则无效");
}

/// Token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// 在原文中的起始字节索引
    pub start: usize,
    /// 在原文中的结束字节索引（不含）
    pub end: usize,
}

impl Token {
    /// 比较键（NFC + 小写）
    pub fn key(&self) -> String {
        normalize_key(&self.text)
    }
}

/// 分词器
pub struct Tokenizer;

impl Tokenizer {
    /// 分词
    ///
    /// 只返回词字符序列，空白与标点不产生 Token
    pub fn tokenize(text: &str) -> Vec<Token> {
        WORD_RE
            .find_iter(text)
            .map(|m| Token {
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    /// 分词并转为比较键（保留重复与原文顺序）
    pub fn words(text: &str) -> Vec<String> {
        Self::tokenize(text).iter().map(Token::key).collect()
    }
}

/// 比较键：NFC 归一化后转小写
///
/// 组合形式（"canción"）与分解形式（"cancio\u{301}n"）得到相同的键
pub fn normalize_key(word: &str) -> String {
    word.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_spanish_punctuation() {
        let text = "¿Qué tal, señor?";
        let tokens = Tokenizer::tokenize(text);
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["Qué", "tal", "señor"]);

        // 字节区间可以切回原文
        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_tokenize_digits_and_underscore() {
        let words = Tokenizer::words("Hay 3,5 kg de mi_variable");
        assert_eq!(words, vec!["hay", "3", "5", "kg", "de", "mi_variable"]);
    }

    #[test]
    fn test_tokenize_splits_hyphen_and_apostrophe() {
        let words = Tokenizer::words("franco-alemán l'estat");
        assert_eq!(words, vec!["franco", "alemán", "l", "estat"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(Tokenizer::tokenize("").is_empty());
        assert!(Tokenizer::tokenize("  ¡!  ...").is_empty());
    }

    #[test]
    fn test_normalize_key_unicode() {
        let composed = "Canción";
        let decomposed = "Cancio\u{301}n";
        assert_eq!(normalize_key(composed), "canción");
        assert_eq!(normalize_key(decomposed), normalize_key(composed));
        assert_eq!(normalize_key("MUNDO"), "mundo");
    }

    #[test]
    fn test_decomposed_word_is_single_token() {
        // 组合符号属于 \w，不会把单词截断
        let tokens = Tokenizer::tokenize("cancio\u{301}n nueva");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].key(), "canción");
    }
}
