//! 词表校验器
//!
//! 1. 标注器识别专有名词与数词（豁免集合）
//! 2. 词边界正则独立分词并转为比较键
//! 3. 不在词表、专有名词集合、数词集合中的词计为不合规，按首次出现顺序计数

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::nlp::{normalize_key, Tagger, Tokenizer};
use crate::suggest::{Suggester, Suggestion};
use crate::vocabulary::Vocabulary;

/// 不合规词计数（保持首次出现顺序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCounts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl ErrorCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次出现
    pub fn record(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), 1));
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// 不同词的数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 出现总次数
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(word, _)| word.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(word, count)| (word.as_str(), *count))
    }
}

impl<S: AsRef<str>> FromIterator<S> for ErrorCounts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = Self::new();
        for word in iter {
            counts.record(word.as_ref());
        }
        counts
    }
}

// 序列化为 JSON 对象，键顺序即首次出现顺序
impl Serialize for ErrorCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, count) in &self.entries {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

/// 校验结果
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// 是否全部合规（等价于 errors 为空）
    pub compliant: bool,
    /// 不合规词 → 出现次数
    pub errors: ErrorCounts,
    /// 参与校验的词数（正则分词结果）
    pub total_words: usize,
    /// 词表建议（不影响 compliant）
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

/// 校验器
///
/// 标注器在进程启动时构建一次，通过 Arc 共享
pub struct Validator {
    tagger: Arc<dyn Tagger>,
    enable_suggestions: bool,
}

impl Validator {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self {
            tagger,
            enable_suggestions: false,
        }
    }

    /// 是否为不合规词给出词表建议
    pub fn with_suggestions(mut self, enabled: bool) -> Self {
        self.enable_suggestions = enabled;
        self
    }

    pub fn tagger_name(&self) -> &str {
        self.tagger.name()
    }

    /// 校验文本
    pub fn validate(&self, text: &str, vocabulary: &Vocabulary) -> ValidationResult {
        let start = Instant::now();

        // 1. 标注，提取专有名词与数词集合
        let tagged = self.tagger.tag(text);
        let proper_nouns: HashSet<String> = tagged
            .iter()
            .filter(|t| t.is_proper_noun())
            .map(|t| normalize_key(&t.text))
            .collect();
        let numbers: HashSet<String> = tagged
            .iter()
            .filter(|t| t.like_num)
            .map(|t| normalize_key(&t.text))
            .collect();

        // 2. 正则分词（与标注器分词相互独立）
        let words = Tokenizer::words(text);

        // 3. 统计不合规词
        let errors: ErrorCounts = words
            .iter()
            .filter(|word| {
                !vocabulary.contains(word)
                    && !proper_nouns.contains(*word)
                    && !numbers.contains(*word)
                    && !is_all_digits(word)
            })
            .collect();

        let suggestions = if self.enable_suggestions && !errors.is_empty() {
            Suggester::new(vocabulary).suggest_all(errors.keys())
        } else {
            Vec::new()
        };

        tracing::info!(
            "校验完成: {} 个词, {} 个不合规词（{} 次）, 耗时 {}us",
            words.len(),
            errors.len(),
            errors.total(),
            start.elapsed().as_micros()
        );

        ValidationResult {
            compliant: errors.is_empty(),
            errors,
            total_words: words.len(),
            suggestions,
        }
    }
}

/// 纯数字词（正则会把 "3,5" 切成 "3" 和 "5"，标注器的数词集合无法覆盖）
fn is_all_digits(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_numeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{PosTag, SpanishTagger, TaggedToken};

    /// 测试用标注器：按给定词表标注专有名词与数词
    struct FakeTagger {
        proper_nouns: Vec<&'static str>,
        numbers: Vec<&'static str>,
    }

    impl Tagger for FakeTagger {
        fn name(&self) -> &str {
            "fake"
        }

        fn tag(&self, text: &str) -> Vec<TaggedToken> {
            Tokenizer::tokenize(text)
                .into_iter()
                .map(|t| {
                    let is_proper = self.proper_nouns.contains(&t.text.as_str());
                    let like_num = self.numbers.contains(&t.text.as_str());
                    TaggedToken {
                        text: t.text,
                        start: t.start,
                        end: t.end,
                        pos: if is_proper {
                            PosTag::ProperNoun
                        } else {
                            PosTag::Other
                        },
                        like_num,
                    }
                })
                .collect()
        }
    }

    fn spanish_validator() -> Validator {
        Validator::new(Arc::new(SpanishTagger::default()))
    }

    #[test]
    fn test_validate_cat_scenario() {
        let vocabulary = Vocabulary::parse("el\ngato\ncome\npescado");
        let result =
            spanish_validator().validate("El gato Fluffy come 3 pescados hoy", &vocabulary);

        assert!(!result.compliant);
        let errors: Vec<(&str, usize)> = result.errors.iter().collect();
        assert_eq!(errors, vec![("pescados", 1), ("hoy", 1)]);
        assert_eq!(result.total_words, 7);
    }

    #[test]
    fn test_validate_case_insensitive() {
        let vocabulary = Vocabulary::parse("hola\nmundo");
        let result = spanish_validator().validate("Hola mundo hola MUNDO", &vocabulary);
        assert!(result.compliant);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_counts_aggregate_case_variants_in_first_seen_order() {
        let vocabulary = Vocabulary::parse("el");
        let validator = Validator::new(Arc::new(FakeTagger {
            proper_nouns: vec![],
            numbers: vec![],
        }));

        let result = validator.validate("perro el Gato PERRO gato perro", &vocabulary);
        let errors: Vec<(&str, usize)> = result.errors.iter().collect();
        assert_eq!(errors, vec![("perro", 3), ("gato", 2)]);
        assert_eq!(result.errors.total(), 5);
    }

    #[test]
    fn test_fake_tagger_exemptions() {
        let vocabulary = Vocabulary::parse("vive");
        let validator = Validator::new(Arc::new(FakeTagger {
            proper_nouns: vec!["Ana"],
            numbers: vec!["siete"],
        }));

        let result = validator.validate("Ana vive siete", &vocabulary);
        assert!(result.compliant);

        // 专有名词集合按小写比较，其他大小写形式同样豁免
        let result = validator.validate("ANA vive ana", &vocabulary);
        assert!(result.errors.contains("ana"));

        let result = validator.validate("Ana vive ana", &vocabulary);
        assert!(result.compliant);
    }

    #[test]
    fn test_numeric_tokens_never_flagged() {
        let vocabulary = Vocabulary::parse("kilos");
        let result = spanish_validator().validate("3,5 kilos 1/2 kilos 100", &vocabulary);
        assert!(result.compliant, "errors: {:?}", result.errors);
    }

    #[test]
    fn test_vocabulary_words_never_flagged() {
        let vocabulary = Vocabulary::parse("Casa\nGRANDE\nla");
        let result = spanish_validator().validate("La casa grande. CASA Grande", &vocabulary);
        for word in ["casa", "grande", "la"] {
            assert!(!result.errors.contains(word));
        }
        assert_eq!(result.compliant, result.errors.is_empty());
    }

    #[test]
    fn test_no_stemming() {
        let vocabulary = Vocabulary::parse("pescado");
        let result = spanish_validator().validate("pescados pescadito", &vocabulary);
        assert_eq!(result.errors.get("pescados"), Some(1));
        assert_eq!(result.errors.get("pescadito"), Some(1));
    }

    #[test]
    fn test_suggestions_enabled() {
        let vocabulary = Vocabulary::parse("el\ngato\ncome\npescado");
        let validator = spanish_validator().with_suggestions(true);
        let result = validator.validate("El gato come pescados hoy", &vocabulary);

        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].word, "pescados");
        assert_eq!(result.suggestions[0].suggestion, "pescado");
        // 建议不影响结果
        assert!(!result.compliant);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_suggestions_disabled_by_default() {
        let vocabulary = Vocabulary::parse("pescado");
        let result = spanish_validator().validate("pescados", &vocabulary);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_error_counts_serialize_in_order() {
        let counts: ErrorCounts = ["zorro", "abeja", "zorro"].into_iter().collect();
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"zorro":2,"abeja":1}"#);
    }

    #[test]
    fn test_sentence_initial_single_name_exempt() {
        let vocabulary = Vocabulary::parse("come\npescado");
        let result = spanish_validator().validate("María come pescado.", &vocabulary);
        assert!(result.compliant, "{:?}", result.errors);
    }

    #[test]
    fn test_hyphenated_name_parts_exempt() {
        let vocabulary = Vocabulary::parse("vive\ncon");
        let result = spanish_validator().validate("vive con Jean-Pierre", &vocabulary);
        assert!(result.compliant, "{:?}", result.errors);
        assert_eq!(result.total_words, 4);
    }

    #[test]
    fn test_empty_text_is_compliant() {
        let vocabulary = Vocabulary::parse("hola");
        let result = spanish_validator().validate("  ¡! ", &vocabulary);
        assert!(result.compliant);
        assert_eq!(result.total_words, 0);
    }
}
