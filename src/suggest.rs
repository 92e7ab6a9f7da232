//! 词表建议
//!
//! 为不在词表中的词寻找编辑距离最近的词表词（如 "pescados" → "pescado"）

use serde::Serialize;
use strsim::levenshtein;

use crate::vocabulary::Vocabulary;

/// 建议结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// 不合规词
    pub word: String,
    /// 最接近的词表词
    pub suggestion: String,
    /// 编辑距离
    pub distance: usize,
    /// 置信度 (0.0 - 1.0)
    pub confidence: f32,
}

/// 编辑距离匹配器
pub struct Suggester<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> Suggester<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// 查找最接近的词表词
    ///
    /// 阈值：max(1, len/4)；距离相同时取字典序较小者，保证结果稳定
    pub fn suggest(&self, word: &str) -> Option<Suggestion> {
        let word_len = word.chars().count();
        let threshold = std::cmp::max(1, word_len / 4);

        let mut best: Option<(&str, usize)> = None;

        for candidate in self.vocabulary.iter() {
            let candidate_len = candidate.chars().count();
            // 长度差异过大则跳过
            if candidate_len.abs_diff(word_len) > threshold {
                continue;
            }

            let distance = levenshtein(word, candidate);
            if distance == 0 || distance > threshold {
                continue;
            }

            let better = match best {
                None => true,
                Some((best_word, best_distance)) => {
                    distance < best_distance
                        || (distance == best_distance && candidate < best_word)
                }
            };
            if better {
                best = Some((candidate, distance));
            }
        }

        best.map(|(candidate, distance)| {
            let max_len = std::cmp::max(word_len, candidate.chars().count());
            let confidence = if max_len > 0 {
                1.0 - (distance as f32 / max_len as f32)
            } else {
                1.0
            };
            Suggestion {
                word: word.to_string(),
                suggestion: candidate.to_string(),
                distance,
                confidence,
            }
        })
    }

    /// 批量建议（保持输入顺序，无建议的词跳过）
    pub fn suggest_all<'w, I>(&self, words: I) -> Vec<Suggestion>
    where
        I: IntoIterator<Item = &'w str>,
    {
        words.into_iter().filter_map(|w| self.suggest(w)).collect()
    }
}
