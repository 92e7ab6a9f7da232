//! 西语规则标注器
//!
//! 自带分词（与词边界正则相互独立），再按规则识别数词、封闭词类与专有名词

use std::collections::HashSet;

use crate::nlp::lexicon::Lexicon;
use crate::nlp::tagger::{PosTag, TaggedToken, Tagger};
use crate::nlp::tokenizer::normalize_key;

/// 句末标点
const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', '…'];

/// 词内撇号（两侧均为字母时保留在词内；连字符始终单独成 Token）
const WORD_JOINERS: [char; 2] = ['\'', '’'];

/// 数字分隔符（两侧均为数字时保留在词内）
const NUMBER_JOINERS: [char; 3] = ['.', ',', '/'];

/// 标注器内部分词结果
#[derive(Debug, Clone)]
struct RawToken {
    text: String,
    start: usize,
    end: usize,
    is_word: bool,
    /// 是否位于句首
    sentence_initial: bool,
}

/// 西语规则标注器（构建一次，只读复用）
pub struct SpanishTagger {
    lexicon: Lexicon,
}

impl SpanishTagger {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// 分词
    ///
    /// 空白切分；标点与连字符单独成 Token；撇号夹在字母间、`.`/`,`/`/` 夹在数字间时保留在词内
    fn split(text: &str) -> Vec<RawToken> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut tokens = Vec::new();
        let mut sentence_start = true;
        let mut word_start: Option<usize> = None;

        let flush = |tokens: &mut Vec<RawToken>,
                     word_start: &mut Option<usize>,
                     end: usize,
                     sentence_start: &mut bool| {
            if let Some(start) = word_start.take() {
                tokens.push(RawToken {
                    text: text[start..end].to_string(),
                    start,
                    end,
                    is_word: true,
                    sentence_initial: *sentence_start,
                });
                *sentence_start = false;
            }
        };

        for (i, &(idx, ch)) in chars.iter().enumerate() {
            if is_word_char(ch) {
                if word_start.is_none() {
                    word_start = Some(idx);
                }
                continue;
            }

            // 词内连接符：前后字符类型决定是否保留
            if word_start.is_some() {
                let prev = chars[i - 1].1;
                let next = chars.get(i + 1).map(|&(_, c)| c);
                let joins_letters = WORD_JOINERS.contains(&ch)
                    && prev.is_alphabetic()
                    && next.is_some_and(|c| c.is_alphabetic());
                let joins_digits = NUMBER_JOINERS.contains(&ch)
                    && prev.is_ascii_digit()
                    && next.is_some_and(|c| c.is_ascii_digit());
                if joins_letters || joins_digits {
                    continue;
                }
            }

            flush(&mut tokens, &mut word_start, idx, &mut sentence_start);

            if ch.is_whitespace() {
                if ch == '\n' || ch == '\r' {
                    sentence_start = true;
                }
                continue;
            }

            let end = idx + ch.len_utf8();
            tokens.push(RawToken {
                text: text[idx..end].to_string(),
                start: idx,
                end,
                is_word: false,
                sentence_initial: false,
            });
            if SENTENCE_TERMINATORS.contains(&ch) {
                sentence_start = true;
            }
        }

        flush(&mut tokens, &mut word_start, text.len(), &mut sentence_start);

        tokens
    }

    /// 是否具有专有名词形态：首字母大写、非数词、非封闭词类
    fn is_name_shaped(&self, token: &RawToken) -> bool {
        token.is_word
            && starts_uppercase(&token.text)
            && !self.lexicon.like_num(&token.text)
            && self
                .lexicon
                .closed_class(&normalize_key(&token.text))
                .is_none()
    }

    /// 句中出现过的专名形态词（比较键）
    fn mid_sentence_names(&self, tokens: &[RawToken]) -> HashSet<String> {
        tokens
            .iter()
            .filter(|t| !t.sentence_initial && self.is_name_shaped(t))
            .map(|t| normalize_key(&t.text))
            .collect()
    }

    fn classify(
        &self,
        tokens: &[RawToken],
        i: usize,
        mid_sentence_names: &HashSet<String>,
    ) -> (PosTag, bool) {
        let token = &tokens[i];
        if !token.is_word {
            return (PosTag::Punctuation, false);
        }

        if self.lexicon.like_num(&token.text) {
            return (PosTag::Numeral, true);
        }

        if let Some(tag) = self.lexicon.closed_class(&normalize_key(&token.text)) {
            return (tag, false);
        }

        if self.is_name_shaped(token) {
            if !token.sentence_initial {
                return (PosTag::ProperNoun, false);
            }
            // 句首大写本身无法区分，需满足以下任一条件：
            // 在专名表中、同一词在句中也以大写出现、后面紧跟另一个专名形态的词
            let key = normalize_key(&token.text);
            let followed_by_name = tokens
                .get(i + 1)
                .is_some_and(|next| self.is_name_shaped(next));
            if self.lexicon.is_proper_noun(&key)
                || mid_sentence_names.contains(&key)
                || followed_by_name
            {
                return (PosTag::ProperNoun, false);
            }
        }

        (PosTag::Other, false)
    }
}

impl Default for SpanishTagger {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

impl Tagger for SpanishTagger {
    fn name(&self) -> &str {
        "es-rules"
    }

    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let tokens = Self::split(text);
        let mid_sentence_names = self.mid_sentence_names(&tokens);
        let tagged: Vec<TaggedToken> = (0..tokens.len())
            .map(|i| {
                let (pos, like_num) = self.classify(&tokens, i, &mid_sentence_names);
                TaggedToken {
                    text: tokens[i].text.clone(),
                    start: tokens[i].start,
                    end: tokens[i].end,
                    pos,
                    like_num,
                }
            })
            .collect();

        tracing::debug!(
            "标注完成: {} 个 Token, 专有名词 {} 个",
            tagged.len(),
            tagged.iter().filter(|t| t.is_proper_noun()).count()
        );

        tagged
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || is_combining_mark(ch)
}

/// 组合附加符号（分解形式的重音）
fn is_combining_mark(ch: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&ch)
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_uppercase())
}
