//! 西语词法模型
//!
//! 包含封闭词类表（限定词、介词、代词、连词、常用副词）、数词表与专名表。
//! 可使用内置模型，也可从 JSON 文件加载。

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::nlp::tagger::PosTag;
use crate::nlp::tokenizer::normalize_key;

const DETERMINERS: &[&str] = &[
    "el", "la", "los", "las", "lo", "un", "una", "unos", "unas", "este", "esta", "estos", "estas",
    "ese", "esa", "esos", "esas", "aquel", "aquella", "aquellos", "aquellas", "mi", "mis", "tu",
    "tus", "su", "sus", "nuestro", "nuestra", "nuestros", "nuestras", "vuestro", "vuestra",
    "vuestros", "vuestras", "cada", "algún", "alguna", "algunos", "algunas", "ningún", "ninguna",
    "todo", "toda", "todos", "todas", "otro", "otra", "otros", "otras", "mucho", "mucha",
    "muchos", "muchas", "poco", "poca", "pocos", "pocas", "varios", "varias",
];

const ADPOSITIONS: &[&str] = &[
    "a", "al", "ante", "bajo", "con", "contra", "de", "del", "desde", "durante", "en", "entre",
    "hacia", "hasta", "mediante", "para", "por", "según", "sin", "sobre", "tras",
];

const PRONOUNS: &[&str] = &[
    "yo", "tú", "él", "ella", "ello", "nosotros", "nosotras", "vosotros", "vosotras", "ellos",
    "ellas", "usted", "ustedes", "me", "te", "se", "nos", "os", "le", "les", "mí", "ti", "sí",
    "conmigo", "contigo", "consigo", "que", "quien", "quienes", "qué", "quién", "quiénes", "cuál",
    "cuáles", "esto", "eso", "aquello", "algo", "nada", "alguien", "nadie",
];

const CONJUNCTIONS: &[&str] = &[
    "y", "e", "o", "u", "ni", "pero", "sino", "aunque", "porque", "pues", "si", "como", "cuando",
    "mientras",
];

const ADVERBS: &[&str] = &[
    "no", "ya", "muy", "más", "menos", "también", "tampoco", "siempre", "nunca", "hoy", "ayer",
    "mañana", "aquí", "allí", "ahí", "ahora", "luego", "después", "antes", "bien", "mal", "así",
    "casi", "solo", "sólo", "todavía", "aún", "donde", "dónde", "cómo", "cuándo",
];

/// 基数词（含常见无重音拼写）
const NUMBER_WORDS: &[&str] = &[
    "cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve", "diez",
    "once", "doce", "trece", "catorce", "quince", "dieciséis", "dieciseis", "diecisiete",
    "dieciocho", "diecinueve", "veinte", "veintiuno", "veintidós", "veintidos", "veintitrés",
    "veintitres", "veinticuatro", "veinticinco", "veintiséis", "veintiseis", "veintisiete",
    "veintiocho", "veintinueve", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta",
    "ochenta", "noventa", "cien", "ciento", "doscientos", "trescientos", "cuatrocientos",
    "quinientos", "seiscientos", "setecientos", "ochocientos", "novecientos", "mil", "millón",
    "millon", "millones", "billón", "billon", "billones", "trillón", "trillon",
];

/// 常见人名与地名（句首单独出现时据此判定为专有名词）
const PROPER_NOUNS: &[&str] = &[
    "maría", "josé", "juan", "ana", "carlos", "lucía", "pedro", "carmen", "luis", "elena",
    "javier", "laura", "miguel", "isabel", "antonio", "sofía", "pablo", "marta", "diego",
    "paula", "jorge", "sara", "manuel", "rosa", "daniel", "teresa", "francisco", "pilar",
    "alejandro", "andrea", "fernando", "clara", "raúl", "beatriz", "sergio", "cristina",
    "españa", "méxico", "argentina", "colombia", "chile", "perú", "cuba", "venezuela",
    "madrid", "barcelona", "sevilla", "valencia", "bilbao", "granada", "toledo", "málaga",
    "lima", "bogotá", "santiago", "quito", "caracas", "europa", "américa", "dios",
];

/// 词法模型文件格式
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconFile {
    /// 封闭词类：词 → 词性
    #[serde(default)]
    pub closed_class: HashMap<String, PosTag>,
    /// 数词
    #[serde(default)]
    pub number_words: Vec<String>,
    /// 专名表（人名、地名等）
    #[serde(default)]
    pub proper_nouns: Vec<String>,
    /// 是否在内置模型基础上追加（false 表示完全替换）
    #[serde(default = "default_extend_builtin")]
    pub extend_builtin: bool,
}

fn default_extend_builtin() -> bool {
    true
}

/// 词法模型（构建后只读）
#[derive(Debug, Clone)]
pub struct Lexicon {
    closed_class: HashMap<String, PosTag>,
    number_words: HashSet<String>,
    proper_nouns: HashSet<String>,
}

impl Lexicon {
    /// 内置西语模型
    pub fn builtin() -> Self {
        let mut closed_class = HashMap::new();
        // 先插入的词类优先（如 "que" 记为代词而非连词）
        for (words, tag) in [
            (DETERMINERS, PosTag::Determiner),
            (ADPOSITIONS, PosTag::Adposition),
            (PRONOUNS, PosTag::Pronoun),
            (CONJUNCTIONS, PosTag::Conjunction),
            (ADVERBS, PosTag::Adverb),
        ] {
            for word in words {
                closed_class.entry(normalize_key(word)).or_insert(tag);
            }
        }

        let number_words = NUMBER_WORDS.iter().map(|w| normalize_key(w)).collect();
        let proper_nouns = PROPER_NOUNS.iter().map(|w| normalize_key(w)).collect();

        Self {
            closed_class,
            number_words,
            proper_nouns,
        }
    }

    /// 从 JSON 文件加载模型
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("加载词法模型: {:?}", path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取词法模型失败: {}", path.display()))?;
        let file: LexiconFile = serde_json::from_str(&content)
            .with_context(|| format!("解析词法模型失败: {}", path.display()))?;
        let lexicon = Self::from_file(file)?;
        tracing::info!(
            "词法模型加载完成: {} 个封闭词类条目, {} 个数词, {} 个专名",
            lexicon.closed_class.len(),
            lexicon.number_words.len(),
            lexicon.proper_nouns.len()
        );
        Ok(lexicon)
    }

    /// 由已解析的模型文件构建
    pub fn from_file(file: LexiconFile) -> Result<Self> {
        let mut lexicon = if file.extend_builtin {
            Self::builtin()
        } else {
            Self {
                closed_class: HashMap::new(),
                number_words: HashSet::new(),
                proper_nouns: HashSet::new(),
            }
        };

        for (word, tag) in file.closed_class {
            let key = normalize_key(word.trim());
            if key.is_empty() {
                continue;
            }
            if matches!(tag, PosTag::ProperNoun | PosTag::Punctuation) {
                anyhow::bail!("封闭词类不能标注为 {:?}: {}", tag, word);
            }
            lexicon.closed_class.insert(key, tag);
        }
        for word in file.number_words {
            let key = normalize_key(word.trim());
            if !key.is_empty() {
                lexicon.number_words.insert(key);
            }
        }

        for word in file.proper_nouns {
            let key = normalize_key(word.trim());
            if !key.is_empty() {
                lexicon.proper_nouns.insert(key);
            }
        }

        if lexicon.closed_class.is_empty()
            && lexicon.number_words.is_empty()
            && lexicon.proper_nouns.is_empty()
        {
            anyhow::bail!("词法模型为空");
        }

        Ok(lexicon)
    }

    /// 查询封闭词类（参数为比较键）
    pub fn closed_class(&self, key: &str) -> Option<PosTag> {
        self.closed_class.get(key).copied()
    }

    /// 是否为数词（参数为比较键）
    pub fn is_number_word(&self, key: &str) -> bool {
        self.number_words.contains(key)
    }

    /// 是否在专名表中（参数为比较键）
    pub fn is_proper_noun(&self, key: &str) -> bool {
        self.proper_nouns.contains(key)
    }

    /// 是否像数字：阿拉伯数字形式或数词
    pub fn like_num(&self, text: &str) -> bool {
        is_digit_form(text) || self.is_number_word(&normalize_key(text))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 阿拉伯数字形式
///
/// 允许前导符号、千分位/小数分隔符（`1.000`、`3,5`）以及简单分数（`1/2`）
pub fn is_digit_form(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-', '±', '~']);
    let stripped: String = unsigned.chars().filter(|c| *c != ',' && *c != '.').collect();

    if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    let mut parts = stripped.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(num), Some(denom), None) => {
            !num.is_empty()
                && !denom.is_empty()
                && num.chars().all(|c| c.is_ascii_digit())
                && denom.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_digit_form() {
        assert!(is_digit_form("3"));
        assert!(is_digit_form("1.000"));
        assert!(is_digit_form("3,5"));
        assert!(is_digit_form("-12"));
        assert!(is_digit_form("1/2"));
        assert!(!is_digit_form("1/2/3"));
        assert!(!is_digit_form("3a"));
        assert!(!is_digit_form(""));
        assert!(!is_digit_form("."));
    }

    #[test]
    fn test_builtin_number_words() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.like_num("tres"));
        assert!(lexicon.like_num("Veintidós"));
        assert!(lexicon.like_num("MIL"));
        assert!(!lexicon.like_num("gato"));
    }

    #[test]
    fn test_builtin_closed_class_priority() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.closed_class("el"), Some(PosTag::Determiner));
        assert_eq!(lexicon.closed_class("que"), Some(PosTag::Pronoun));
        assert_eq!(lexicon.closed_class("según"), Some(PosTag::Adposition));
        assert_eq!(lexicon.closed_class("gato"), None);
    }

    #[test]
    fn test_load_extends_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"closed_class": {{"vaya": "adverb"}}, "number_words": ["docena"], "proper_nouns": ["Itziar"]}}"#
        )
        .unwrap();

        let lexicon = Lexicon::load(file.path()).unwrap();
        assert_eq!(lexicon.closed_class("vaya"), Some(PosTag::Adverb));
        assert!(lexicon.like_num("docena"));
        assert!(lexicon.is_proper_noun("itziar"));
        // 内置条目仍然存在
        assert!(lexicon.like_num("dos"));
        assert!(lexicon.is_proper_noun("maría"));
    }

    #[test]
    fn test_load_replace_builtin() {
        let file = LexiconFile {
            closed_class: HashMap::new(),
            number_words: vec!["docena".to_string()],
            proper_nouns: Vec::new(),
            extend_builtin: false,
        };
        let lexicon = Lexicon::from_file(file).unwrap();
        assert!(lexicon.like_num("docena"));
        assert!(!lexicon.like_num("dos"));
        assert_eq!(lexicon.closed_class("el"), None);
        assert!(!lexicon.is_proper_noun("maría"));
    }

    #[test]
    fn test_builtin_proper_nouns() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.is_proper_noun("maría"));
        assert!(lexicon.is_proper_noun("madrid"));
        assert!(!lexicon.is_proper_noun("gato"));
    }

    #[test]
    fn test_load_rejects_empty_model() {
        let file = LexiconFile {
            extend_builtin: false,
            ..Default::default()
        };
        assert!(Lexicon::from_file(file).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Lexicon::load(&dir.path().join("missing.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Lexicon::load(file.path()).is_err());
    }
}
