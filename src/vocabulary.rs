// 词表工具
//
// 词表文件格式：UTF-8 纯文本，每行一个词；空行忽略，首尾空格去除，统一转小写

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::nlp::normalize_key;

/// 标准化词汇（去除首尾空格 + NFC + 小写）
pub fn normalize_word(word: &str) -> String {
    normalize_key(word.trim())
}

/// 词表（小写、去重、无序）
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: HashSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从上传的原始字节解析词表
    ///
    /// 非 UTF-8 内容直接返回错误
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let content = std::str::from_utf8(bytes).context("词表文件不是有效的 UTF-8 文本")?;
        Ok(Self::parse(content))
    }

    /// 从文件加载词表
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("读取词表失败: {}", path.display()))?;
        Self::from_bytes(&bytes)
    }

    /// 按行解析词表
    pub fn parse(content: &str) -> Self {
        content.lines().collect()
    }

    /// 插入词汇，返回是否为新词
    pub fn insert(&mut self, word: &str) -> bool {
        let normalized = normalize_word(word);
        if normalized.is_empty() {
            return false;
        }
        self.words.insert(normalized)
    }

    /// 查询（参数需为比较键）
    pub fn contains(&self, key: &str) -> bool {
        self.words.contains(key)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|s| s.as_str())
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocabulary = Self::new();
        for word in iter {
            vocabulary.insert(word.as_ref());
        }
        vocabulary
    }
}
