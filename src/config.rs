// src/config.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::highlight::DEFAULT_HIGHLIGHT_COLOR;

/// 配置文件路径覆盖（环境变量）
pub const CONFIG_PATH_ENV: &str = "SPANISH_VALIDATOR_CONFIG";

// ============================================================================
// Web 服务配置
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 请求体上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 解析监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let host = self.host.trim();
        // IPv6 地址需要加方括号
        let addr = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, self.port)
        } else {
            format!("{}:{}", host, self.port)
        };
        addr.parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("无效的监听地址 {}: {}", addr, e))
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            anyhow::bail!("监听地址不能为空");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("请求体上限必须大于 0");
        }
        self.socket_addr()?;
        Ok(())
    }
}

// ============================================================================
// 标注器配置
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaggerConfig {
    /// 自定义词法模型（JSON），为空时使用内置模型
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

// ============================================================================
// 高亮配置
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighlightConfig {
    /// CSS 颜色（如 "red"、"#d33"、"rgb(200, 0, 0)"）
    #[serde(default = "default_highlight_color")]
    pub color: String,
}

fn default_highlight_color() -> String {
    DEFAULT_HIGHLIGHT_COLOR.to_string()
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            color: default_highlight_color(),
        }
    }
}

impl HighlightConfig {
    /// 颜色值会写入 style 属性，只允许安全字符
    pub fn validate(&self) -> Result<()> {
        let color = self.color.trim();
        if color.is_empty() {
            anyhow::bail!("高亮颜色不能为空");
        }
        let allowed = |c: char| c.is_ascii_alphanumeric() || " #(),.%".contains(c);
        if !color.chars().all(allowed) {
            anyhow::bail!("高亮颜色包含非法字符: {}", color);
        }
        Ok(())
    }
}

// ============================================================================
// 词表配置
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VocabularyConfig {
    /// 词表文件上限（字节）
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    1024 * 1024
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

// ============================================================================
// 词表建议配置
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestionConfig {
    /// 为不合规词给出编辑距离最近的词表词
    #[serde(default = "default_enable_suggestions")]
    pub enabled: bool,
}

fn default_enable_suggestions() -> bool {
    true
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: default_enable_suggestions(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tagger: TaggerConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        let app_dir = config_dir.join("SpanishValidator");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("config.json"))
    }

    /// 加载配置
    ///
    /// 返回 (配置, 是否需要保存)。配置文件不存在时返回默认配置并要求保存
    pub fn load() -> Result<(Self, bool)> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<(Self, bool)> {
        tracing::info!("尝试从以下路径加载配置: {:?}", path);

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: AppConfig = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("解析配置文件失败 {:?}: {}", path, e))?;
            tracing::info!("配置加载成功");
            Ok((config, false))
        } else {
            tracing::warn!("配置文件不存在，创建并返回默认配置");
            Ok((Self::new(), true))
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.highlight.validate()?;
        if self.vocabulary.max_upload_bytes == 0 {
            anyhow::bail!("词表文件上限必须大于 0");
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tracing::info!("保存配置到: {:?}", path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // 原子写入：先写临时文件，再替换
        let temp_path = path.with_extension("json.tmp");
        let backup_path = path.with_extension("json.bak");

        std::fs::write(&temp_path, &content).map_err(|e| {
            tracing::error!("写入临时文件失败: {}", e);
            e
        })?;

        // 目标文件存在时先备份，替换成功后删除备份
        if path.exists() {
            if backup_path.exists() {
                let _ = std::fs::remove_file(&backup_path);
            }
            std::fs::rename(path, &backup_path).map_err(|e| {
                tracing::error!("备份旧配置文件失败: {}", e);
                e
            })?;
        }

        match std::fs::rename(&temp_path, path) {
            Ok(_) => {
                let _ = std::fs::remove_file(&backup_path);
                tracing::info!("配置保存成功");
                Ok(())
            }
            Err(e) => {
                tracing::error!("重命名临时文件失败: {}", e);
                // 尝试恢复备份
                if backup_path.exists() {
                    if let Err(restore_err) = std::fs::rename(&backup_path, path) {
                        tracing::error!("恢复备份失败: {}", restore_err);
                    } else {
                        tracing::info!("已从备份恢复配置");
                    }
                }
                Err(e.into())
            }
        }
    }
}
