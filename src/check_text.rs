// 命令行校验工具 - 用词表文件校验文本文件（或标准输入）
//
// 用法: check_text <vocabulary.txt> [text.txt]
// 退出码: 0 合规, 1 存在不合规词, 2 未执行校验
use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use spanish_validator_lib::config::AppConfig;
use spanish_validator_lib::report::render_plain;
use spanish_validator_lib::session::{self, AppState, ValidateOutcome};
use spanish_validator_lib::validator::Validator;
use spanish_validator_lib::vocabulary::Vocabulary;

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(vocabulary_path) = args.next().map(PathBuf::from) else {
        eprintln!("Usage: check_text <vocabulary.txt> [text.txt]");
        std::process::exit(2);
    };
    let text_path = args.next().map(PathBuf::from);

    let config = match AppConfig::load() {
        Ok((config, _)) => config,
        Err(e) => {
            tracing::warn!("加载配置失败，使用默认值: {}", e);
            AppConfig::new()
        }
    };

    // 1. 构建标注器
    let tagger = spanish_validator_lib::build_tagger(&config.tagger)?;
    let validator = Validator::new(tagger).with_suggestions(config.suggestions.enabled);
    let state = AppState::new(Arc::new(validator), &config);

    // 2. 读取词表（本地文件不受上传大小限制）
    let vocabulary = Vocabulary::from_file(&vocabulary_path)
        .with_context(|| format!("Cannot read {}", vocabulary_path.display()))?;
    let summary = session::replace_vocabulary(&state, vocabulary);
    eprintln!("✓ {}", summary.message);

    // 3. 读取文本
    let text = match &text_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?,
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input
        }
    };

    // 4. 校验
    match session::validate_text(&state, &text) {
        ValidateOutcome::Warning { message } => {
            eprintln!("⚠ {}", message);
            std::process::exit(2);
        }
        ValidateOutcome::Report(report) => {
            println!("{}", render_plain(&report.result));
            if !report.result.compliant {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
