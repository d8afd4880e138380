//! Logging Module - 统一的日志系统
//!
//! tracing-based logging shared by both tools:
//! - full log written to a daily-rotated file (system temp dir by default)
//! - stderr layer kept quiet unless `--verbose`, since progress goes to stdout
//! - old log files pruned to `max_files`
//!
//! # Examples
//!
//! ```no_run
//! use shared_utils::logging::{LogConfig, init_logging};
//! use tracing::info;
//!
//! init_logging("img_normalize", LogConfig::default()).expect("Failed to initialize logging");
//! info!("Program started");
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// 日志配置结构
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志目录路径（默认为系统临时目录）
    pub log_dir: PathBuf,
    /// 保留的最大日志文件数量，默认5个
    pub max_files: usize,
    /// File log level, default Info
    pub level: Level,
    /// Events at or above this level are echoed to stderr
    pub stderr_level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: std::env::temp_dir(),
            max_files: 5,
            level: Level::INFO,
            stderr_level: Level::ERROR,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.log_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_max_files(mut self, count: usize) -> Self {
        self.max_files = count;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_stderr_level(mut self, level: Level) -> Self {
        self.stderr_level = level;
        self
    }

    /// `--verbose`: debug everywhere, including stderr.
    pub fn verbose(self) -> Self {
        self.with_level(Level::DEBUG).with_stderr_level(Level::DEBUG)
    }
}

/// 初始化日志系统
///
/// Log file name: `{program_name}.log` (rotated daily by tracing-appender).
/// `RUST_LOG` overrides the default filter, which covers the program's own
/// crate and `shared_utils`.
pub fn init_logging(program_name: &str, config: LogConfig) -> Result<()> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", config.log_dir))?;

    let log_file_name = format!("{}.log", program_name);
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, &log_file_name);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},shared_utils={}",
            program_name, config.level, config.level
        ))
    });

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false) // 文件中不使用ANSI颜色代码
        .with_target(true)
        .with_line_number(true);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_line_number(false)
        .with_filter(LevelFilter::from_level(config.stderr_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        program = program_name,
        log_dir = ?config.log_dir,
        log_file = log_file_name,
        max_files = config.max_files,
        level = ?config.level,
        "Logging system initialized"
    );

    cleanup_old_logs(&config.log_dir, program_name, config.max_files)?;

    Ok(())
}

/// 清理旧的日志文件，只保留最近的N个
fn cleanup_old_logs(log_dir: &Path, program_name: &str, max_files: usize) -> Result<()> {
    use std::fs;

    let entries = fs::read_dir(log_dir)
        .with_context(|| format!("Failed to read log directory: {:?}", log_dir))?;

    let mut log_files: Vec<(PathBuf, std::time::SystemTime)> = Vec::new();

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        // rotated names look like `img_normalize.log.2026-10-19`
        let matches = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with(&format!("{}.log", program_name)))
            .unwrap_or(false);
        if !matches {
            continue;
        }

        if let Ok(modified) = fs::metadata(&path).and_then(|m| m.modified()) {
            log_files.push((path, modified));
        }
    }

    if log_files.len() > max_files {
        // newest first
        log_files.sort_by(|a, b| b.1.cmp(&a.1));

        for (path, _) in log_files.iter().skip(max_files) {
            if let Err(e) = fs::remove_file(path) {
                tracing::warn!(path = ?path, error = %e, "Failed to remove old log file");
            } else {
                tracing::debug!(path = ?path, "Removed old log file");
            }
        }
    }

    Ok(())
}
