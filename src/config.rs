//! 服务配置
//!
//! 配置来自 TOML 文件，找不到文件时使用默认值。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 默认的配置文件搜索路径
const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

/// 目录服务配置结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 跨域配置
    pub cors: CorsConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 商品目录配置
    pub catalog: CatalogConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 跨域配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// 允许访问的前端地址
    pub allowed_origin: String,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
    /// 日志文件目录
    pub log_dir: PathBuf,
    /// 日志文件名前缀
    pub file_prefix: String,
    /// 是否同时写入日志文件
    pub file_output: bool,
}

/// 商品目录配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// 启动时是否写入示例商品
    pub seed_sample_data: bool,
    /// 商品 ID 长度
    pub id_length: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            timeout_seconds: 30,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:3001".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            file_prefix: "catalog".to_string(),
            file_output: false,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            id_length: 6,
        }
    }
}

impl HttpConfig {
    /// 监听地址，形如 `127.0.0.1:3000`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }

        if self.cors.allowed_origin.is_empty() {
            return Err(ConfigError::Validation("跨域来源不能为空".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }
        if self.logging.file_output && self.logging.file_prefix.is_empty() {
            return Err(ConfigError::Validation("日志文件前缀不能为空".to_string()));
        }

        // 过短的 ID 碰撞概率不可忽略
        if self.catalog.id_length < 4 {
            return Err(ConfigError::Validation(format!(
                "商品 ID 长度至少为 4: {}",
                self.catalog.id_length
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 加载并验证配置
///
/// 显式给出的路径必须存在；否则依次尝试默认路径，都不存在时使用默认配置。
/// 返回配置以及实际读取的文件路径（使用默认配置时为 `None`）。
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists()),
    };

    let config = match &source {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    config.validate()?;
    Ok((config, source))
}
