//! 日志基础设施

use std::io;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// 控制台日志始终开启；`file_output` 为真时额外写入按日期分割的日志文件。
    /// `RUST_LOG` 环境变量优先于配置中的日志级别。
    ///
    /// 返回的 guard 必须在进程退出前一直持有，否则文件日志会丢失。
    pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", config.level)));

        if !config.file_output {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stdout).with_ansi(true))
                .try_init()?;
            return Ok(None);
        }

        std::fs::create_dir_all(&config.log_dir)?;
        let file_appender = rolling::daily(&config.log_dir, &config.file_prefix);
        let (writer, guard) = non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false) // 文件中不使用颜色
                    .with_target(false)
                    .with_thread_names(true),
            )
            .with(fmt::layer().with_writer(io::stdout).with_ansi(true)) // 控制台使用颜色
            .try_init()?;

        Ok(Some(guard))
    }
}
