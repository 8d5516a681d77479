use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub struct ConsoleLoggerConfig {
    pub level: LevelFilter,
    pub colors: bool,
    pub include_module: bool,
}

impl ConsoleLoggerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let level = var("PHI_LOG")
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);
        let colors = var("PHI_LOG_COLORS").map(|v| v != "0").unwrap_or(true);
        let include_module = var("PHI_LOG_MODULE").map(|v| v != "0").unwrap_or(true);

        Self {
            level,
            colors,
            include_module,
        }
    }
}

impl Default for ConsoleLoggerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Installs the console logger. Fails if a logger is already installed.
pub fn init(config: ConsoleLoggerConfig) -> EngineResult<()> {
    let mut builder = Builder::new();
    builder.filter_level(config.level);

    builder.format(move |buf, record| {
        let level = record.level();
        let style = if config.colors {
            buf.default_level_style(level)
        } else {
            Default::default()
        };

        if config.include_module {
            writeln!(
                buf,
                "[{style}{:<5}{style:#}] {:<14} {}",
                level,
                record.target(),
                record.args()
            )
        } else {
            writeln!(buf, "[{style}{:<5}{style:#}] {}", level, record.args())
        }
    });

    builder
        .try_init()
        .map_err(|e| EngineError::Logger(e.to_string()))
}
