use crate::core::document::{LoadOptions, SaveOptions};
use crate::utils::error::{Result, UsfError};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_INDENT: usize = 4;
const MAX_INDENT: usize = 16;
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsfConfig {
    pub format: Option<FormatConfig>,
    pub load: Option<LoadConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatConfig {
    pub indent: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub rollback_on_failure: Option<bool>,
    pub validate: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }
}

impl UsfConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| UsfError::ConfigError {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| UsfError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${USF_INDENT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| UsfError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn indent(&self) -> usize {
        self.format
            .as_ref()
            .and_then(|f| f.indent)
            .unwrap_or(DEFAULT_INDENT)
    }

    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }

    pub fn load_options(&self) -> LoadOptions {
        let load = self.load.clone().unwrap_or_default();
        LoadOptions {
            rollback_on_failure: load.rollback_on_failure.unwrap_or(false),
            validate: load.validate.unwrap_or(true),
        }
    }

    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            indent: self.indent(),
            ..SaveOptions::default()
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_range("format.indent", self.indent(), 0, MAX_INDENT)?;

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validate_non_empty_string("logging.level", level)?;
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}

impl Validate for UsfConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
