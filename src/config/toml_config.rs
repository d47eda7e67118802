use crate::core::artifacts::{
    ArtifactPaths, DEFAULT_ENCODER_FILE, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE,
};
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{validate_listen_addr, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8501";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_artifact_dir")]
    pub dir: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_encoder")]
    pub encoder: String,
    #[serde(default = "default_scaler")]
    pub scaler: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

fn default_artifact_dir() -> String {
    ".".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL_FILE.to_string()
}

fn default_encoder() -> String {
    DEFAULT_ENCODER_FILE.to_string()
}

fn default_scaler() -> String {
    DEFAULT_SCALER_FILE.to_string()
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
            model: default_model(),
            encoder: default_encoder(),
            scaler: default_scaler(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${ARTIFACT_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PredictError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.artifacts.model.clone(),
            encoder: self.artifacts.encoder.clone(),
            scaler: self.artifacts.scaler.clone(),
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("artifacts.dir", &self.artifacts.dir)?;
        self.artifact_paths().validate()?;
        validate_listen_addr("server.listen_addr", &self.server.listen_addr)?;

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(PredictError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }
}
