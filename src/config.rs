use serde::{Deserialize, Serialize};

use crate::utils::constants::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Ventana durante la cual se ignoran nuevas lecturas del escáner
    pub scan_debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BASE_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            scan_debounce_ms: 2000,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.backend_url),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development")
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.enable_logging),
            scan_debounce_ms: option_env!("SCAN_DEBOUNCE_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.scan_debounce_ms),
        }
    }

    /// Nivel de log para wasm-logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }

    pub fn scan_debounce(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.scan_debounce_ms as i64)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
