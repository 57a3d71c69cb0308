// ============================================================================
// SETTINGS STATE - Token de API manual + URL base (pantalla de ajustes)
// ============================================================================

use std::rc::Rc;

use super::reactivity::Observable;
use crate::config::CONFIG;
use crate::error::{ApiError, AppError, AppResult};
use crate::services::Backend;
use crate::utils::constants::{CONNECTION_PROBE_CODE, KEY_API_TOKEN, KEY_BASE_URL};
use crate::utils::storage::KeyValueStore;
use crate::utils::validation::non_blank;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub token: Option<String>,
    pub base_url: String,
}

impl ApiSettings {
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            token: None,
            base_url: CONFIG.backend_url.clone(),
        }
    }
}

/// Resultado de "probar conexión"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// El backend aceptó el token (haya o no pedidos para el código de prueba)
    Reachable,
    InvalidToken,
    Unavailable,
}

pub struct SettingsState<S> {
    store: Rc<S>,
    settings: Observable<ApiSettings>,
}

impl<S> Clone for SettingsState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            settings: self.settings.clone(),
        }
    }
}

impl<S: KeyValueStore> SettingsState<S> {
    pub fn new(store: Rc<S>) -> Self {
        Self {
            store,
            settings: Observable::new(ApiSettings::default()),
        }
    }

    pub async fn restore(&self) -> ApiSettings {
        let token = self.store.get(KEY_API_TOKEN).await;
        let base_url = self
            .store
            .get(KEY_BASE_URL)
            .await
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| CONFIG.backend_url.clone());
        let settings = ApiSettings { token, base_url };
        self.settings.set(settings.clone());
        settings
    }

    /// Guarda token (obligatorio) y URL (vacía → URL por defecto)
    pub async fn save(&self, token: &str, base_url: &str) -> AppResult<ApiSettings> {
        let token = non_blank(token).ok_or(AppError::EmptyApiToken)?;
        let base_url = non_blank(base_url)
            .map(str::to_string)
            .unwrap_or_else(|| CONFIG.backend_url.clone());

        let settings = ApiSettings {
            token: Some(token.to_string()),
            base_url,
        };
        self.settings.set(settings.clone());

        if let Err(e) = self.store.set(KEY_API_TOKEN, token).await {
            log::error!("❌ [SETTINGS] Error guardando token: {}", e);
        }
        if let Err(e) = self.store.set(KEY_BASE_URL, &settings.base_url).await {
            log::error!("❌ [SETTINGS] Error guardando URL: {}", e);
        }
        log::info!("💾 [SETTINGS] Configuración guardada ({})", settings.base_url);
        Ok(settings)
    }

    pub fn current(&self) -> ApiSettings {
        self.settings.get()
    }
}

/// Búsqueda de prueba con un código ficticio para validar token + URL
pub async fn test_connection<B: Backend>(
    backend: &B,
    token: &str,
    base_url: &str,
) -> AppResult<ConnectionStatus> {
    let token = non_blank(token).ok_or(AppError::EmptyApiToken)?;
    let base_url = non_blank(base_url).unwrap_or(CONFIG.backend_url.as_str());

    log::info!("🧪 [SETTINGS] Probando conexión con {}", base_url);
    let status = match backend
        .search_orders(CONNECTION_PROBE_CODE, token, base_url)
        .await
    {
        Ok(_) => ConnectionStatus::Reachable,
        Err(ApiError::Auth) => ConnectionStatus::InvalidToken,
        Err(ApiError::ServiceUnavailable) => ConnectionStatus::Unavailable,
        Err(e) => {
            log::warn!("⚠️ [SETTINGS] Prueba con error no bloqueante: {}", e);
            ConnectionStatus::Reachable
        }
    };
    Ok(status)
}
