// ============================================================================
// BINDINGS - Fachada JavaScript para las pantallas
// ============================================================================
// Adaptador fino: convierte argumentos/resultados a JSON y cada operación
// async en una Promise. Los errores llegan a JS como su mensaje legible.
// ============================================================================

use js_sys::Promise;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::error::AppError;
use crate::models::{Company, Order, SearchOutcome};
use crate::state::{test_connection, ApiSettings, BrowserAppState, ConnectionStatus};

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, JsValue> {
    let json = String::from(js_sys::JSON::stringify(value)?);
    serde_json::from_str(&json).map_err(|e| JsValue::from_str(&format!("Datos inválidos: {}", e)))
}

fn app_error(e: AppError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn outcome_json(outcome: &SearchOutcome) -> serde_json::Value {
    let kind = match outcome {
        SearchOutcome::NoMatch => "none",
        SearchOutcome::Single(_) => "single",
        SearchOutcome::Multiple(_) => "multiple",
    };
    json!({ "kind": kind, "orders": outcome.orders() })
}

fn settings_json(settings: &ApiSettings) -> serde_json::Value {
    json!({ "baseUrl": settings.base_url, "hasToken": settings.has_token() })
}

#[wasm_bindgen]
pub struct ScanApp {
    state: BrowserAppState,
}

/// Carga sesión, historial y ajustes desde localStorage
#[wasm_bindgen(js_name = loadScanApp)]
pub async fn load_scan_app() -> Result<ScanApp, JsValue> {
    Ok(ScanApp {
        state: BrowserAppState::load_browser().await,
    })
}

#[wasm_bindgen]
impl ScanApp {
    /// Estado de sesión para la UI (el token no se expone)
    pub fn session(&self) -> Result<JsValue, JsValue> {
        let session = self.state.session.snapshot();
        let remembered = self.state.session.remembered();
        to_js(&json!({
            "status": format!("{:?}", session.status()),
            "isAuthenticated": session.is_authenticated(),
            "isLoading": session.is_loading(),
            "user": session.user,
            "selectedCompany": session.selected_company,
            "baseUrl": session.base_url,
            "rememberedEmail": remembered.email,
            "rememberedSlug": remembered.slug,
        }))
    }

    #[wasm_bindgen(js_name = lookupCompanies)]
    pub fn lookup_companies(&self, email: String) -> Promise {
        let session = self.state.session.clone();
        future_to_promise(async move {
            let companies = session
                .lookup_companies_by_email(&email)
                .await
                .map_err(app_error)?;
            to_js(&companies)
        })
    }

    pub fn login(&self, email: String, password: String, company: JsValue) -> Promise {
        let session = self.state.session.clone();
        future_to_promise(async move {
            let company: Company = from_js(&company)?;
            session
                .login(&email, &password, company)
                .await
                .map_err(app_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn logout(&self) -> Promise {
        let session = self.state.session.clone();
        future_to_promise(async move {
            session.logout().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = updateBaseUrl)]
    pub fn update_base_url(&self, url: String) -> Promise {
        let session = self.state.session.clone();
        future_to_promise(async move {
            session.update_base_url(&url).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn search(&self, code: String) -> Promise {
        let scanner = self.state.scanner.clone();
        future_to_promise(async move {
            let outcome = scanner.search(&code).await.map_err(app_error)?;
            to_js(&outcome_json(&outcome))
        })
    }

    /// Resuelve `null` si la lectura se ignora por anti-rebote
    #[wasm_bindgen(js_name = onBarcodeDetected)]
    pub fn on_barcode_detected(&self, payload: String) -> Promise {
        let scanner = self.state.scanner.clone();
        future_to_promise(async move {
            match scanner
                .on_barcode_detected(&payload, chrono::Utc::now())
                .await
            {
                None => Ok(JsValue::NULL),
                Some(result) => to_js(&outcome_json(&result.map_err(app_error)?)),
            }
        })
    }

    #[wasm_bindgen(js_name = rearmScanner)]
    pub fn rearm_scanner(&self) {
        self.state.scanner.rearm_scanner();
    }

    #[wasm_bindgen(js_name = submitPhoto)]
    pub fn submit_photo(&self, order: JsValue, image_path: String) -> Promise {
        let scanner = self.state.scanner.clone();
        future_to_promise(async move {
            let order: Order = from_js(&order)?;
            let entry = scanner
                .submit_photo(&order, &image_path)
                .await
                .map_err(app_error)?;
            to_js(&entry)
        })
    }

    pub fn history(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.history.entries())
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&self) -> Promise {
        let history = self.state.history.clone();
        future_to_promise(async move {
            history.clear().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Ajustes guardados para rellenar la pantalla (el token no se expone)
    pub fn settings(&self) -> Result<JsValue, JsValue> {
        to_js(&settings_json(&self.state.settings.current()))
    }

    #[wasm_bindgen(js_name = saveSettings)]
    pub fn save_settings(&self, token: String, base_url: String) -> Promise {
        let settings = self.state.settings.clone();
        future_to_promise(async move {
            let saved = settings.save(&token, &base_url).await.map_err(app_error)?;
            to_js(&settings_json(&saved))
        })
    }

    /// "reachable" | "invalid-token" | "unavailable"
    #[wasm_bindgen(js_name = testConnection)]
    pub fn test_connection(&self, token: String, base_url: String) -> Promise {
        let state = self.state.clone();
        future_to_promise(async move {
            let status = test_connection(state.backend(), &token, &base_url)
                .await
                .map_err(app_error)?;
            let label = match status {
                ConnectionStatus::Reachable => "reachable",
                ConnectionStatus::InvalidToken => "invalid-token",
                ConnectionStatus::Unavailable => "unavailable",
            };
            Ok(JsValue::from_str(label))
        })
    }
}
