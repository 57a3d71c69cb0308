// ============================================================================
// ORDER SCAN PWA - CORE (sesión, API, historial)
// ============================================================================
// Arquitectura:
// - Models: estructuras compartidas con backend y almacenamiento
// - Services: SOLO comunicación HTTP, sin estado
// - State: estado compartido con Rc<RefCell> + persistencia local
// - ViewModels: lógica de flujo (login, búsqueda, foto)
// - Bindings: fachada JS para las pantallas
// ============================================================================

pub mod bindings;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

use wasm_bindgen::prelude::*;

use crate::config::CONFIG;

pub use error::{ApiError, AppError, AppResult};
pub use models::{
    Company, CompanyChoice, Order, OrderStatus, ScanHistoryEntry, SearchOutcome, Session,
    SessionStatus, User,
};
pub use services::{ApiClient, Backend};
pub use state::{AppState, BrowserAppState, ScanHistory};
pub use utils::storage::{KeyValueStore, LocalStorageStore, MemoryStore, StorageError};
pub use viewmodels::{ScanViewModel, SessionViewModel};

#[wasm_bindgen(start)]
pub fn start() {
    // Panic hook para ver los panics en la consola del navegador
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!(
        "🚀 Order Scan PWA - core listo ({}, backend {})",
        CONFIG.environment,
        CONFIG.backend_url
    );
}
