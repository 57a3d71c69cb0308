// ============================================================================
// APP STATE - Contexto inyectable compartido por todas las pantallas
// ============================================================================
// Un mismo almacén y un mismo backend para sesión, historial y ajustes.
// Nada estático: cada AppState es independiente (tests incluidos).
// ============================================================================

use std::rc::Rc;

use super::scan_history::ScanHistory;
use super::settings_state::SettingsState;
use crate::services::{ApiClient, Backend};
use crate::utils::storage::{KeyValueStore, LocalStorageStore};
use crate::viewmodels::{ScanGate, ScanViewModel, SessionViewModel};

pub struct AppState<S, B> {
    pub session: SessionViewModel<S, B>,
    pub history: ScanHistory<S>,
    pub settings: SettingsState<S>,
    pub scanner: ScanViewModel<S, B>,
    backend: Rc<B>,
}

/// Contexto del navegador: localStorage + fetch
pub type BrowserAppState = AppState<LocalStorageStore, ApiClient>;

impl<S, B> Clone for AppState<S, B> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            history: self.history.clone(),
            settings: self.settings.clone(),
            scanner: self.scanner.clone(),
            backend: Rc::clone(&self.backend),
        }
    }
}

impl<S: KeyValueStore, B: Backend> AppState<S, B> {
    /// Sin restaurar todavía; la sesión queda en Uninitialized
    pub fn new(store: Rc<S>, backend: Rc<B>) -> Self {
        Self::with_gate(store, backend, ScanGate::default())
    }

    pub fn with_gate(store: Rc<S>, backend: Rc<B>, gate: ScanGate) -> Self {
        let session = SessionViewModel::new(Rc::clone(&store), Rc::clone(&backend));
        let history = ScanHistory::new(Rc::clone(&store));
        let settings = SettingsState::new(store);
        let scanner =
            ScanViewModel::with_gate(session.clone(), history.clone(), Rc::clone(&backend), gate);
        Self {
            session,
            history,
            settings,
            scanner,
            backend,
        }
    }

    /// Construye y restaura sesión, historial y ajustes
    pub async fn load(store: Rc<S>, backend: Rc<B>) -> Self {
        let state = Self::new(store, backend);
        state.restore().await;
        state
    }

    pub async fn restore(&self) {
        self.session.restore().await;
        self.history.restore().await;
        self.settings.restore().await;
        log::info!("🚀 [APP] Estado inicial cargado");
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl BrowserAppState {
    pub async fn load_browser() -> Self {
        Self::load(Rc::new(LocalStorageStore::new()), Rc::new(ApiClient::new())).await
    }
}
