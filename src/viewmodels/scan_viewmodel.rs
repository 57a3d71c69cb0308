// ============================================================================
// SCAN VIEWMODEL - Búsqueda de pedidos + foto del paquete
// ============================================================================
// Token y URL salen siempre de la sesión. El historial solo se alimenta
// cuando la subida termina bien.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use super::session_viewmodel::SessionViewModel;
use crate::config::CONFIG;
use crate::error::{AppError, AppResult};
use crate::models::{Order, ScanHistoryEntry, SearchOutcome};
use crate::services::Backend;
use crate::state::scan_history::ScanHistory;
use crate::utils::storage::KeyValueStore;
use crate::utils::validation::non_blank;

/// Ignora lecturas del escáner durante `window` tras una lectura aceptada
#[derive(Debug, Clone)]
pub struct ScanGate {
    window: Duration,
    last_accepted: Option<DateTime<Utc>>,
}

impl ScanGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn try_accept(&mut self, now: DateTime<Utc>) -> bool {
        let open = match self.last_accepted {
            Some(last) => now.signed_duration_since(last) >= self.window,
            None => true,
        };
        if open {
            self.last_accepted = Some(now);
        }
        open
    }

    /// Reabre inmediatamente (p.ej. al cerrar el aviso de "sin resultados")
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

impl Default for ScanGate {
    fn default() -> Self {
        Self::new(CONFIG.scan_debounce())
    }
}

pub struct ScanViewModel<S, B> {
    session: SessionViewModel<S, B>,
    history: ScanHistory<S>,
    backend: Rc<B>,
    gate: Rc<RefCell<ScanGate>>,
}

impl<S, B> Clone for ScanViewModel<S, B> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            history: self.history.clone(),
            backend: Rc::clone(&self.backend),
            gate: Rc::clone(&self.gate),
        }
    }
}

impl<S: KeyValueStore, B: Backend> ScanViewModel<S, B> {
    pub fn new(session: SessionViewModel<S, B>, history: ScanHistory<S>, backend: Rc<B>) -> Self {
        Self::with_gate(session, history, backend, ScanGate::default())
    }

    pub fn with_gate(
        session: SessionViewModel<S, B>,
        history: ScanHistory<S>,
        backend: Rc<B>,
        gate: ScanGate,
    ) -> Self {
        Self {
            session,
            history,
            backend,
            gate: Rc::new(RefCell::new(gate)),
        }
    }

    /// Busca por código exacto (escaneado o tecleado)
    pub async fn search(&self, code: &str) -> AppResult<SearchOutcome> {
        let code = non_blank(code).ok_or(AppError::EmptyOrderCode)?;
        let creds = self.session.credentials()?;

        let orders = self
            .backend
            .search_orders(code, &creds.token, &creds.base_url)
            .await?;
        let outcome = SearchOutcome::from_orders(orders);
        if outcome == SearchOutcome::NoMatch {
            log::info!("⚠️ [SCAN] Ningún pedido para '{}'", code);
        }
        Ok(outcome)
    }

    /// Lectura del escáner. `None` si cae dentro de la ventana anti-rebote.
    pub async fn on_barcode_detected(
        &self,
        payload: &str,
        now: DateTime<Utc>,
    ) -> Option<AppResult<SearchOutcome>> {
        if !self.gate.borrow_mut().try_accept(now) {
            log::debug!("⏱️ [SCAN] Lectura duplicada ignorada: {}", payload);
            return None;
        }
        log::info!("📱 [SCAN] Código escaneado: {}", payload);
        Some(self.search(payload).await)
    }

    pub fn rearm_scanner(&self) {
        self.gate.borrow_mut().reset();
    }

    /// Sube la foto y, si va bien, la registra en el historial
    pub async fn submit_photo(
        &self,
        order: &Order,
        image_path: &str,
    ) -> AppResult<ScanHistoryEntry> {
        self.submit_photo_at(order, image_path, Utc::now()).await
    }

    pub async fn submit_photo_at(
        &self,
        order: &Order,
        image_path: &str,
        scanned_at: DateTime<Utc>,
    ) -> AppResult<ScanHistoryEntry> {
        let creds = self.session.credentials()?;
        let upload = self
            .backend
            .upload_scan(&order.id, image_path, &creds.token, &creds.base_url)
            .await?;

        let entry = ScanHistoryEntry::new(order.clone(), Some(upload.cloudinary.url), scanned_at);
        self.history.append(entry.clone()).await;
        log::info!("✅ [SCAN] Escaneo registrado para pedido {}", order.id);
        Ok(entry)
    }

    pub fn history(&self) -> &ScanHistory<S> {
        &self.history
    }
}
