// ============================================================================
// SCAN HISTORY - Historial local de escaneos (más reciente primero)
// ============================================================================
// Se persiste como un único blob JSON. Sin deduplicación. Si la escritura
// falla, la lista en memoria manda hasta el próximo arranque.
// ============================================================================

use std::rc::Rc;

use super::reactivity::{Observable, SubscriptionId};
use crate::models::ScanHistoryEntry;
use crate::utils::constants::KEY_SCAN_HISTORY;
use crate::utils::storage::{load_json, save_json, KeyValueStore};

pub struct ScanHistory<S> {
    store: Rc<S>,
    entries: Observable<Vec<ScanHistoryEntry>>,
}

impl<S> Clone for ScanHistory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            entries: self.entries.clone(),
        }
    }
}

impl<S: KeyValueStore> ScanHistory<S> {
    pub fn new(store: Rc<S>) -> Self {
        Self {
            store,
            entries: Observable::new(Vec::new()),
        }
    }

    /// Carga el blob persistido; ausente o corrupto → lista vacía
    pub async fn restore(&self) -> Vec<ScanHistoryEntry> {
        let entries: Vec<ScanHistoryEntry> = load_json(self.store.as_ref(), KEY_SCAN_HISTORY)
            .await
            .unwrap_or_default();
        log::info!("📋 [HISTORY] {} escaneo(s) restaurado(s)", entries.len());
        self.entries.set(entries.clone());
        entries
    }

    pub async fn append(&self, entry: ScanHistoryEntry) {
        log::info!(
            "💾 [HISTORY] Nuevo escaneo: pedido {} ({})",
            entry.order_id,
            entry.scanned_at
        );
        self.entries.update(|list| list.insert(0, entry));

        let snapshot = self.entries.get();
        if let Err(e) = save_json(self.store.as_ref(), KEY_SCAN_HISTORY, &snapshot).await {
            log::error!("❌ [HISTORY] Error guardando historial: {}", e);
        }
    }

    pub async fn clear(&self) {
        log::info!("🗑️ [HISTORY] Limpiando historial");
        self.entries.set(Vec::new());
        if let Err(e) = self.store.remove(KEY_SCAN_HISTORY).await {
            log::error!("❌ [HISTORY] Error eliminando historial: {}", e);
        }
    }

    pub fn entries(&self) -> Vec<ScanHistoryEntry> {
        self.entries.get()
    }

    pub fn len(&self) -> usize {
        self.entries.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Vec<ScanHistoryEntry>) + 'static,
    {
        self.entries.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.entries.unsubscribe(id)
    }
}
