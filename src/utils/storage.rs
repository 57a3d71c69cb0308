// ============================================================================
// ALMACENAMIENTO CLAVE-VALOR
// ============================================================================
// get/set/remove por clave, cada operación atómica por separado.
// Una lectura fallida equivale a "no hay dato"; una escritura fallida se
// devuelve como StorageError y el llamador decide si la registra y sigue.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("almacenamiento local no disponible")]
    Unavailable,
    #[error("error escribiendo la clave {0}")]
    Write(String),
    #[error("error eliminando la clave {0}")]
    Remove(String),
    #[error("error serializando {key}: {reason}")]
    Serialize { key: String, reason: String },
}

/// Almacén asíncrono de strings por clave. Sin transacciones entre claves.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Serializa a JSON y guarda bajo `key`
pub async fn save_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &json).await
}

/// Lee y deserializa JSON; un valor corrupto se trata como ausente
pub async fn load_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let json = store.get(key).await?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Valor ilegible en '{}': {}", key, e);
            None
        }
    }
}

// ----------------------------------------------------------------------------
// localStorage del navegador
// ----------------------------------------------------------------------------

/// `window.localStorage` vía web-sys
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorageStore {
    async fn get(&self, key: &str) -> Option<String> {
        let storage = Self::storage()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(_) => {
                log::warn!("⚠️ [STORAGE] Error leyendo '{}' de localStorage", key);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|_| StorageError::Remove(key.to_string()))
    }
}

// ----------------------------------------------------------------------------
// Memoria (tests y entornos sin navegador)
// ----------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simula un almacenamiento lleno o bloqueado: set/remove fallan
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write(key.to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Remove(key.to_string()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
