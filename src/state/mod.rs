// ============================================================================
// STATE MODULE - Estado compartido con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod reactivity;
pub mod scan_history;
pub mod settings_state;

pub use app_state::{AppState, BrowserAppState};
pub use reactivity::{Observable, SubscriptionId};
pub use scan_history::ScanHistory;
pub use settings_state::{test_connection, ApiSettings, ConnectionStatus, SettingsState};
