pub mod scan_viewmodel;
pub mod session_viewmodel;

pub use scan_viewmodel::{ScanGate, ScanViewModel};
pub use session_viewmodel::{Credentials, SessionViewModel};
