pub mod auth;
pub mod company;
pub mod order;
pub mod scan;
pub mod session;

pub use auth::{LoginGrant, RememberedLogin, User};
pub use company::{Company, CompanyChoice};
pub use order::{Order, OrderStatus, SearchOutcome};
pub use scan::{CloudinaryAsset, ScanHistoryEntry, ScanUploadResponse};
pub use session::{LoadPhase, Session, SessionStatus};
