/// URL base del backend por defecto (puede sobreescribirse con BACKEND_URL)
pub const DEFAULT_BASE_URL: &str = "https://api.tiktak.space";

// Endpoints
pub const ORDERS_PATH: &str = "/api/v1/orders/";
pub const SCAN_UPLOAD_PATH: &str = "/api/v1/scan-upload/";
// El typo "comapnies" es el nombre real del endpoint en el backend
pub const COMPANIES_BY_EMAIL_PATH: &str = "/api/v1/get-comapnies-by-email/";
pub const LOGIN_MOBILE_PATH: &str = "/api/v1/login-mobile/";

/// Parámetro de búsqueda exacta por código de transporte
pub const ORDER_CODE_FILTER: &str = "transport_system_id_in";

/// Código ficticio usado para probar token + URL desde ajustes
pub const CONNECTION_PROBE_CODE: &str = "TEST_CONNECTION_123456";

// Claves de almacenamiento local
pub const KEY_AUTH_TOKEN: &str = "auth_token";
pub const KEY_AUTH_USER: &str = "auth_user";
pub const KEY_AUTH_COMPANY: &str = "auth_company";
pub const KEY_AUTH_BASE_URL: &str = "auth_base_url";
pub const KEY_REMEMBERED_EMAIL: &str = "remembered_email";
pub const KEY_REMEMBERED_SLUG: &str = "remembered_slug";
pub const KEY_API_TOKEN: &str = "api_token";
pub const KEY_BASE_URL: &str = "base_url";
pub const KEY_SCAN_HISTORY: &str = "scan_history";
