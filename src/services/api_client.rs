// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// La base_url llega en cada llamada: el cliente no lee estado de sesión.
// Un solo intento por petición, sin reintentos. La interpretación de
// (status, body) vive en funciones puras para poder probarla sin navegador.
// ============================================================================

use gloo_net::http::{Request, Response};
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::error::ApiError;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::company::{CompaniesRequest, CompaniesResponse};
use crate::models::order::OrdersPage;
use crate::models::{Company, LoginGrant, Order, ScanUploadResponse};
use crate::utils::constants::{
    COMPANIES_BY_EMAIL_PATH, LOGIN_MOBILE_PATH, ORDERS_PATH, ORDER_CODE_FILTER, SCAN_UPLOAD_PATH,
};
use crate::utils::validation::{endpoint, image_mime_type, upload_file_name};

/// Operaciones contra el backend REST
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn search_orders(
        &self,
        code: &str,
        token: &str,
        base_url: &str,
    ) -> Result<Vec<Order>, ApiError>;

    async fn upload_scan(
        &self,
        order_id: &str,
        image_path: &str,
        token: &str,
        base_url: &str,
    ) -> Result<ScanUploadResponse, ApiError>;

    async fn get_companies_by_email(
        &self,
        email: &str,
        base_url: &str,
    ) -> Result<Vec<Company>, ApiError>;

    async fn login_mobile(
        &self,
        email: &str,
        password: &str,
        slug: &str,
        base_url: &str,
    ) -> Result<LoginGrant, ApiError>;
}

/// Cliente API del navegador (gloo-net / fetch)
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiClient;

impl ApiClient {
    pub fn new() -> Self {
        Self
    }
}

fn auth_header(token: &str) -> String {
    format!("Token {}", token)
}

fn network_error(e: impl std::fmt::Display) -> ApiError {
    log::error!("❌ [API] Error de red: {}", e);
    ApiError::Network(e.to_string())
}

/// Status + cuerpo como texto; leer el cuerpo también puede fallar en red
async fn read_response(response: Response) -> Result<(u16, String), ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    Ok((status, body))
}

fn js_error(context: &str, e: JsValue) -> ApiError {
    log::error!("❌ [API] {}: {:?}", context, e);
    ApiError::Upload(context.to_string())
}

impl Backend for ApiClient {
    async fn search_orders(
        &self,
        code: &str,
        token: &str,
        base_url: &str,
    ) -> Result<Vec<Order>, ApiError> {
        let url = endpoint(base_url, ORDERS_PATH);
        log::info!(
            "🔍 [API] Buscando pedido '{}' en {} (token presente: {})",
            code,
            url,
            !token.is_empty()
        );

        let response = Request::get(&url)
            .query([(ORDER_CODE_FILTER, code)])
            .header("Authorization", &auth_header(token))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(network_error)?;

        let (status, body) = read_response(response).await?;
        log::debug!("📡 [API] /orders/ -> {}", status);

        let result = interpret_search(status, &body);
        match &result {
            Ok(orders) => log::info!("✅ [API] {} pedido(s) encontrado(s)", orders.len()),
            Err(e) => log::warn!("⚠️ [API] Búsqueda fallida: {}", e),
        }
        result
    }

    async fn upload_scan(
        &self,
        order_id: &str,
        image_path: &str,
        token: &str,
        base_url: &str,
    ) -> Result<ScanUploadResponse, ApiError> {
        if image_path.trim().is_empty() {
            return Err(ApiError::Upload("Imagen ausente".to_string()));
        }

        let file_name = upload_file_name(image_path, order_id);
        let mime = image_mime_type(&file_name);
        log::info!(
            "📤 [API] Subiendo foto del pedido {}: {} ({})",
            order_id,
            file_name,
            mime
        );

        // La captura entrega una URL local (blob:/file:); se lee como bytes
        let image_response = Request::get(image_path)
            .send()
            .await
            .map_err(network_error)?;
        if !image_response.ok() {
            log::error!(
                "❌ [API] No se pudo leer la imagen {}: HTTP {}",
                image_path,
                image_response.status()
            );
            return Err(unreadable_image(image_response.status()));
        }
        let image = image_response.binary().await.map_err(network_error)?;

        let form = build_upload_form(order_id, &image, &file_name, mime)?;

        // Sin Content-Type: el navegador añade el boundary del multipart
        let url = endpoint(base_url, SCAN_UPLOAD_PATH);
        let response = Request::post(&url)
            .header("Authorization", &auth_header(token))
            .body(form)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;

        let (status, body) = read_response(response).await?;
        log::debug!(
            "📡 [API] /scan-upload/ -> {} {}",
            status,
            body.chars().take(200).collect::<String>()
        );

        let result = interpret_upload(status, &body);
        match &result {
            Ok(upload) => log::info!("✅ [API] Foto subida: {}", upload.cloudinary.url),
            Err(e) => log::warn!("⚠️ [API] Subida fallida: {}", e),
        }
        result
    }

    async fn get_companies_by_email(
        &self,
        email: &str,
        base_url: &str,
    ) -> Result<Vec<Company>, ApiError> {
        let url = endpoint(base_url, COMPANIES_BY_EMAIL_PATH);
        log::info!("🏢 [API] Buscando empresas para {}", email);

        let response = Request::post(&url)
            .json(&CompaniesRequest { email })
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;

        let (status, body) = read_response(response).await?;
        interpret_companies(status, &body)
    }

    async fn login_mobile(
        &self,
        email: &str,
        password: &str,
        slug: &str,
        base_url: &str,
    ) -> Result<LoginGrant, ApiError> {
        let url = endpoint(base_url, LOGIN_MOBILE_PATH);
        log::info!("🔐 [API] Login de {} en empresa {}", email, slug);

        let response = Request::post(&url)
            .json(&LoginRequest {
                email,
                password,
                slug,
            })
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;

        let (status, body) = read_response(response).await?;
        let result = interpret_login(status, &body);
        if let Err(e) = &result {
            log::warn!("⚠️ [API] Login rechazado: {}", e);
        }
        result
    }
}

/// La URL local de la foto respondió con error; no se sube nada
pub fn unreadable_image(status: u16) -> ApiError {
    ApiError::Upload(format!("Imagen ilegible (HTTP {})", status))
}

/// FormData con el campo de texto `order` y el fichero `file`
fn build_upload_form(
    order_id: &str,
    image: &[u8],
    file_name: &str,
    mime: &str,
) -> Result<FormData, ApiError> {
    let bytes = js_sys::Uint8Array::from(image);
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("No se pudo preparar la imagen", e))?;

    let form = FormData::new().map_err(|e| js_error("No se pudo crear el formulario", e))?;
    form.append_with_str("order", order_id)
        .map_err(|e| js_error("No se pudo crear el formulario", e))?;
    form.append_with_blob_and_filename("file", &blob, file_name)
        .map_err(|e| js_error("No se pudo adjuntar la imagen", e))?;
    Ok(form)
}

// ============================================================================
// INTERPRETACIÓN DE RESPUESTAS
// ============================================================================

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn parse_json(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str(body).ok()
}

/// Primer campo string no vacío entre `keys`
fn backend_message(body: &str, keys: &[&str]) -> Option<String> {
    let json = parse_json(body)?;
    keys.iter()
        .filter_map(|key| json.get(*key))
        .find_map(|value| value.as_str().filter(|s| !s.is_empty()))
        .map(str::to_string)
}

fn decode<T: serde::de::DeserializeOwned>(what: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        log::error!("❌ [API] Respuesta inesperada de {}: {}", what, e);
        ApiError::Api(format!("Respuesta inesperada del servidor ({})", what))
    })
}

/// GET /orders/: 401/403 → Auth sin mirar el cuerpo; ≥500 → no disponible
pub fn interpret_search(status: u16, body: &str) -> Result<Vec<Order>, ApiError> {
    if status == 401 || status == 403 {
        return Err(ApiError::Auth);
    }
    if status >= 500 {
        return Err(ApiError::ServiceUnavailable);
    }
    if !is_success(status) {
        let message =
            backend_message(body, &["message"]).unwrap_or_else(|| format!("HTTP {}", status));
        return Err(ApiError::Api(message));
    }

    let page: OrdersPage = decode("orders", body)?;
    if page.count == 0 {
        log::info!("⚠️ [API] Sin resultados (count = 0)");
    }
    Ok(page.results)
}

/// Mensaje de error de subida: detail, error, file[0], array unido, texto, HTTP <status>
pub fn upload_error_message(status: u16, body: &str) -> String {
    if let Some(json) = parse_json(body) {
        let candidates = [
            json.get("detail"),
            json.get("error"),
            json.get("file").and_then(|f| f.get(0)),
        ];
        if let Some(message) = candidates
            .into_iter()
            .flatten()
            .find_map(|value| value.as_str().filter(|s| !s.is_empty()))
        {
            return message.to_string();
        }
        if let Value::Array(items) = &json {
            let joined = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            // Lista vacía: sin mensaje útil, no se muestra "[]"
            if joined.is_empty() {
                return format!("HTTP {}", status);
            }
            return joined;
        }
    }
    if !body.is_empty() {
        return body.to_string();
    }
    format!("HTTP {}", status)
}

/// POST /scan-upload/
pub fn interpret_upload(status: u16, body: &str) -> Result<ScanUploadResponse, ApiError> {
    if !is_success(status) {
        return Err(ApiError::Upload(upload_error_message(status, body)));
    }
    decode("scan-upload", body)
}

/// POST /get-comapnies-by-email/: cualquier otro no-2xx es un Lookup genérico
pub fn interpret_companies(status: u16, body: &str) -> Result<Vec<Company>, ApiError> {
    if status >= 500 {
        return Err(ApiError::ServiceUnavailable);
    }
    if !is_success(status) {
        let message = backend_message(body, &["detail", "message", "error"])
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(ApiError::Lookup(message));
    }
    let response: CompaniesResponse = decode("companies", body)?;
    Ok(response.companies)
}

/// POST /login-mobile/: éxito = HTTP 2xx y `status: 200` en el cuerpo
pub fn interpret_login(status: u16, body: &str) -> Result<LoginGrant, ApiError> {
    if !is_success(status) {
        let message = backend_message(body, &["detail", "message", "error"])
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(login_failure(status, message));
    }

    // 2xx con forma inesperada es un error de API, no de credenciales
    let response: LoginResponse = decode("login", body)?;
    match response {
        LoginResponse {
            status: Some(200),
            token: Some(token),
            user: Some(user),
        } if !token.is_empty() => Ok(LoginGrant { token, user }),
        LoginResponse {
            status: Some(200), ..
        } => Err(ApiError::Api(
            "Respuesta de login incompleta (token o usuario ausente)".to_string(),
        )),
        LoginResponse {
            status: body_status,
            ..
        } => {
            let failing = body_status.unwrap_or(status);
            let message = backend_message(body, &["detail", "message", "error"])
                .unwrap_or_else(|| format!("HTTP {}", failing));
            Err(login_failure(failing, message))
        }
    }
}

fn login_failure(failing: u16, message: String) -> ApiError {
    if failing == 400 || failing == 401 {
        ApiError::InvalidCredentials(message)
    } else {
        ApiError::Login(message)
    }
}
