// Backend guionizado: respuestas HTTP enlatadas (status + body) que pasan
// por los mismos intérpretes que el cliente real.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use order_scan_pwa::models::{LoginGrant, ScanUploadResponse};
use order_scan_pwa::services::api_client::{
    interpret_companies, interpret_login, interpret_search, interpret_upload, unreadable_image,
};
use order_scan_pwa::viewmodels::ScanGate;
use order_scan_pwa::{ApiError, AppState, Backend, Company, MemoryStore, Order};

pub const SEARCH: &str = "search";
pub const UPLOAD: &str = "upload";
pub const COMPANIES: &str = "companies";
pub const LOGIN: &str = "login";
/// Lectura local de la foto antes de subirla
pub const IMAGE: &str = "image";

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub endpoint: &'static str,
    pub arg: String,
    pub token: Option<String>,
    pub base_url: String,
}

#[derive(Default)]
pub struct ScriptedBackend {
    replies: RefCell<HashMap<&'static str, (u16, String)>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, endpoint: &'static str, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .insert(endpoint, (status, body.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .cloned()
            .collect()
    }

    fn answer(
        &self,
        endpoint: &'static str,
        arg: &str,
        token: Option<&str>,
        base_url: &str,
    ) -> Result<(u16, String), ApiError> {
        self.calls.borrow_mut().push(Call {
            endpoint,
            arg: arg.to_string(),
            token: token.map(str::to_string),
            base_url: base_url.to_string(),
        });
        self.replies
            .borrow()
            .get(endpoint)
            .cloned()
            .ok_or_else(|| ApiError::Network(format!("sin respuesta para {}", endpoint)))
    }
}

impl Backend for ScriptedBackend {
    async fn search_orders(
        &self,
        code: &str,
        token: &str,
        base_url: &str,
    ) -> Result<Vec<Order>, ApiError> {
        let (status, body) = self.answer(SEARCH, code, Some(token), base_url)?;
        interpret_search(status, &body)
    }

    async fn upload_scan(
        &self,
        order_id: &str,
        image_path: &str,
        token: &str,
        base_url: &str,
    ) -> Result<ScanUploadResponse, ApiError> {
        let image = self.replies.borrow().get(IMAGE).cloned();
        if let Some((status, _)) = image {
            if !(200..300).contains(&status) {
                return Err(unreadable_image(status));
            }
        }
        let arg = format!("{}|{}", order_id, image_path);
        let (status, body) = self.answer(UPLOAD, &arg, Some(token), base_url)?;
        interpret_upload(status, &body)
    }

    async fn get_companies_by_email(
        &self,
        email: &str,
        base_url: &str,
    ) -> Result<Vec<Company>, ApiError> {
        let (status, body) = self.answer(COMPANIES, email, None, base_url)?;
        interpret_companies(status, &body)
    }

    async fn login_mobile(
        &self,
        email: &str,
        _password: &str,
        slug: &str,
        base_url: &str,
    ) -> Result<LoginGrant, ApiError> {
        let arg = format!("{}|{}", email, slug);
        let (status, body) = self.answer(LOGIN, &arg, None, base_url)?;
        interpret_login(status, &body)
    }
}

pub type TestApp = AppState<MemoryStore, ScriptedBackend>;

pub const ACME_COMPANIES: &str = r#"{"companies":[
    {"company__slug":"acme","company__name":"Acme","company__logo":"/media/acme.png"}
]}"#;

pub const LOGIN_OK: &str = r#"{"status":200,"token":"T1","user":{"id":1,"email":"a@b.com","first_name":"Ana"}}"#;

pub fn acme() -> Company {
    Company {
        slug: "acme".into(),
        name: "Acme".into(),
        logo_path: "/media/acme.png".into(),
    }
}

/// Contexto restaurado desde `store`, con ventana anti-rebote de 2s
pub async fn app(store: &Rc<MemoryStore>, backend: &Rc<ScriptedBackend>) -> TestApp {
    let app = AppState::with_gate(
        Rc::clone(store),
        Rc::clone(backend),
        ScanGate::new(chrono::Duration::seconds(2)),
    );
    app.restore().await;
    app
}

/// Contexto con sesión iniciada en acme como a@b.com (token T1)
pub async fn logged_in_app(store: &Rc<MemoryStore>, backend: &Rc<ScriptedBackend>) -> TestApp {
    backend.reply(LOGIN, 200, LOGIN_OK);
    let app = app(store, backend).await;
    app.session
        .login("a@b.com", "secret", acme())
        .await
        .unwrap();
    app
}
