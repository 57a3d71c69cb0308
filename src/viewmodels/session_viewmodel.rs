// ============================================================================
// SESSION VIEWMODEL - Gestor de sesión (auth + persistencia)
// ============================================================================
// Dueño único del estado de autenticación. Las mutaciones pasan solo por
// estos métodos; dentro de cada operación el orden es siempre
// red → memoria → escrituras en almacenamiento.
//
// token/user/empresa se guardan en tres claves separadas (no atómico).
// Al cargar, falta de token o de usuario ⇒ no autenticado.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::CONFIG;
use crate::error::{AppError, AppResult};
use crate::models::{
    Company, CompanyChoice, LoadPhase, RememberedLogin, Session, SessionStatus, User,
};
use crate::services::Backend;
use crate::state::reactivity::{Observable, SubscriptionId};
use crate::utils::constants::{
    KEY_AUTH_BASE_URL, KEY_AUTH_COMPANY, KEY_AUTH_TOKEN, KEY_AUTH_USER, KEY_REMEMBERED_EMAIL,
    KEY_REMEMBERED_SLUG,
};
use crate::utils::storage::{load_json, save_json, KeyValueStore};
use crate::utils::validation::{is_valid_email, non_blank};

/// Token + URL para una llamada autenticada
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub token: String,
    pub base_url: String,
}

pub struct SessionViewModel<S, B> {
    store: Rc<S>,
    backend: Rc<B>,
    session: Observable<Session>,
    remembered: Rc<RefCell<RememberedLogin>>,
}

impl<S, B> Clone for SessionViewModel<S, B> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            backend: Rc::clone(&self.backend),
            session: self.session.clone(),
            remembered: Rc::clone(&self.remembered),
        }
    }
}

impl<S: KeyValueStore, B: Backend> SessionViewModel<S, B> {
    /// Sesión sin cargar (Uninitialized); llamar a `restore` antes de usarla
    pub fn new(store: Rc<S>, backend: Rc<B>) -> Self {
        Self {
            store,
            backend,
            session: Observable::new(Session::new(CONFIG.backend_url.clone())),
            remembered: Rc::new(RefCell::new(RememberedLogin::default())),
        }
    }

    /// Construye y carga desde almacenamiento
    pub async fn load(store: Rc<S>, backend: Rc<B>) -> Self {
        let vm = Self::new(store, backend);
        vm.restore().await;
        vm
    }

    /// Loading → Authenticated/Unauthenticated según lo que haya persistido
    pub async fn restore(&self) -> SessionStatus {
        self.session.update(|s| s.phase = LoadPhase::Loading);
        log::info!("📋 [SESSION] Cargando sesión guardada...");

        let store = self.store.as_ref();
        let token = store.get(KEY_AUTH_TOKEN).await.filter(|t| !t.is_empty());
        let user: Option<User> = load_json(store, KEY_AUTH_USER).await;
        let company: Option<Company> = load_json(store, KEY_AUTH_COMPANY).await;
        let base_url = store
            .get(KEY_AUTH_BASE_URL)
            .await
            .filter(|url| !url.trim().is_empty());
        let email = store.get(KEY_REMEMBERED_EMAIL).await.unwrap_or_default();
        let slug = store.get(KEY_REMEMBERED_SLUG).await.unwrap_or_default();

        if token.is_some() != user.is_some() {
            log::warn!("⚠️ [SESSION] Sesión guardada incompleta, se trata como no autenticada");
        }

        *self.remembered.borrow_mut() = RememberedLogin { email, slug };
        self.session.update(|s| {
            s.token = token;
            s.user = user;
            s.selected_company = company;
            if let Some(url) = base_url {
                s.base_url = url;
            }
            s.phase = LoadPhase::Ready;
        });

        let status = self.status();
        log::info!("✅ [SESSION] Sesión cargada: {:?}", status);
        status
    }

    /// Empresas asociadas a un email. No modifica la sesión.
    pub async fn lookup_companies_by_email(&self, email: &str) -> AppResult<Vec<Company>> {
        let email = non_blank(email).ok_or(AppError::EmptyEmail)?;
        if !is_valid_email(email) {
            return Err(AppError::InvalidEmail);
        }
        let base_url = self.base_url();
        let companies = self
            .backend
            .get_companies_by_email(email, &base_url)
            .await?;
        log::info!("🏢 [SESSION] {} empresa(s) para {}", companies.len(), email);
        Ok(companies)
    }

    /// Como `lookup_companies_by_email`, clasificado para la navegación
    pub async fn choose_company(&self, email: &str) -> AppResult<CompanyChoice> {
        self.lookup_companies_by_email(email)
            .await
            .map(CompanyChoice::from_companies)
    }

    /// Si falla, la sesión queda intacta y el error sube tal cual
    pub async fn login(&self, email: &str, password: &str, company: Company) -> AppResult<()> {
        let email = non_blank(email).ok_or(AppError::EmptyEmail)?;
        if password.trim().is_empty() {
            return Err(AppError::EmptyPassword);
        }

        let base_url = self.base_url();
        let grant = self
            .backend
            .login_mobile(email, password, &company.slug, &base_url)
            .await?;
        log::info!(
            "✅ [SESSION] Login correcto: {} ({})",
            grant.user.display_name(),
            company.slug
        );

        let remembered = RememberedLogin {
            email: grant.user.email.clone(),
            slug: company.slug.clone(),
        };
        self.session.update(|s| {
            s.token = Some(grant.token.clone());
            s.user = Some(grant.user.clone());
            s.selected_company = Some(company.clone());
        });
        *self.remembered.borrow_mut() = remembered.clone();

        let store = self.store.as_ref();
        let writes = [
            (KEY_AUTH_TOKEN, store.set(KEY_AUTH_TOKEN, &grant.token).await),
            (KEY_AUTH_USER, save_json(store, KEY_AUTH_USER, &grant.user).await),
            (KEY_AUTH_COMPANY, save_json(store, KEY_AUTH_COMPANY, &company).await),
            (
                KEY_REMEMBERED_EMAIL,
                store.set(KEY_REMEMBERED_EMAIL, &remembered.email).await,
            ),
            (
                KEY_REMEMBERED_SLUG,
                store.set(KEY_REMEMBERED_SLUG, &remembered.slug).await,
            ),
        ];
        for (key, result) in writes {
            if let Err(e) = result {
                log::error!("❌ [SESSION] Error guardando '{}': {}", key, e);
            }
        }
        Ok(())
    }

    /// Borra token/user/empresa. Conserva base_url y el email/empresa recordados.
    pub async fn logout(&self) {
        log::info!("👋 [SESSION] Logout");
        self.session.update(Session::clear_auth);

        for key in [KEY_AUTH_TOKEN, KEY_AUTH_USER, KEY_AUTH_COMPANY] {
            if let Err(e) = self.store.remove(key).await {
                log::error!("❌ [SESSION] Error eliminando '{}': {}", key, e);
            }
        }
    }

    /// Cambia la URL del backend, independiente del estado de auth
    pub async fn update_base_url(&self, url: &str) {
        let url = non_blank(url)
            .map(str::to_string)
            .unwrap_or_else(|| CONFIG.backend_url.clone());
        log::info!("🌐 [SESSION] Nueva URL base: {}", url);

        self.session.update(|s| s.base_url = url.clone());
        if let Err(e) = self.store.set(KEY_AUTH_BASE_URL, &url).await {
            log::error!("❌ [SESSION] Error guardando URL base: {}", e);
        }
    }

    /// Token y URL para llamadas autenticadas; falla mientras carga o sin login
    pub fn credentials(&self) -> AppResult<Credentials> {
        self.session.with(|s| {
            if s.is_loading() {
                return Err(AppError::SessionLoading);
            }
            match (&s.token, s.is_authenticated()) {
                (Some(token), true) => Ok(Credentials {
                    token: token.clone(),
                    base_url: s.base_url.clone(),
                }),
                _ => Err(AppError::NotAuthenticated),
            }
        })
    }

    pub fn snapshot(&self) -> Session {
        self.session.get()
    }

    pub fn status(&self) -> SessionStatus {
        self.session.with(Session::status)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.session.with(Session::is_loading)
    }

    pub fn base_url(&self) -> String {
        self.session.with(|s| s.base_url.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.session.with(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.user.clone())
    }

    pub fn selected_company(&self) -> Option<Company> {
        self.session.with(|s| s.selected_company.clone())
    }

    pub fn remembered(&self) -> RememberedLogin {
        self.remembered.borrow().clone()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Session) + 'static,
    {
        self.session.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.session.unsubscribe(id)
    }
}
