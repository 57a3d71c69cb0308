mod common;

use std::rc::Rc;

use common::*;
use order_scan_pwa::config::CONFIG;
use order_scan_pwa::utils::constants::{
    KEY_AUTH_BASE_URL, KEY_AUTH_COMPANY, KEY_AUTH_TOKEN, KEY_AUTH_USER, KEY_REMEMBERED_EMAIL,
};
use order_scan_pwa::{
    ApiError, AppError, CompanyChoice, KeyValueStore, MemoryStore, SessionStatus,
};

#[tokio::test]
async fn login_with_single_company_survives_restart() {
    let store = Rc::new(MemoryStore::new());
    let backend = Rc::new(ScriptedBackend::new());
    backend.reply(COMPANIES, 200, ACME_COMPANIES);
    backend.reply(LOGIN, 200, LOGIN_OK);

    let app = app(&store, &backend).await;
    assert_eq!(app.session.status(), SessionStatus::Unauthenticated);

    let company = match app.session.choose_company(" a@b.com ").await.unwrap() {
        CompanyChoice::Single(company) => company,
        other => panic!("se esperaba una sola empresa, llegó {:?}", other),
    };
    assert_eq!(backend.calls_to(COMPANIES)[0].arg, "a@b.com");

    app.session.login("a@b.com", "secret", company).await.unwrap();
    assert!(app.session.is_authenticated());
    assert_eq!(app.session.token().as_deref(), Some("T1"));
    assert_eq!(backend.calls_to(LOGIN)[0].arg, "a@b.com|acme");
    assert_eq!(store.raw(KEY_AUTH_TOKEN).as_deref(), Some("T1"));

    // Reinicio: nuevo contexto sobre el mismo almacén
    let restarted = common::app(&store, &backend).await;
    assert_eq!(restarted.session.status(), SessionStatus::Authenticated);
    assert_eq!(restarted.session.token().as_deref(), Some("T1"));
    assert_eq!(restarted.session.user().map(|u| u.email).as_deref(), Some("a@b.com"));
    assert_eq!(restarted.session.selected_company(), Some(acme()));
    assert_eq!(restarted.session.remembered().email, "a@b.com");
    assert_eq!(restarted.session.remembered().slug, "acme");
}

#[tokio::test]
async fn rejected_credentials_keep_session_empty() {
    let store = Rc::new(MemoryStore::new());
    let backend = Rc::new(ScriptedBackend::new());
    backend.reply(LOGIN, 401, r#"{"detail":"Mot de passe incorrect"}"#);

    let app = app(&store, &backend).await;
    let err = app
        .session
        .login("a@b.com", "wrong", acme())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AppError::Api(ApiError::InvalidCredentials("Mot de passe incorrect".into()))
    );
    assert!(!app.session.is_authenticated());
    assert!(!store.contains(KEY_AUTH_TOKEN));
    assert!(!store.contains(KEY_REMEMBERED_EMAIL));
}

#[tokio::test]
async fn body_status_other_than_200_is_a_login_error() {
    let store = Rc::new(MemoryStore::new());
    let backend = Rc::new(ScriptedBackend::new());
    backend.reply(LOGIN, 200, r#"{"status":403,"message":"Compte désactivé"}"#);

    let app = app(&store, &backend).await;
    let err = app
        .session
        .login("a@b.com", "secret", acme())
        .await
        .unwrap_err();

    assert_eq!(err, AppError::Api(ApiError::Login("Compte désactivé".into())));
    assert_eq!(app.session.status(), SessionStatus::Unauthenticated);
}

#[tokio::test]
async fn logout_then_restart_is_unauthenticated_but_remembers_login() {
    let store = Rc::new(MemoryStore::new());
    let backend = Rc::new(ScriptedBackend::new());
    let app = logged_in_app(&store, &backend).await;
    app.session.update_base_url("https://staging.example.com").await;

    app.session.logout().await;
    assert_eq!(app.session.status(), SessionStatus::Unauthenticated);
    for key in [KEY_AUTH_TOKEN, KEY_AUTH_USER, KEY_AUTH_COMPANY] {
        assert!(!store.contains(key), "{} debería estar borrado", key);
    }

    let restarted = common::app(&store, &backend).await;
    assert_eq!(restarted.session.status(), SessionStatus::Unauthenticated);
    assert_eq!(restarted.session.base_url(), "https://staging.example.com");
    assert_eq!(restarted.session.remembered().email, "a@b.com");
}

#[tokio::test]
async fn base_url_change_routes_next_calls_and_persists() {
    let store = Rc::new(MemoryStore::new());
    let backend = Rc::new(ScriptedBackend::new());
    backend.reply(COMPANIES, 200, ACME_COMPANIES);

    let app = app(&store, &backend).await;
    app.session.lookup_companies_by_email("a@b.com").await.unwrap();
    assert_eq!(backend.calls_to(COMPANIES)[0].base_url, CONFIG.backend_url);

    app.session.update_base_url("https://eu.example.com").await;
    app.session.lookup_companies_by_email("a@b.com").await.unwrap();
    assert_eq!(backend.calls_to(COMPANIES)[1].base_url, "https://eu.example.com");
    assert_eq!(
        store.get(KEY_AUTH_BASE_URL).await.as_deref(),
        Some("https://eu.example.com")
    );
}

#[tokio::test]
async fn token_without_user_restores_unauthenticated() {
    let store = Rc::new(MemoryStore::new());
    store.set(KEY_AUTH_TOKEN, "T1").await.unwrap();
    let backend = Rc::new(ScriptedBackend::new());

    let app = app(&store, &backend).await;
    assert_eq!(app.session.status(), SessionStatus::Unauthenticated);
    assert_eq!(app.scanner.search("ABC").await, Err(AppError::NotAuthenticated));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn company_lookup_errors() {
    let store = Rc::new(MemoryStore::new());
    let backend = Rc::new(ScriptedBackend::new());
    let app = app(&store, &backend).await;

    assert_eq!(
        app.session.lookup_companies_by_email("pas-un-email").await,
        Err(AppError::InvalidEmail)
    );
    assert!(backend.calls().is_empty());

    backend.reply(COMPANIES, 502, "Bad Gateway");
    assert_eq!(
        app.session.lookup_companies_by_email("a@b.com").await,
        Err(AppError::Api(ApiError::ServiceUnavailable))
    );

    backend.reply(COMPANIES, 200, r#"{"companies":[]}"#);
    assert_eq!(
        app.session.choose_company("a@b.com").await,
        Ok(CompanyChoice::NoAccount)
    );
}

#[tokio::test]
async fn network_failures_during_login_reach_the_caller() {
    let store = Rc::new(MemoryStore::new());
    let backend = Rc::new(ScriptedBackend::new());
    let app = app(&store, &backend).await;

    assert!(matches!(
        app.session.lookup_companies_by_email("a@b.com").await,
        Err(AppError::Api(ApiError::Network(_)))
    ));
    assert!(matches!(
        app.session.login("a@b.com", "secret", acme()).await,
        Err(AppError::Api(ApiError::Network(_)))
    ));
    assert_eq!(app.session.status(), SessionStatus::Unauthenticated);
    assert!(!store.contains(KEY_AUTH_TOKEN));
}
