use super::{Company, User};
use crate::config::CONFIG;

/// Fase de carga de la sesión persistida
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Uninitialized,
    Loading,
    Ready,
}

/// Estado observable por la UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Estado de autenticación. `is_authenticated` siempre se deriva de token + user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub selected_company: Option<Company>,
    pub base_url: String,
    pub phase: LoadPhase,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            token: None,
            user: None,
            selected_company: None,
            base_url: base_url.into(),
            phase: LoadPhase::Uninitialized,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.phase != LoadPhase::Ready
    }

    pub fn status(&self) -> SessionStatus {
        match self.phase {
            LoadPhase::Uninitialized => SessionStatus::Uninitialized,
            LoadPhase::Loading => SessionStatus::Loading,
            LoadPhase::Ready if self.is_authenticated() => SessionStatus::Authenticated,
            LoadPhase::Ready => SessionStatus::Unauthenticated,
        }
    }

    /// Borra token/user/empresa; base_url se conserva
    pub fn clear_auth(&mut self) {
        self.token = None;
        self.user = None;
        self.selected_company = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CONFIG.backend_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            email: "a@b.com".into(),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn authenticated_needs_token_and_user() {
        let mut session = Session::new("https://x");
        session.phase = LoadPhase::Ready;
        assert_eq!(session.status(), SessionStatus::Unauthenticated);

        session.token = Some("T1".into());
        assert!(!session.is_authenticated());

        session.user = Some(user());
        assert_eq!(session.status(), SessionStatus::Authenticated);

        session.token = None;
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn status_follows_phase_before_ready() {
        let mut session = Session::new("https://x");
        session.token = Some("T1".into());
        session.user = Some(user());
        assert_eq!(session.status(), SessionStatus::Uninitialized);
        session.phase = LoadPhase::Loading;
        assert_eq!(session.status(), SessionStatus::Loading);
        assert!(session.is_loading());
    }

    #[test]
    fn clear_auth_keeps_base_url() {
        let mut session = Session::new("https://custom");
        session.token = Some("T1".into());
        session.user = Some(user());
        session.clear_auth();
        assert!(!session.is_authenticated());
        assert!(session.selected_company.is_none());
        assert_eq!(session.base_url, "https://custom");
    }
}
