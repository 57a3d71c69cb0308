use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: u64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl User {
    /// Nombre para mostrar; cae al email si no hay nombre
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            self.email.clone()
        } else {
            full
        }
    }
}

#[derive(Clone, Serialize, Debug)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub slug: &'a str,
}

/// Cuerpo de /login-mobile/. `status` viene dentro del JSON además del HTTP.
#[derive(Clone, Deserialize, Debug)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Resultado de un login válido
#[derive(Clone, PartialEq, Debug)]
pub struct LoginGrant {
    pub token: String,
    pub user: User,
}

/// Email y empresa recordados para pre-rellenar el siguiente login
#[derive(Clone, PartialEq, Debug, Default)]
pub struct RememberedLogin {
    pub email: String,
    pub slug: String,
}
