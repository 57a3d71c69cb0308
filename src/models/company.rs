use serde::{Deserialize, Serialize};

/// Empresa asociada a un email. Los nombres de campo del backend llevan el
/// prefijo `company__`, y se persisten igual.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    #[serde(rename = "company__slug")]
    pub slug: String,
    #[serde(rename = "company__name")]
    pub name: String,
    #[serde(rename = "company__logo", default)]
    pub logo_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompaniesRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompaniesResponse {
    #[serde(default)]
    pub companies: Vec<Company>,
}

/// Qué hacer tras buscar las empresas de un email
#[derive(Debug, Clone, PartialEq)]
pub enum CompanyChoice {
    /// Ninguna cuenta asociada
    NoAccount,
    /// Una sola empresa: directo a la contraseña
    Single(Company),
    /// Varias: mostrar selector
    Multiple(Vec<Company>),
}

impl CompanyChoice {
    pub fn from_companies(mut companies: Vec<Company>) -> Self {
        match companies.len() {
            0 => Self::NoAccount,
            1 => Self::Single(companies.remove(0)),
            _ => Self::Multiple(companies),
        }
    }
}
