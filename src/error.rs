// ============================================================================
// ERRORES
// ============================================================================
// ApiError: fallos de transporte / backend, uno por categoría.
// AppError: fallos de flujo (validación + ApiError). Cada uno se muestra
// al usuario como un único mensaje.
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Token inválido o expirado. Vuelve a iniciar sesión.")]
    Auth,
    #[error("Servicio momentáneamente no disponible. Reinténtalo.")]
    ServiceUnavailable,
    #[error("Error de red: {0}")]
    Network(String),
    #[error("{0}")]
    Api(String),
    #[error("No se pudo verificar el email: {0}")]
    Lookup(String),
    #[error("{0}")]
    Upload(String),
    #[error("Conexión imposible por el momento: {0}")]
    Login(String),
    #[error("Credenciales incorrectas: {0}")]
    InvalidCredentials(String),
}

impl ApiError {
    /// Transitorio: el usuario puede reintentar sin cambiar nada
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable | Self::Network(_))
    }

    /// Requiere volver a introducir credenciales
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Auth | Self::InvalidCredentials(_))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Introduce un código de pedido")]
    EmptyOrderCode,
    #[error("Introduce tu dirección de email")]
    EmptyEmail,
    #[error("Introduce una dirección de email válida")]
    InvalidEmail,
    #[error("Introduce tu contraseña")]
    EmptyPassword,
    #[error("El token de API es obligatorio")]
    EmptyApiToken,
    #[error("La sesión todavía se está cargando")]
    SessionLoading,
    #[error("Sesión expirada. Vuelve a conectarte.")]
    NotAuthenticated,
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_is_transparent_over_api_error() {
        let err: AppError = ApiError::Upload("Not a valid file.".into()).into();
        assert_eq!(err.to_string(), "Not a valid file.");
    }

    #[test]
    fn classification() {
        assert!(ApiError::ServiceUnavailable.is_retryable());
        assert!(ApiError::Network("offline".into()).is_retryable());
        assert!(!ApiError::Auth.is_retryable());
        assert!(ApiError::Auth.requires_login());
        assert!(!ApiError::Lookup("HTTP 404".into()).requires_login());
    }
}
