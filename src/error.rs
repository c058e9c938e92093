use thiserror::Error;

pub const DEFAULT_NOT_FOUND: &str = "DNI no encontrado.";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("El DNI debe tener 8 dígitos.")]
    InvalidDni,
    #[error("{0}")]
    NotFound(String),
    #[error("No se pudo conectar con el servidor. Inténtalo nuevamente.")]
    Transport(#[source] reqwest::Error),
    #[error("No se pudo conectar con el servidor. Inténtalo nuevamente.")]
    MalformedBody(#[source] serde_json::Error),
}

impl LookupError {
    /// Whether resubmitting the same identifier could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::MalformedBody(_))
    }
}
