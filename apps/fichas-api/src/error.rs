use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fichas_db::FichaError;
use serde::Serialize;
use validator::ValidationErrors;

/// Erro único devolvido pelos handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                tracing::error!("erro interno: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor.".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<FichaError> for ApiError {
    fn from(e: FichaError) -> Self {
        match e {
            FichaError::Validacao { .. } | FichaError::ValorInvalido(_) => {
                ApiError::BadRequest(e.to_string())
            }
            FichaError::NaoEncontrado(msg) => ApiError::NotFound(msg),
            FichaError::PermissaoNegada(_) => ApiError::Forbidden(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        // Primeira mensagem cadastrada; as demais são redundantes para o formulário
        let mensagem = e
            .field_errors()
            .into_iter()
            .flat_map(|(_, erros)| erros.iter())
            .find_map(|erro| erro.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Dados inválidos.".to_string());
        ApiError::BadRequest(mensagem)
    }
}
