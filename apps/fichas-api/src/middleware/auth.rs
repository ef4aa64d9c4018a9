use axum::extract::State;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;
use fichas_db::escopo::{resolver_escopo, EscopoVisibilidade};
use fichas_db::models::{TipoUsuario, Usuario};
use fichas_db::repositorio::carregar_usuario;
use fichas_db::FichaError;
use jsonwebtoken::{decode, Algorithm, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Claims emitidas pelo serviço de login
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Id do usuário na tabela indicada por `tipo`
    pub sub: String,
    pub tipo: TipoUsuario,
    pub exp: usize,
}

/// Usuário autenticado e o escopo resolvido a partir dele
#[derive(Debug, Clone)]
pub struct Chamador {
    pub usuario: Usuario,
    pub escopo: EscopoVisibilidade,
}

fn token_bearer<B>(req: &Request<B>) -> Result<&str, ApiError> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Token de acesso ausente.".to_string()))
}

/// Valida o JWT, recarrega o usuário do banco e insere o [`Chamador`] na requisição.
///
/// O usuário é sempre relido: desativações e mudanças de papel valem na
/// requisição seguinte, sem esperar o token expirar.
pub async fn require_auth<B>(
    State(state): State<AppState>,
    mut req: Request<B>,
    next: Next<B>,
) -> Result<Response, ApiError> {
    let claims = {
        let token = token_bearer(&req)?;
        decode::<Claims>(token, &state.chave_jwt, &Validation::new(Algorithm::HS256))
            .map_err(|e| {
                tracing::debug!("token rejeitado: {e}");
                ApiError::Unauthorized("Token de acesso inválido ou expirado.".to_string())
            })?
            .claims
    };

    let id: i64 = claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Token de acesso inválido.".to_string()))?;

    let usuario = carregar_usuario(&state.pool, claims.tipo, id)
        .await
        .map_err(|e| match e {
            FichaError::NaoEncontrado(_) => {
                ApiError::Unauthorized("Usuário não encontrado.".to_string())
            }
            outro => outro.into(),
        })?;

    let escopo = resolver_escopo(&usuario);
    req.extensions_mut().insert(Chamador { usuario, escopo });

    Ok(next.run(req).await)
}
