pub mod ciclo;
pub mod fichas;
pub mod health;
pub mod relatorios;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;

use crate::middleware::{audit::audit_log, auth::require_auth};
use crate::state::AppState;

/// Rotas do serviço; tudo exceto `/health` exige autenticação
pub fn router(state: AppState) -> Router {
    let protegidas = Router::new()
        .route("/fichas", post(fichas::criar_ficha))
        .route("/fichas/busca-cpf", post(fichas::buscar_cpf))
        .route("/fichas/:codigo", get(fichas::obter_ficha))
        .route("/fichas/:codigo/historico", get(fichas::historico_da_gestante))
        .route("/fichas/:codigo/documento", get(fichas::documento))
        .route(
            "/fichas/:codigo/compartilhamento",
            get(ciclo::status_compartilhamento).post(ciclo::compartilhar_uma),
        )
        .route("/historico", post(fichas::listar_historico))
        .route("/desfechos", post(ciclo::registrar_desfecho))
        .route("/fora-area", post(ciclo::fora_area))
        .route("/pnar", post(ciclo::sinalizar_pnar))
        .route("/pnar/busca", post(ciclo::fila_pnar))
        .route("/compartilhamento/previa", get(ciclo::previa))
        .route("/compartilhamento", post(ciclo::compartilhar_todas))
        .route("/relatorios/geral", get(relatorios::geral))
        .route("/relatorios/saude-indigena", get(relatorios::saude_indigena))
        .route("/monitoramento", get(relatorios::monitoramento))
        .route("/regioes", get(relatorios::regioes))
        .route_layer(axum_mw::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .route("/health", get(health::health))
        .merge(protegidas)
        .layer(axum_mw::from_fn(audit_log))
}

#[cfg(test)]
pub(crate) mod teste {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use fichas_db::models::Usuario;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::Value;
    use sqlx::SqlitePool;
    use tower::ServiceExt;

    use crate::middleware::auth::Claims;
    use crate::state::AppState;

    pub const SEGREDO: &str = "segredo-de-teste-com-32-caracteres";

    pub fn app(pool: &SqlitePool) -> Router {
        super::router(AppState::new(pool.clone(), SEGREDO))
    }

    pub fn token(usuario: &Usuario) -> String {
        let claims = Claims {
            sub: usuario.id.to_string(),
            tipo: usuario.tipo,
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SEGREDO.as_bytes()),
        )
        .expect("token de teste")
    }

    /// Envia uma requisição e devolve o status e o corpo JSON
    pub async fn enviar(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        corpo: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match corpo {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let resp = app.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = hyper::body::to_bytes(resp.into_body()).await?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, json))
    }
}
