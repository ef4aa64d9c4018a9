use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Registra método, caminho e status de cada requisição.
///
/// O corpo nunca é registrado: as fichas carregam dados pessoais de saúde.
pub async fn audit_log<B>(req: Request<B>, next: Next<B>) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        "api_request"
    );

    response
}
