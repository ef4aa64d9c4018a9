use std::sync::Arc;

use fichas_db::rotulos::{Regioes, Rotulos};
use jsonwebtoken::DecodingKey;
use sqlx::SqlitePool;

/// Estado compartilhado entre os handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub rotulos: Arc<Rotulos>,
    pub regioes: Arc<Regioes>,
    pub chave_jwt: Arc<DecodingKey>,
}

impl AppState {
    pub fn new(pool: SqlitePool, jwt_secret: &str) -> Self {
        Self {
            pool,
            rotulos: Arc::new(Rotulos::padrao()),
            regioes: Arc::new(Regioes::padrao()),
            chave_jwt: Arc::new(DecodingKey::from_secret(jwt_secret.as_bytes())),
        }
    }
}
