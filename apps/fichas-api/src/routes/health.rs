use axum::Json;
use serde_json::{json, Value};

use crate::built_info;

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "versao": built_info::PKG_VERSION,
    }))
}
