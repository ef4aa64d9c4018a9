//! Desfecho, fora de área, PNAR e compartilhamento

use axum::extract::{Path, State};
use axum::{Extension, Json};
use fichas_db::repositorio::{
    compartilhar_ficha, compartilhar_municipio, ficha_compartilhada, listar_pnar,
    marcar_fora_area, previa_compartilhamento, registrar_desfecho_lote, registrar_pnar,
    Compartilhamento, FiltroPnar, ItemPnar, Pagina, PreviaCompartilhamento,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::auth::Chamador;
use crate::state::AppState;

/// Fichas alcançadas por uma atualização de ciclo de vida
#[derive(Serialize)]
pub struct Atualizadas {
    pub fichas: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DesfechoRequest {
    #[validate(length(
        min = 1,
        message = "Nome da gestante, data de nascimento e desfecho são obrigatórios."
    ))]
    pub nome_gestante: String,
    #[validate(length(
        min = 1,
        message = "Nome da gestante, data de nascimento e desfecho são obrigatórios."
    ))]
    pub data_nasc: String,
    #[validate(length(
        min = 1,
        message = "Nome da gestante, data de nascimento e desfecho são obrigatórios."
    ))]
    pub desfecho: String,
}

/// POST /desfechos
pub async fn registrar_desfecho(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Json(req): Json<DesfechoRequest>,
) -> Result<Json<Atualizadas>, ApiError> {
    req.validate()?;
    let fichas = registrar_desfecho_lote(
        &state.pool,
        &state.rotulos,
        &chamador.escopo,
        &req.nome_gestante,
        &req.data_nasc,
        &req.desfecho,
    )
    .await?;
    Ok(Json(Atualizadas { fichas }))
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ForaAreaRequest {
    #[validate(length(min = 1, message = "Dados incompletos."))]
    pub codigo_ficha: String,
    #[validate(length(min = 1, message = "Dados incompletos."))]
    pub nome_gestante: String,
    #[validate(length(min = 1, message = "Dados incompletos."))]
    pub data_nasc: String,
}

/// POST /fora-area
pub async fn fora_area(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Json(req): Json<ForaAreaRequest>,
) -> Result<Json<Atualizadas>, ApiError> {
    req.validate()?;
    let fichas = marcar_fora_area(
        &state.pool,
        &chamador.escopo,
        &req.codigo_ficha,
        &req.nome_gestante,
        &req.data_nasc,
    )
    .await?;
    Ok(Json(Atualizadas { fichas }))
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PnarRequest {
    #[validate(length(min = 1, message = "Todos os campos são obrigatórios."))]
    pub codigo_ficha: String,
    #[validate(length(min = 1, message = "Todos os campos são obrigatórios."))]
    pub nome_gestante: String,
    #[validate(length(min = 1, message = "Todos os campos são obrigatórios."))]
    pub data_nasc: String,
    #[validate(length(min = 1, message = "Todos os campos são obrigatórios."))]
    pub pnar_servico: String,
}

/// POST /pnar
pub async fn sinalizar_pnar(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Json(req): Json<PnarRequest>,
) -> Result<Json<Atualizadas>, ApiError> {
    req.validate()?;
    registrar_pnar(
        &state.pool,
        &chamador.escopo,
        &req.codigo_ficha,
        &req.nome_gestante,
        &req.data_nasc,
        &req.pnar_servico,
    )
    .await?;
    Ok(Json(Atualizadas {
        fichas: vec![req.codigo_ficha.trim().to_uppercase()],
    }))
}

/// POST /pnar/busca
pub async fn fila_pnar(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Json(filtro): Json<FiltroPnar>,
) -> Result<Json<Pagina<ItemPnar>>, ApiError> {
    Ok(Json(listar_pnar(&state.pool, &chamador.escopo, &filtro).await?))
}

/// GET /compartilhamento/previa
pub async fn previa(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
) -> Result<Json<PreviaCompartilhamento>, ApiError> {
    Ok(Json(previa_compartilhamento(&state.pool, &chamador.escopo).await?))
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CompartilharRequest {
    #[validate(length(min = 1, message = "Município não selecionado."))]
    pub municipio: String,
}

/// POST /compartilhamento
pub async fn compartilhar_todas(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Json(req): Json<CompartilharRequest>,
) -> Result<Json<Compartilhamento>, ApiError> {
    req.validate()?;
    let feito = compartilhar_municipio(&state.pool, &chamador.escopo, &req.municipio).await?;
    Ok(Json(feito))
}

#[derive(Serialize)]
pub struct StatusCompartilhamento {
    pub compartilhada: bool,
}

/// GET /fichas/:codigo/compartilhamento
pub async fn status_compartilhamento(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Path(codigo): Path<String>,
) -> Result<Json<StatusCompartilhamento>, ApiError> {
    let compartilhada = ficha_compartilhada(&state.pool, &chamador.escopo, &codigo).await?;
    Ok(Json(StatusCompartilhamento { compartilhada }))
}

/// POST /fichas/:codigo/compartilhamento
pub async fn compartilhar_uma(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Path(codigo): Path<String>,
) -> Result<Json<Compartilhamento>, ApiError> {
    Ok(Json(compartilhar_ficha(&state.pool, &chamador.escopo, &codigo).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use fichas_db::fixtures::{
        banco_temporario, inserir_apoio, inserir_ficha_teste, inserir_usuario, usuario,
        FichaBuilder,
    };
    use fichas_db::models::Papel;
    use serde_json::json;

    use crate::routes::teste::{app, enviar, token};

    #[tokio::test]
    async fn test_desfecho_encerra_todas_as_fichas_da_gestante() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        for _ in 0..2 {
            inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id)).await?;
        }
        let app = app(&pool);
        let tk = token(&ana);

        let corpo = json!({ "nome_gestante": "Maria da Silva", "data_nasc": "01/02/1990", "desfecho": "W90" });
        let (status, feito) = enviar(&app, Method::POST, "/desfechos", Some(&tk), Some(corpo)).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(feito["fichas"].as_array().map(Vec::len), Some(2));

        let corpo = json!({ "nome_gestante": "Maria da Silva", "data_nasc": "01/02/1990", "desfecho": "XYZ" });
        let (status, erro) = enviar(&app, Method::POST, "/desfechos", Some(&tk), Some(corpo)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(erro["error"], "Desfecho inválido: XYZ.");

        let (status, erro) =
            enviar(&app, Method::POST, "/desfechos", Some(&tk), Some(json!({}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            erro["error"],
            "Nome da gestante, data de nascimento e desfecho são obrigatórios."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_fora_area() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        let f = inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id)).await?;
        let app = app(&pool);
        let tk = token(&ana);
        let corpo = json!({
            "codigo_ficha": f.codigo_ficha,
            "nome_gestante": f.nome_gestante,
            "data_nasc": f.data_nasc,
        });

        let (status, _) = enviar(&app, Method::POST, "/fora-area", Some(&tk), Some(corpo.clone())).await?;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = enviar(&app, Method::POST, "/fora-area", Some(&tk), Some(corpo)).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_pnar_sinaliza_e_lista() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        let f = inserir_ficha_teste(
            &pool,
            FichaBuilder::new(0).user_id(ana.id).classificacao("Risco Alto"),
        )
        .await?;
        let app = app(&pool);

        let corpo = json!({
            "codigo_ficha": f.codigo_ficha,
            "nome_gestante": f.nome_gestante,
            "data_nasc": f.data_nasc,
            "pnar_servico": "Ambulatório Norte",
        });
        let (status, _) =
            enviar(&app, Method::POST, "/pnar", Some(&token(&ana)), Some(corpo)).await?;
        assert_eq!(status, StatusCode::OK);

        let id = inserir_apoio(&pool, "Apoio Norte", None, false, true, Some("Ambulatório Norte")).await?;
        let apoio = usuario(id, Papel::Apoio, "");
        let (status, fila) =
            enviar(&app, Method::POST, "/pnar/busca", Some(&token(&apoio)), Some(json!({}))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fila["total_registros"], 1);

        let (status, _) = enviar(
            &app,
            Method::POST,
            "/pnar/busca",
            Some(&token(&ana)),
            Some(json!({})),
        )
        .await?;
        assert_eq!(status, StatusCode::FORBIDDEN);
        Ok(())
    }

    #[tokio::test]
    async fn test_compartilhamento() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        inserir_usuario(&pool, "Admin Patos", Papel::Municipal, "Patos").await?;
        let f = inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id).municipio("Patos")).await?;
        let app = app(&pool);
        let tk = token(&ana);

        let (status, previa) =
            enviar(&app, Method::GET, "/compartilhamento/previa", Some(&tk), None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(previa["municipios"], json!(["Patos"]));

        let uri = format!("/fichas/{}/compartilhamento", f.codigo_ficha);
        let (status, feito) = enviar(&app, Method::POST, &uri, Some(&tk), None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(feito["admin_nome"], "Admin Patos");

        let (_, estado) = enviar(&app, Method::GET, &uri, Some(&tk), None).await?;
        assert_eq!(estado["compartilhada"], true);

        let (status, _) = enviar(&app, Method::POST, &uri, Some(&tk), None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, erro) = enviar(
            &app,
            Method::POST,
            "/compartilhamento",
            Some(&tk),
            Some(json!({ "municipio": "" })),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(erro["error"], "Município não selecionado.");
        Ok(())
    }
}
