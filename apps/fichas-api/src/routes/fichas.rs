//! Envio e consulta de fichas

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Local;
use fichas_db::exportacao::{documento_ficha, DocumentoFicha};
use fichas_db::models::{ClassificacaoRisco, Ficha};
use fichas_db::repositorio::{
    buscar_por_codigo, buscar_por_cpf, historico, historico_gestante, inserir_ficha,
    FiltroHistorico, Pagina,
};
use fichas_db::validacao::{validar, SubmissaoFicha};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::auth::Chamador;
use crate::state::AppState;

#[derive(Serialize)]
pub struct FichaCriada {
    pub codigo_ficha: String,
    pub classificacao_risco: ClassificacaoRisco,
}

/// POST /fichas
pub async fn criar_ficha(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Json(sub): Json<SubmissaoFicha>,
) -> Result<(StatusCode, Json<FichaCriada>), ApiError> {
    let nova = validar(&sub, Local::now().date_naive())?;
    let codigo_ficha = inserir_ficha(&state.pool, &chamador.usuario, &nova).await?;
    tracing::info!(usuario = chamador.usuario.id, codigo = %codigo_ficha, "ficha enviada");

    Ok((
        StatusCode::CREATED,
        Json(FichaCriada {
            codigo_ficha,
            classificacao_risco: nova.classificacao_risco,
        }),
    ))
}

/// GET /fichas/:codigo
pub async fn obter_ficha(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Path(codigo): Path<String>,
) -> Result<Json<Ficha>, ApiError> {
    Ok(Json(buscar_por_codigo(&state.pool, &chamador.escopo, &codigo).await?))
}

/// GET /fichas/:codigo/historico
pub async fn historico_da_gestante(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Path(codigo): Path<String>,
) -> Result<Json<Vec<Ficha>>, ApiError> {
    Ok(Json(historico_gestante(&state.pool, &chamador.escopo, &codigo).await?))
}

/// GET /fichas/:codigo/documento
pub async fn documento(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Path(codigo): Path<String>,
) -> Result<Json<DocumentoFicha>, ApiError> {
    let doc = documento_ficha(&state.pool, &state.rotulos, &chamador.escopo, &codigo).await?;
    Ok(Json(doc))
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BuscaCpf {
    #[validate(length(min = 11, message = "CPF inválido."))]
    pub cpf: String,
}

#[derive(Serialize)]
pub struct ResultadoBuscaCpf {
    pub encontrada: bool,
    pub ficha: Option<Ficha>,
}

/// POST /fichas/busca-cpf
///
/// O CPF vai no corpo para não aparecer em logs de acesso.
pub async fn buscar_cpf(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Json(req): Json<BuscaCpf>,
) -> Result<Json<ResultadoBuscaCpf>, ApiError> {
    req.validate()?;
    let ficha = buscar_por_cpf(&state.pool, &chamador.escopo, &req.cpf).await?;
    Ok(Json(ResultadoBuscaCpf {
        encontrada: ficha.is_some(),
        ficha,
    }))
}

/// POST /historico
pub async fn listar_historico(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Json(filtro): Json<FiltroHistorico>,
) -> Result<Json<Pagina<Ficha>>, ApiError> {
    Ok(Json(historico(&state.pool, &chamador.escopo, &filtro).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use fichas_db::fixtures::{banco_temporario, inserir_ficha_teste, inserir_usuario, FichaBuilder};
    use fichas_db::models::Papel;
    use serde_json::json;

    use crate::routes::teste::{app, enviar, token};

    fn envio() -> serde_json::Value {
        json!({
            "nome_gestante": "Joana Souza",
            "data_nasc": "10/03/1995",
            "cpf": "123.456.789-09",
            "telefone": "(83) 98888-7777",
            "municipio": "Patos",
            "ubs": "UBS Centro",
            "acs": "ACS Lúcia",
            "periodo_gestacional": "2º trimestre",
            "pontuacao_total": 12,
            "classificacao_risco": "alto risco",
            "imc": "27,4",
            "comorbidades": "[\"hipertensao\"]",
            "genero": "mulher_cisgenero",
            "raca_cor_etnia": "parda"
        })
    }

    #[tokio::test]
    async fn test_envio_e_consulta() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        let app = app(&pool);
        let tk = token(&ana);

        let (status, corpo) = enviar(&app, Method::POST, "/fichas", Some(&tk), Some(envio())).await?;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(corpo["classificacao_risco"], "Risco Alto");
        let codigo = corpo["codigo_ficha"].as_str().unwrap_or_default().to_string();

        let (status, ficha) =
            enviar(&app, Method::GET, &format!("/fichas/{}", codigo), Some(&tk), None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ficha["nome_gestante"], "Joana Souza");
        assert_eq!(ficha["imc"], "27.40");

        let (status, doc) = enviar(
            &app,
            Method::GET,
            &format!("/fichas/{}/documento", codigo),
            Some(&tk),
            None,
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["classificacao_risco"], "Risco Alto");
        Ok(())
    }

    #[tokio::test]
    async fn test_envio_invalido_responde_400() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;

        let mut corpo = envio();
        corpo["ubs"] = json!("");
        let (status, erro) =
            enviar(&app(&pool), Method::POST, "/fichas", Some(&token(&ana)), Some(corpo)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(erro["error"], "O campo \"UBS\" é obrigatório.");
        Ok(())
    }

    #[tokio::test]
    async fn test_ficha_de_outro_usuario_responde_404() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        let bia = inserir_usuario(&pool, "Bia", Papel::Comum, "Patos").await?;
        let f = inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id)).await?;

        let (status, _) = enviar(
            &app(&pool),
            Method::GET,
            &format!("/fichas/{}", f.codigo_ficha),
            Some(&token(&bia)),
            None,
        )
        .await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_busca_cpf() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id).cpf("123.456.789-09")).await?;
        let app = app(&pool);
        let tk = token(&ana);

        let (status, corpo) = enviar(
            &app,
            Method::POST,
            "/fichas/busca-cpf",
            Some(&tk),
            Some(json!({ "cpf": "12345678909" })),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(corpo["encontrada"], true);

        let (status, corpo) = enviar(
            &app,
            Method::POST,
            "/fichas/busca-cpf",
            Some(&tk),
            Some(json!({ "cpf": "123" })),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(corpo["error"], "CPF inválido.");
        Ok(())
    }

    #[tokio::test]
    async fn test_historico_paginado() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        for nome in ["Carla", "Beatriz", "Alice"] {
            inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id).nome(nome)).await?;
        }

        let (status, pagina) = enviar(
            &app(&pool),
            Method::POST,
            "/historico",
            Some(&token(&ana)),
            Some(json!({ "sort_column": "nome_gestante", "sort_direction": "asc", "per_page": 2 })),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pagina["total_registros"], 3);
        assert_eq!(pagina["itens"][0]["nome_gestante"], "Alice");
        assert_eq!(pagina["itens"].as_array().map(Vec::len), Some(2));
        Ok(())
    }
}
