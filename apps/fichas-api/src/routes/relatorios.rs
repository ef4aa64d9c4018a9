//! Relatórios consolidados, monitoramento regional e divisão regional

use axum::extract::{Query, State};
use axum::{Extension, Json};
use fichas_db::escopo::{FiltroRelatorio, Recorte};
use fichas_db::relatorio::{
    gerar_relatorio, painel_monitoramento, FiltroRegional, PainelMonitoramento, Relatorio,
};
use fichas_db::validacao::parse_data_filtro;
use fichas_db::FichaResult;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::auth::Chamador;
use crate::state::AppState;

/// Parâmetros da tela de relatório, ainda como texto
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParametrosRelatorio {
    pub municipio: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
}

impl ParametrosRelatorio {
    fn filtro(&self) -> FichaResult<FiltroRelatorio> {
        let data = |campo: &str, valor: &Option<String>| {
            valor
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| parse_data_filtro(campo, v))
                .transpose()
        };
        Ok(FiltroRelatorio {
            municipio: self.municipio.clone().filter(|m| !m.trim().is_empty()),
            data_inicio: data("data_inicio", &self.data_inicio)?,
            data_fim: data("data_fim", &self.data_fim)?,
        })
    }
}

async fn relatorio(
    state: &AppState,
    chamador: &Chamador,
    recorte: Recorte,
    params: &ParametrosRelatorio,
) -> Result<Json<Relatorio>, ApiError> {
    let filtro = params.filtro()?;
    let relatorio =
        gerar_relatorio(&state.pool, &state.rotulos, &chamador.escopo, recorte, &filtro).await?;
    Ok(Json(relatorio))
}

/// GET /relatorios/geral
pub async fn geral(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Query(params): Query<ParametrosRelatorio>,
) -> Result<Json<Relatorio>, ApiError> {
    relatorio(&state, &chamador, Recorte::Geral, &params).await
}

/// GET /relatorios/saude-indigena
pub async fn saude_indigena(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Query(params): Query<ParametrosRelatorio>,
) -> Result<Json<Relatorio>, ApiError> {
    relatorio(&state, &chamador, Recorte::SaudeIndigena, &params).await
}

/// GET /monitoramento
pub async fn monitoramento(
    State(state): State<AppState>,
    Extension(chamador): Extension<Chamador>,
    Query(filtro): Query<FiltroRegional>,
) -> Result<Json<PainelMonitoramento>, ApiError> {
    let painel = painel_monitoramento(&state.pool, &state.regioes, &chamador.escopo, &filtro).await?;
    Ok(Json(painel))
}

#[derive(Serialize)]
pub struct Macrorregiao {
    pub nome: String,
    pub regioes: Vec<String>,
}

#[derive(Serialize)]
pub struct DivisaoRegional {
    pub macrorregioes: Vec<Macrorregiao>,
    /// Municípios cobertos pelo filtro informado
    pub municipios: Vec<String>,
}

/// GET /regioes
pub async fn regioes(
    State(state): State<AppState>,
    Query(filtro): Query<FiltroRegional>,
) -> Json<DivisaoRegional> {
    let macrorregioes = state
        .regioes
        .macrorregioes()
        .map(|(nome, regioes)| Macrorregiao {
            nome: nome.to_string(),
            regioes: regioes.into_iter().map(str::to_string).collect(),
        })
        .collect();
    let municipios = state
        .regioes
        .municipios(filtro.macrorregiao.as_deref(), filtro.regiao.as_deref());

    Json(DivisaoRegional {
        macrorregioes,
        municipios,
    })
}
