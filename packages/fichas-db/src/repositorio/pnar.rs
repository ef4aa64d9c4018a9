//! Encaminhamento ao PNAR (pré-natal de alto risco)

use chrono::Local;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use super::{ordenacao, Pagina, Paginacao, ATIVA_SQL};
use crate::error::{FichaError, FichaResult};
use crate::escopo::{EscopoVisibilidade, Recorte};
use crate::models::{ClassificacaoRisco, TipoUsuario};

const ORDENACAO_PNAR: &[&str] = &["nome_gestante", "periodo_gestacional", "municipio"];

/// Sinaliza a ficha do próprio profissional para um ambulatório PNAR
pub async fn registrar_pnar(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
    codigo_ficha: &str,
    nome_gestante: &str,
    data_nasc: &str,
    servico: &str,
) -> FichaResult<()> {
    let campos = [codigo_ficha, nome_gestante, data_nasc, servico].map(str::trim);
    if campos.iter().any(|c| c.is_empty()) {
        return Err(FichaError::validacao(
            "pnar_servico",
            "Todos os campos são obrigatórios.",
        ));
    }
    let [codigo, nome, nascimento, servico] = campos;

    if escopo.tipo != TipoUsuario::Usuario {
        return Err(FichaError::NaoEncontrado(
            "Ficha não encontrada ou não pertence a você.".to_string(),
        ));
    }

    let agora = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let resultado = sqlx::query(
        "UPDATE calculos SET pnar_sinalizado = 1, pnar_ambulatorio = ?, pnar_data_registro = ? \
         WHERE codigo_ficha = ? AND nome_gestante = ? AND data_nasc = ? AND user_id = ?",
    )
    .bind(servico)
    .bind(&agora)
    .bind(codigo.to_uppercase())
    .bind(nome)
    .bind(nascimento)
    .bind(escopo.usuario_id)
    .execute(pool)
    .await?;

    if resultado.rows_affected() == 0 {
        return Err(FichaError::NaoEncontrado(
            "Ficha não encontrada ou não pertence a você.".to_string(),
        ));
    }

    info!("Ficha {} sinalizada para o PNAR ({})", codigo, servico);
    Ok(())
}

/// Filtros da fila PNAR
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FiltroPnar {
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
    #[serde(flatten)]
    pub paginacao: Paginacao,
}

/// Linha da fila PNAR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ItemPnar {
    pub codigo_ficha: String,
    pub nome_gestante: String,
    pub periodo_gestacional: String,
    pub municipio: String,
    pub pnar_ambulatorio: Option<String>,
}

fn filtros_pnar(qb: &mut QueryBuilder<'_, Sqlite>, servico: Option<&str>) {
    // A classificação é gravada já canônica, na escrita ou ao migrar
    qb.push(" WHERE pnar_sinalizado = 1 AND classificacao_risco = ")
        .push_bind(ClassificacaoRisco::Alto.rotulo())
        .push(" AND ")
        .push(ATIVA_SQL);
    if let Some(servico) = servico {
        qb.push(" AND pnar_ambulatorio = ").push_bind(servico.to_string());
    }
}

/// Fila de gestantes de alto risco sinalizadas para o PNAR
pub async fn listar_pnar(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
    filtro: &FiltroPnar,
) -> FichaResult<Pagina<ItemPnar>> {
    escopo.abrangencia_para(Recorte::Pnar)?;
    let servico = escopo.servico_pnar_obrigatorio()?;
    let paginacao = filtro.paginacao.normalizada();

    let mut contagem = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM calculos");
    filtros_pnar(&mut contagem, servico);
    let total_registros = contagem.build_query_scalar::<i64>().fetch_one(pool).await?;

    let (limit, offset) = paginacao.limit_offset();
    let mut consulta = QueryBuilder::<Sqlite>::new(
        "SELECT codigo_ficha, nome_gestante, periodo_gestacional, municipio, pnar_ambulatorio \
         FROM calculos",
    );
    filtros_pnar(&mut consulta, servico);
    consulta.push(ordenacao(
        filtro.sort_column.as_deref(),
        filtro.sort_direction.as_deref(),
        ORDENACAO_PNAR,
        ("nome_gestante", "ASC"),
    ));
    consulta
        .push(" LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let itens = consulta.build_query_as::<ItemPnar>().fetch_all(pool).await?;
    debug!("Fila PNAR: {} de {}", itens.len(), total_registros);

    Ok(Pagina {
        itens,
        total_registros,
        page: paginacao.page,
        per_page: paginacao.per_page,
    })
}
