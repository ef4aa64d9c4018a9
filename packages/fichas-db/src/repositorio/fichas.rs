//! Gravação e consulta de fichas

use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{ordenacao, Pagina, Paginacao, ATIVA_SQL};
use crate::error::{FichaError, FichaResult};
use crate::escopo::{EscopoVisibilidade, FiltroEfetivo};
use crate::identidade::{digitos_identidade, ChaveGestante, CPF_SENTINELA};
use crate::models::{Ficha, NovaFicha, TipoUsuario, Usuario};

/// Tentativas de gerar um código ainda não usado
const TENTATIVAS_CODIGO: usize = 5;

/// Colunas aceitas para ordenar o histórico
const ORDENACAO_HISTORICO: &[&str] = &[
    "id",
    "codigo_ficha",
    "nome_gestante",
    "data_nasc",
    "data_envio",
    "periodo_gestacional",
    "pontuacao_total",
    "classificacao_risco",
    "municipio",
    "ubs",
    "acs",
    "profissional",
];

fn gerar_codigo() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

fn nao_encontrada() -> FichaError {
    FichaError::NaoEncontrado("Ficha não encontrada ou você não tem acesso a ela.".to_string())
}

/// Grava uma ficha validada e devolve o código gerado
pub async fn inserir_ficha(
    pool: &SqlitePool,
    usuario: &Usuario,
    nova: &NovaFicha,
) -> FichaResult<String> {
    if usuario.tipo != TipoUsuario::Usuario {
        return Err(FichaError::PermissaoNegada(
            "usuários de apoio não enviam fichas".to_string(),
        ));
    }

    for tentativa in 1..=TENTATIVAS_CODIGO {
        let codigo = gerar_codigo();
        let resultado = sqlx::query(
            r#"
            INSERT INTO calculos (
                user_id, codigo_ficha, nome_gestante, data_nasc, cpf, cpf_digitos, telefone, municipio,
                ubs, acs, periodo_gestacional, data_envio, pontuacao_total, classificacao_risco, imc,
                caracteristicas, avaliacao_nutricional, comorbidades, historia_obstetrica,
                condicoes_gestacionais, profissional, deficiencia, genero, sexualidade,
                raca_cor_etnia, etnia_indigena
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(usuario.id)
        .bind(&codigo)
        .bind(&nova.nome_gestante)
        .bind(&nova.data_nasc)
        .bind(&nova.cpf)
        .bind(digitos_identidade(&nova.cpf))
        .bind(&nova.telefone)
        .bind(&nova.municipio)
        .bind(&nova.ubs)
        .bind(&nova.acs)
        .bind(&nova.periodo_gestacional)
        .bind(nova.data_envio)
        .bind(nova.pontuacao_total)
        .bind(nova.classificacao_risco.rotulo())
        .bind(&nova.imc)
        .bind(nova.caracteristicas.to_json())
        .bind(nova.avaliacao_nutricional.to_json())
        .bind(nova.comorbidades.to_json())
        .bind(nova.historia_obstetrica.to_json())
        .bind(nova.condicoes_gestacionais.to_json())
        .bind(&usuario.nome)
        .bind(&nova.deficiencia)
        .bind(&nova.genero)
        .bind(&nova.sexualidade)
        .bind(&nova.raca_cor_etnia)
        .bind(&nova.etnia_indigena)
        .execute(pool)
        .await;

        match resultado.map_err(FichaError::from) {
            Ok(_) => {
                info!(
                    "Ficha {} gravada por usuário {} ({})",
                    codigo, usuario.id, nova.municipio
                );
                return Ok(codigo);
            }
            Err(FichaError::ConstraintViolation(msg)) if msg.contains("codigo_ficha") => {
                warn!("Código {} já existe (tentativa {})", codigo, tentativa);
            }
            Err(e) => return Err(e),
        }
    }

    Err(FichaError::Persistencia(
        "não foi possível gerar um código de ficha único".to_string(),
    ))
}

async fn ficha_por_codigo(pool: &SqlitePool, codigo: &str) -> FichaResult<Option<Ficha>> {
    Ok(
        sqlx::query_as::<_, Ficha>("SELECT * FROM calculos WHERE codigo_ficha = ?")
            .bind(codigo.trim().to_uppercase())
            .fetch_optional(pool)
            .await?,
    )
}

/// Ficha pelo código, se visível ao usuário
pub async fn buscar_por_codigo(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
    codigo: &str,
) -> FichaResult<Ficha> {
    match ficha_por_codigo(pool, codigo).await? {
        Some(ficha) if escopo.ve_ficha(&ficha) => Ok(ficha),
        Some(_) => {
            warn!(
                "Ficha {} existe, mas usuário {} não tem acesso",
                codigo, escopo.usuario_id
            );
            Err(nao_encontrada())
        }
        None => {
            debug!("Ficha {} não encontrada", codigo);
            Err(nao_encontrada())
        }
    }
}

/// Ficha mais recente do CPF informado visível ao usuário
pub async fn buscar_por_cpf(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
    cpf: &str,
) -> FichaResult<Option<Ficha>> {
    let digitos: String = cpf.chars().filter(char::is_ascii_digit).collect();
    if digitos.len() != 11 {
        return Err(FichaError::validacao("cpf", "CPF inválido."));
    }
    if digitos == CPF_SENTINELA {
        return Ok(None);
    }

    let fichas = sqlx::query_as::<_, Ficha>(
        "SELECT * FROM calculos WHERE cpf_digitos = ? ORDER BY data_envio DESC, id DESC",
    )
    .bind(&digitos)
    .fetch_all(pool)
    .await?;

    Ok(fichas.into_iter().find(|f| escopo.ve_ficha(f)))
}

/// Filtros da tela de histórico
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FiltroHistorico {
    pub nome_gestante: Option<String>,
    pub data_nasc: Option<String>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
    #[serde(flatten)]
    pub paginacao: Paginacao,
}

fn filtros_historico(qb: &mut QueryBuilder<'_, Sqlite>, usuario_id: i64, filtro: &FiltroHistorico) {
    qb.push(" WHERE user_id = ")
        .push_bind(usuario_id)
        .push(" AND ")
        .push(ATIVA_SQL);
    if let Some(nome) = filtro
        .nome_gestante
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        qb.push(" AND nome_gestante LIKE ")
            .push_bind(format!("%{}%", nome));
    }
    if let Some(data) = filtro
        .data_nasc
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        qb.push(" AND data_nasc = ").push_bind(data.to_string());
    }
}

/// Fichas ativas enviadas pelo próprio usuário
pub async fn historico(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
    filtro: &FiltroHistorico,
) -> FichaResult<Pagina<Ficha>> {
    let paginacao = filtro.paginacao.normalizada();
    if escopo.tipo != TipoUsuario::Usuario {
        return Ok(Pagina {
            itens: Vec::new(),
            total_registros: 0,
            page: paginacao.page,
            per_page: paginacao.per_page,
        });
    }

    let mut contagem = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM calculos");
    filtros_historico(&mut contagem, escopo.usuario_id, filtro);
    let total_registros: i64 = contagem.build_query_scalar::<i64>().fetch_one(pool).await?;

    let (limit, offset) = paginacao.limit_offset();
    let mut consulta = QueryBuilder::<Sqlite>::new("SELECT * FROM calculos");
    filtros_historico(&mut consulta, escopo.usuario_id, filtro);
    consulta.push(ordenacao(
        filtro.sort_column.as_deref(),
        filtro.sort_direction.as_deref(),
        ORDENACAO_HISTORICO,
        ("id", "DESC"),
    ));
    consulta
        .push(" LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let itens = consulta.build_query_as::<Ficha>().fetch_all(pool).await?;
    debug!(
        "Histórico do usuário {}: {} de {} fichas",
        escopo.usuario_id,
        itens.len(),
        total_registros
    );

    Ok(Pagina {
        itens,
        total_registros,
        page: paginacao.page,
        per_page: paginacao.per_page,
    })
}

/// Fichas de uma gestante em todos os municípios, sem filtro de escopo
pub(crate) async fn fichas_da_gestante(
    pool: &SqlitePool,
    chave: &ChaveGestante,
) -> FichaResult<Vec<Ficha>> {
    let fichas = match chave {
        ChaveGestante::Cpf(digitos) => {
            sqlx::query_as::<_, Ficha>(
                "SELECT * FROM calculos WHERE cpf_digitos = ? ORDER BY data_envio, id",
            )
            .bind(digitos)
            .fetch_all(pool)
            .await?
        }
        ChaveGestante::NomeNascimento { nome, data_nasc } => {
            sqlx::query_as::<_, Ficha>(
                "SELECT * FROM calculos WHERE nome_gestante = ? AND data_nasc = ? \
                 AND cpf_digitos = '' ORDER BY data_envio, id",
            )
            .bind(nome)
            .bind(data_nasc)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(fichas)
}

/// Histórico completo da gestante a que pertence a ficha, por data de envio
pub async fn historico_gestante(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
    codigo: &str,
) -> FichaResult<Vec<Ficha>> {
    let base = buscar_por_codigo(pool, escopo, codigo).await?;
    let fichas = fichas_da_gestante(pool, &base.chave()).await?;
    Ok(fichas.into_iter().filter(|f| escopo.ve_ficha(f)).collect())
}

/// Fichas alcançadas por um filtro de relatório, da mais recente para a mais antiga
pub async fn fichas_no_filtro(pool: &SqlitePool, filtro: &FiltroEfetivo) -> FichaResult<Vec<Ficha>> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM calculos WHERE 1=1");
    filtro.aplicar_sql(&mut qb);
    qb.push(" ORDER BY data_envio DESC, id DESC");
    let fichas = qb.build_query_as::<Ficha>().fetch_all(pool).await?;
    debug!("{} fichas no filtro", fichas.len());
    Ok(fichas)
}
