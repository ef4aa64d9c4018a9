//! Contas de usuário e municípios associados

use std::collections::BTreeMap;

use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, warn};

use crate::error::{FichaError, FichaResult};
use crate::escopo::{Abrangencia, Recorte};
use crate::models::{Papel, TipoUsuario, Usuario};

#[derive(FromRow)]
struct LinhaUsuario {
    id: i64,
    nome: String,
    municipio: Option<String>,
    role: String,
    is_admin: bool,
    is_super_admin: bool,
    approved: bool,
    ativo: bool,
}

#[derive(FromRow)]
struct LinhaApoio {
    id: i64,
    nome: String,
    municipio: Option<String>,
    acesso_saude_indigena: bool,
    pnar: bool,
    servico: Option<String>,
    approved: bool,
    ativo: bool,
}

fn conta_bloqueada(aprovada: bool, ativa: bool) -> Option<FichaError> {
    if !aprovada {
        Some(FichaError::PermissaoNegada("conta aguardando aprovação".to_string()))
    } else if !ativa {
        Some(FichaError::PermissaoNegada("conta desativada".to_string()))
    } else {
        None
    }
}

/// Carrega o usuário autenticado com seus municípios associados.
///
/// Contas não aprovadas ou desativadas são recusadas.
pub async fn carregar_usuario(
    pool: &SqlitePool,
    tipo: TipoUsuario,
    id: i64,
) -> FichaResult<Usuario> {
    let usuario = match tipo {
        TipoUsuario::Usuario => {
            let linha = sqlx::query_as::<_, LinhaUsuario>(
                "SELECT id, nome, municipio, role, is_admin, is_super_admin, approved, ativo \
                 FROM usuarios WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| FichaError::NaoEncontrado(format!("usuário {} não encontrado", id)))?;

            if let Some(erro) = conta_bloqueada(linha.approved, linha.ativo) {
                warn!("Acesso recusado ao usuário {}: {}", id, erro);
                return Err(erro);
            }

            let papel: Papel = linha
                .role
                .parse()
                .map_err(FichaError::Persistencia)?;
            let municipios_associados: Vec<String> = sqlx::query_scalar(
                "SELECT municipio FROM usuario_municipios WHERE usuario_id = ? ORDER BY municipio",
            )
            .bind(id)
            .fetch_all(pool)
            .await?;

            Usuario {
                id: linha.id,
                tipo,
                nome: linha.nome,
                papel,
                is_admin: linha.is_admin,
                is_super_admin: linha.is_super_admin,
                municipio: linha.municipio.filter(|m| !m.trim().is_empty()),
                municipios_associados,
                acesso_saude_indigena: false,
                pnar: false,
                servico_pnar: None,
                ativo: linha.ativo,
            }
        }
        TipoUsuario::Apoio => {
            let linha = sqlx::query_as::<_, LinhaApoio>(
                "SELECT id, nome, municipio, acesso_saude_indigena, pnar, servico, approved, ativo \
                 FROM usuarios_apoio WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| FichaError::NaoEncontrado(format!("usuário de apoio {} não encontrado", id)))?;

            if let Some(erro) = conta_bloqueada(linha.approved, linha.ativo) {
                warn!("Acesso recusado ao apoio {}: {}", id, erro);
                return Err(erro);
            }

            Usuario {
                id: linha.id,
                tipo,
                nome: linha.nome,
                papel: Papel::Apoio,
                is_admin: false,
                is_super_admin: false,
                municipio: linha.municipio.filter(|m| !m.trim().is_empty()),
                municipios_associados: Vec::new(),
                acesso_saude_indigena: linha.acesso_saude_indigena,
                pnar: linha.pnar,
                servico_pnar: linha.servico,
                ativo: linha.ativo,
            }
        }
    };

    debug!("Usuário {} ({}) carregado", usuario.id, usuario.papel);
    Ok(usuario)
}

/// Municípios com fichas dentro da abrangência, para as listas de filtro
pub async fn municipios_visiveis(
    pool: &SqlitePool,
    abrangencia: &Abrangencia,
    recorte: Recorte,
) -> FichaResult<Vec<String>> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT DISTINCT municipio FROM calculos WHERE TRIM(municipio) <> ''",
    );
    if recorte == Recorte::SaudeIndigena {
        qb.push(" AND LOWER(TRIM(raca_cor_etnia)) IN ('indigena', 'indígena')");
    }
    if let Abrangencia::Municipios(municipios) = abrangencia {
        if municipios.is_empty() {
            return Ok(Vec::new());
        }
        qb.push(" AND municipio IN (");
        let mut separados = qb.separated(", ");
        for m in municipios {
            separados.push_bind(m.clone());
        }
        separados.push_unseparated(")");
    }
    qb.push(" ORDER BY municipio");

    Ok(qb.build_query_scalar::<String>().fetch_all(pool).await?)
}

/// Profissionais ativos e aprovados lotados em cada município pedido
pub async fn usuarios_ativos_por_municipio(
    pool: &SqlitePool,
    municipios: &[String],
) -> FichaResult<BTreeMap<String, i64>> {
    let mut contagem: BTreeMap<String, i64> =
        municipios.iter().map(|m| (m.clone(), 0)).collect();
    if municipios.is_empty() {
        return Ok(contagem);
    }

    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT municipio, COUNT(*) FROM usuarios WHERE ativo = 1 AND approved = 1 AND municipio IN (",
    );
    let mut separados = qb.separated(", ");
    for m in municipios {
        separados.push_bind(m.clone());
    }
    separados.push_unseparated(") GROUP BY municipio");

    let linhas: Vec<(String, i64)> = qb.build_query_as().fetch_all(pool).await?;
    for (municipio, total) in linhas {
        contagem.insert(municipio, total);
    }
    Ok(contagem)
}
