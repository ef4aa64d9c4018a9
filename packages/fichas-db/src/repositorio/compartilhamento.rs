//! Compartilhamento de fichas com o administrador municipal

use serde::Serialize;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{info, warn};

use super::ATIVA_SQL;
use crate::error::{FichaError, FichaResult};
use crate::escopo::EscopoVisibilidade;
use crate::models::TipoUsuario;

/// Lotação principal e municípios associados de cada usuário
const LOTACOES_SQL: &str = "SELECT usuario_id, municipio FROM usuario_municipios \
                            UNION SELECT id, municipio FROM usuarios";

/// Administrador municipal ativo que recebe as fichas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct AdminMunicipal {
    pub id: i64,
    pub nome: String,
    pub municipio: String,
}

/// Destinos possíveis antes de compartilhar tudo
#[derive(Debug, Clone, Serialize)]
pub struct PreviaCompartilhamento {
    /// Municípios das fichas ativas do usuário
    pub municipios: Vec<String>,
    pub admins: Vec<AdminMunicipal>,
}

/// Resultado de um compartilhamento
#[derive(Debug, Clone, Serialize)]
pub struct Compartilhamento {
    pub admin_nome: String,
    pub municipio: String,
    pub quantidade: u64,
}

fn exigir_profissional(escopo: &EscopoVisibilidade) -> FichaResult<()> {
    if escopo.tipo == TipoUsuario::Usuario {
        Ok(())
    } else {
        Err(FichaError::PermissaoNegada(
            "usuários de apoio não compartilham fichas".to_string(),
        ))
    }
}

async fn admins_dos_municipios(
    pool: &SqlitePool,
    municipios: &[String],
) -> FichaResult<Vec<AdminMunicipal>> {
    if municipios.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT DISTINCT u.id, u.nome, l.municipio FROM usuarios u JOIN (",
    );
    qb.push(LOTACOES_SQL)
        .push(") l ON l.usuario_id = u.id WHERE u.role = 'municipal' AND u.ativo = 1 AND l.municipio IN (");
    let mut separados = qb.separated(", ");
    for m in municipios {
        separados.push_bind(m.clone());
    }
    separados.push_unseparated(") ORDER BY l.municipio, u.nome");

    Ok(qb.build_query_as::<AdminMunicipal>().fetch_all(pool).await?)
}

async fn admin_do_municipio(pool: &SqlitePool, municipio: &str) -> FichaResult<AdminMunicipal> {
    admins_dos_municipios(pool, &[municipio.to_string()])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            warn!("Nenhum administrador municipal ativo em {}", municipio);
            FichaError::NaoEncontrado(format!(
                "Não há administrador municipal ativo para {}.",
                municipio
            ))
        })
}

/// Municípios das fichas ativas do usuário e seus administradores
pub async fn previa_compartilhamento(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
) -> FichaResult<PreviaCompartilhamento> {
    exigir_profissional(escopo)?;

    let sql = format!(
        "SELECT DISTINCT municipio FROM calculos WHERE user_id = ? AND {} ORDER BY municipio",
        ATIVA_SQL
    );
    let municipios: Vec<String> = sqlx::query_scalar(&sql)
        .bind(escopo.usuario_id)
        .fetch_all(pool)
        .await?;
    if municipios.is_empty() {
        return Err(FichaError::NaoEncontrado(
            "Nenhuma ficha ativa disponível para compartilhar.".to_string(),
        ));
    }

    let admins = admins_dos_municipios(pool, &municipios).await?;
    if admins.is_empty() {
        return Err(FichaError::NaoEncontrado(format!(
            "Nenhum administrador municipal encontrado para: {}",
            municipios.join(", ")
        )));
    }

    Ok(PreviaCompartilhamento { municipios, admins })
}

/// Compartilha todas as fichas ativas do usuário em um município
pub async fn compartilhar_municipio(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
    municipio: &str,
) -> FichaResult<Compartilhamento> {
    exigir_profissional(escopo)?;
    let municipio = municipio.trim();
    if municipio.is_empty() {
        return Err(FichaError::validacao("municipio", "Município não selecionado."));
    }

    let admin = admin_do_municipio(pool, municipio).await?;

    let sql = format!(
        "UPDATE calculos SET pdf_compartilhado_municipal = 1 \
         WHERE user_id = ? AND municipio = ? AND {}",
        ATIVA_SQL
    );
    let quantidade = sqlx::query(&sql)
        .bind(escopo.usuario_id)
        .bind(municipio)
        .execute(pool)
        .await?
        .rows_affected();

    if quantidade == 0 {
        return Err(FichaError::NaoEncontrado(format!(
            "Nenhuma ficha ativa encontrada para {}.",
            municipio
        )));
    }

    info!(
        "{} ficha(s) de {} compartilhada(s) com {} ({})",
        quantidade, escopo.usuario_id, admin.nome, municipio
    );
    Ok(Compartilhamento {
        admin_nome: admin.nome,
        municipio: municipio.to_string(),
        quantidade,
    })
}

/// Compartilha uma ficha do próprio usuário
pub async fn compartilhar_ficha(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
    codigo: &str,
) -> FichaResult<Compartilhamento> {
    exigir_profissional(escopo)?;
    let codigo = codigo.trim().to_uppercase();

    let municipio: String =
        sqlx::query_scalar("SELECT municipio FROM calculos WHERE codigo_ficha = ? AND user_id = ?")
            .bind(&codigo)
            .bind(escopo.usuario_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| FichaError::NaoEncontrado("Ficha não encontrada.".to_string()))?;

    let admin = admin_do_municipio(pool, &municipio).await?;

    let quantidade = sqlx::query(
        "UPDATE calculos SET pdf_compartilhado_municipal = 1 \
         WHERE codigo_ficha = ? AND user_id = ? AND pdf_compartilhado_municipal = 0",
    )
    .bind(&codigo)
    .bind(escopo.usuario_id)
    .execute(pool)
    .await?
    .rows_affected();

    if quantidade == 0 {
        return Err(FichaError::ValorInvalido("Ficha já estava compartilhada.".to_string()));
    }

    info!("Ficha {} compartilhada com {} ({})", codigo, admin.nome, municipio);
    Ok(Compartilhamento {
        admin_nome: admin.nome,
        municipio,
        quantidade,
    })
}

/// Indica se a ficha do próprio usuário já foi compartilhada
pub async fn ficha_compartilhada(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
    codigo: &str,
) -> FichaResult<bool> {
    if escopo.tipo != TipoUsuario::Usuario {
        return Ok(false);
    }
    let flag: Option<bool> = sqlx::query_scalar(
        "SELECT pdf_compartilhado_municipal FROM calculos WHERE codigo_ficha = ? AND user_id = ?",
    )
    .bind(codigo.trim().to_uppercase())
    .bind(escopo.usuario_id)
    .fetch_optional(pool)
    .await?;
    Ok(flag.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escopo::resolver_escopo;
    use crate::fixtures::{
        associar_municipio, banco_temporario, inserir_ficha_teste, inserir_usuario, FichaBuilder,
    };
    use crate::models::Papel;

    #[tokio::test]
    async fn test_previa_lista_admins_por_municipio() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        let escopo = resolver_escopo(&ana);

        let erro = previa_compartilhamento(&pool, &escopo).await.unwrap_err();
        assert!(matches!(erro, FichaError::NaoEncontrado(_)));

        inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id).municipio("Patos")).await?;
        inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id).municipio("Sousa")).await?;
        inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id).municipio("Pombal").desfecho("W90")).await?;

        let erro = previa_compartilhamento(&pool, &escopo).await.unwrap_err();
        assert!(erro.to_string().contains("Patos, Sousa"));

        inserir_usuario(&pool, "Admin Patos", Papel::Municipal, "Patos").await?;
        let regional = inserir_usuario(&pool, "Admin Regional", Papel::Municipal, "Cajazeiras").await?;
        associar_municipio(&pool, regional.id, "Sousa").await?;

        let previa = previa_compartilhamento(&pool, &escopo).await?;
        assert_eq!(previa.municipios, ["Patos", "Sousa"]);
        let destinos: Vec<_> = previa
            .admins
            .iter()
            .map(|a| (a.nome.as_str(), a.municipio.as_str()))
            .collect();
        assert_eq!(destinos, [("Admin Patos", "Patos"), ("Admin Regional", "Sousa")]);
        Ok(())
    }

    #[tokio::test]
    async fn test_compartilhar_municipio() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        let escopo = resolver_escopo(&ana);
        for _ in 0..2 {
            inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id).municipio("Patos")).await?;
        }
        inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id).municipio("Patos").fora_area()).await?;

        let erro = compartilhar_municipio(&pool, &escopo, "Patos").await.unwrap_err();
        assert!(matches!(erro, FichaError::NaoEncontrado(_)));

        inserir_usuario(&pool, "Admin Patos", Papel::Municipal, "Patos").await?;
        let feito = compartilhar_municipio(&pool, &escopo, "Patos").await?;
        assert_eq!(feito.quantidade, 2);
        assert_eq!(feito.admin_nome, "Admin Patos");

        assert!(matches!(
            compartilhar_municipio(&pool, &escopo, " ").await,
            Err(FichaError::Validacao { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_compartilhar_ficha_uma_vez() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        let bia = inserir_usuario(&pool, "Bia", Papel::Comum, "Patos").await?;
        inserir_usuario(&pool, "Admin Patos", Papel::Municipal, "Patos").await?;
        let f = inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id)).await?;
        let escopo = resolver_escopo(&ana);

        assert!(!ficha_compartilhada(&pool, &escopo, &f.codigo_ficha).await?);
        compartilhar_ficha(&pool, &escopo, &f.codigo_ficha).await?;
        assert!(ficha_compartilhada(&pool, &escopo, &f.codigo_ficha).await?);

        let erro = compartilhar_ficha(&pool, &escopo, &f.codigo_ficha).await.unwrap_err();
        assert_eq!(erro.to_string(), "Ficha já estava compartilhada.");

        let outra = resolver_escopo(&bia);
        assert!(matches!(
            compartilhar_ficha(&pool, &outra, &f.codigo_ficha).await,
            Err(FichaError::NaoEncontrado(_))
        ));
        assert!(!ficha_compartilhada(&pool, &outra, &f.codigo_ficha).await?);
        Ok(())
    }
}
