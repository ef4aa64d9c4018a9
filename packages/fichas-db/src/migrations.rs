//! Esquema do banco das fichas, versionado por `PRAGMA user_version`
//!
//! Migrações só são acrescentadas ao fim da lista; a posição é o número da versão.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};

use crate::identidade::digitos_identidade;
use crate::models::ClassificacaoRisco;

/// Lista de migrações SQL a serem aplicadas
const MIGRATIONS: &[&str] = &[
    // 001_usuarios.sql
    r#"
    -- Profissionais cadastrados (comum, municipal, estadual)
    CREATE TABLE IF NOT EXISTS usuarios (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nome TEXT NOT NULL,
        municipio TEXT NOT NULL DEFAULT 'Não informado',
        cpf TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL UNIQUE,
        profissao TEXT NOT NULL DEFAULT '',
        approved INTEGER NOT NULL DEFAULT 0,
        ativo INTEGER NOT NULL DEFAULT 1,
        is_admin INTEGER NOT NULL DEFAULT 0,
        is_super_admin INTEGER NOT NULL DEFAULT 0,
        role TEXT NOT NULL DEFAULT 'comum' CHECK (role IN ('comum', 'municipal', 'estadual'))
    );

    -- Usuários de apoio (acesso especial a PNAR e saúde indígena)
    CREATE TABLE IF NOT EXISTS usuarios_apoio (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nome TEXT NOT NULL,
        cpf TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL UNIQUE,
        municipio TEXT,
        acesso_saude_indigena INTEGER NOT NULL DEFAULT 0,
        pnar INTEGER NOT NULL DEFAULT 0,
        servico TEXT,
        approved INTEGER NOT NULL DEFAULT 1,
        ativo INTEGER NOT NULL DEFAULT 1
    );

    -- Municípios adicionais associados a um usuário
    CREATE TABLE IF NOT EXISTS usuario_municipios (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        usuario_id INTEGER NOT NULL,
        municipio TEXT NOT NULL,
        FOREIGN KEY (usuario_id) REFERENCES usuarios (id) ON DELETE CASCADE,
        UNIQUE (usuario_id, municipio)
    );

    CREATE INDEX IF NOT EXISTS idx_apoio_ativo_pnar ON usuarios_apoio (ativo, pnar, municipio);
    CREATE INDEX IF NOT EXISTS idx_usuarios_municipio ON usuarios (municipio, role, ativo);
    "#,

    // 002_calculos.sql
    r#"
    -- Fichas de estratificação de risco
    CREATE TABLE IF NOT EXISTS calculos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        codigo_ficha TEXT NOT NULL,
        nome_gestante TEXT NOT NULL,
        data_nasc TEXT NOT NULL,
        cpf TEXT NOT NULL DEFAULT '000.000.000-00',
        telefone TEXT NOT NULL,
        municipio TEXT NOT NULL,
        ubs TEXT NOT NULL,
        acs TEXT NOT NULL,
        periodo_gestacional TEXT NOT NULL,
        data_envio TEXT NOT NULL,
        pontuacao_total INTEGER NOT NULL DEFAULT 0,
        classificacao_risco TEXT NOT NULL,
        imc TEXT,
        caracteristicas TEXT,
        avaliacao_nutricional TEXT,
        comorbidades TEXT,
        historia_obstetrica TEXT,
        condicoes_gestacionais TEXT,
        profissional TEXT,
        deficiencia TEXT NOT NULL DEFAULT 'Não informado',
        genero TEXT NOT NULL DEFAULT 'Não informado',
        sexualidade TEXT NOT NULL DEFAULT 'Não informado',
        raca_cor_etnia TEXT NOT NULL DEFAULT 'Não informado',
        etnia_indigena TEXT NOT NULL DEFAULT '',
        -- Ciclo de vida
        desfecho TEXT,
        data_desfecho TEXT,
        fa INTEGER NOT NULL DEFAULT 0,
        pdf_compartilhado_municipal INTEGER NOT NULL DEFAULT 0,
        pnar_sinalizado INTEGER NOT NULL DEFAULT 0,
        pnar_ambulatorio TEXT,
        pnar_data_registro TEXT,
        FOREIGN KEY (user_id) REFERENCES usuarios (id) ON DELETE CASCADE
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_calculos_codigo ON calculos (codigo_ficha);
    CREATE INDEX IF NOT EXISTS idx_calculos_identidade ON calculos (nome_gestante, data_nasc);
    CREATE INDEX IF NOT EXISTS idx_calculos_municipio ON calculos (municipio, data_envio);
    CREATE INDEX IF NOT EXISTS idx_calculos_user ON calculos (user_id, fa);
    "#,

    // 003_identidade_normalizada.sql
    r#"
    -- Dígitos do CPF (vazio quando desconhecido); NULL até ser preenchido
    ALTER TABLE calculos ADD COLUMN cpf_digitos TEXT;
    CREATE INDEX IF NOT EXISTS idx_calculos_cpf_digitos ON calculos (cpf_digitos);
    "#,
];

/// Versão gravada em `PRAGMA user_version`; zero em um banco novo
async fn versao_atual(pool: &SqlitePool) -> i64 {
    match sqlx::query_scalar("PRAGMA user_version").fetch_one(pool).await {
        Ok(v) => v,
        Err(e) => {
            error!("Erro ao obter versão do banco: {}", e);
            0
        }
    }
}

/// Aplica, cada uma em sua transação, as migrações acima da versão do banco
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let versao = versao_atual(pool).await;
    let pendentes = MIGRATIONS
        .iter()
        .zip(1i64..)
        .filter(|(_, numero)| *numero > versao);

    let mut aplicadas = 0;
    for (sql, numero) in pendentes {
        let mut tx = pool
            .begin()
            .await
            .with_context(|| format!("Falha ao iniciar migração {}", numero))?;

        sqlx::query(sql)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Falha ao executar migração {}", numero))?;
        sqlx::query(&format!("PRAGMA user_version = {}", numero))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Falha ao registrar versão {}", numero))?;

        tx.commit()
            .await
            .with_context(|| format!("Falha ao confirmar migração {}", numero))?;
        info!("Migração {} aplicada", numero);
        aplicadas += 1;
    }

    if aplicadas == 0 {
        debug!("Esquema já atualizado na versão {}", versao);
    } else {
        info!("{} migração(ões) aplicada(s); esquema na versão {}", aplicadas, MIGRATIONS.len());
    }

    normalizar_registros_legados(pool).await
}

/// `DD/MM/YYYY[...]` → `YYYY-MM-DD`
const DATA_BR_PARA_ISO_SQL: &str = "UPDATE calculos \
    SET data_envio = substr(data_envio, 7, 4) || '-' || substr(data_envio, 4, 2) || '-' || substr(data_envio, 1, 2) \
    WHERE data_envio GLOB '[0-9][0-9]/[0-9][0-9]/[0-9][0-9][0-9][0-9]*'";

/// `YYYY-MM-DD HH:MM:SS` → `YYYY-MM-DD`
const DATA_SEM_HORA_SQL: &str = "UPDATE calculos SET data_envio = substr(data_envio, 1, 10) \
    WHERE length(data_envio) > 10 AND data_envio GLOB '[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]*'";

/// Reescreve linhas gravadas por versões anteriores na forma que as consultas comparam.
///
/// - `data_envio` passa a ser sempre `YYYY-MM-DD`, para que filtros e ordenação
///   por texto coincidam com a data decodificada;
/// - `classificacao_risco` reconhecida recebe o rótulo canônico;
/// - `cpf_digitos` ausente é calculado com a mesma normalização da memória.
///
/// Idempotente; roda a cada inicialização depois das migrações.
pub async fn normalizar_registros_legados(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await.context("Falha ao iniciar normalização")?;

    let mut datas = 0;
    for sql in [DATA_BR_PARA_ISO_SQL, DATA_SEM_HORA_SQL] {
        datas += sqlx::query(sql)
            .execute(&mut *tx)
            .await
            .context("Falha ao normalizar data_envio")?
            .rows_affected();
    }

    let canonicas = ClassificacaoRisco::TODAS.map(ClassificacaoRisco::rotulo);
    let variantes: Vec<String> = sqlx::query_scalar(
        "SELECT DISTINCT classificacao_risco FROM calculos WHERE classificacao_risco NOT IN (?, ?, ?)",
    )
    .bind(canonicas[0])
    .bind(canonicas[1])
    .bind(canonicas[2])
    .fetch_all(&mut *tx)
    .await
    .context("Falha ao ler classificações")?;

    let mut classificacoes = 0;
    for variante in variantes {
        match ClassificacaoRisco::canonicalizar(&variante) {
            Some(c) => {
                classificacoes += sqlx::query(
                    "UPDATE calculos SET classificacao_risco = ? WHERE classificacao_risco = ?",
                )
                .bind(c.rotulo())
                .bind(&variante)
                .execute(&mut *tx)
                .await
                .context("Falha ao normalizar classificação")?
                .rows_affected();
            }
            None => warn!("Classificação de risco não reconhecida mantida: {:?}", variante),
        }
    }

    let pendentes: Vec<(i64, String)> = sqlx::query_as(
        "SELECT id, COALESCE(cpf, '') FROM calculos WHERE cpf_digitos IS NULL",
    )
    .fetch_all(&mut *tx)
    .await
    .context("Falha ao ler CPFs pendentes")?;

    for (id, cpf) in &pendentes {
        sqlx::query("UPDATE calculos SET cpf_digitos = ? WHERE id = ?")
            .bind(digitos_identidade(cpf))
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Falha ao preencher cpf_digitos")?;
    }

    tx.commit().await.context("Falha ao confirmar normalização")?;

    if datas + classificacoes > 0 || !pendentes.is_empty() {
        info!(
            "Registros legados normalizados: {} data(s), {} classificação(ões), {} CPF(s)",
            datas,
            classificacoes,
            pendentes.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqliteConnectOptions;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_migrations() -> Result<()> {
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("test_migrations.db");

        let conn_options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(conn_options).await?;

        run_migrations(&pool).await?;

        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&pool)
            .await?;
        assert_eq!(version, MIGRATIONS.len() as i64);

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        )
        .fetch_all(&pool)
        .await?;

        for esperada in ["usuarios", "usuarios_apoio", "usuario_municipios", "calculos"] {
            assert!(tables.contains(&esperada.to_string()), "faltou {}", esperada);
        }

        // Reaplicar não deve falhar nem mudar a versão
        run_migrations(&pool).await?;
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&pool)
            .await?;
        assert_eq!(version, MIGRATIONS.len() as i64);

        Ok(())
    }

    #[tokio::test]
    async fn test_normaliza_registros_gravados_por_versoes_anteriores() -> Result<()> {
        use crate::fixtures::{banco_temporario, inserir_ficha_teste, inserir_usuario, FichaBuilder};
        use crate::models::Papel;

        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        let base = || FichaBuilder::new(0).user_id(ana.id);
        let f = inserir_ficha_teste(&pool, base().cpf("123.456.789/00")).await?;
        let sem_cpf = inserir_ficha_teste(&pool, base()).await?;
        let estranha = inserir_ficha_teste(&pool, base()).await?;

        // Linhas como eram gravadas antes da coluna cpf_digitos
        sqlx::query(
            "UPDATE calculos SET cpf_digitos = NULL, data_envio = '15/01/2025 08:00', \
             classificacao_risco = ' MÉDIO   risco ' WHERE codigo_ficha = ?",
        )
        .bind(&f.codigo_ficha)
        .execute(&pool)
        .await?;
        sqlx::query("UPDATE calculos SET cpf_digitos = NULL WHERE codigo_ficha = ?")
            .bind(&sem_cpf.codigo_ficha)
            .execute(&pool)
            .await?;
        sqlx::query("UPDATE calculos SET classificacao_risco = 'gravíssimo' WHERE codigo_ficha = ?")
            .bind(&estranha.codigo_ficha)
            .execute(&pool)
            .await?;

        run_migrations(&pool).await?;

        let (digitos, data, classificacao): (String, String, String) = sqlx::query_as(
            "SELECT cpf_digitos, data_envio, classificacao_risco FROM calculos WHERE codigo_ficha = ?",
        )
        .bind(&f.codigo_ficha)
        .fetch_one(&pool)
        .await?;
        assert_eq!(digitos, "12345678900");
        assert_eq!(data, "2025-01-15");
        assert_eq!(classificacao, "Risco Intermediário");

        let digitos: Option<String> =
            sqlx::query_scalar("SELECT cpf_digitos FROM calculos WHERE codigo_ficha = ?")
                .bind(&sem_cpf.codigo_ficha)
                .fetch_one(&pool)
                .await?;
        assert_eq!(digitos.as_deref(), Some(""));

        // Grafia desconhecida é mantida como está
        let classificacao: String =
            sqlx::query_scalar("SELECT classificacao_risco FROM calculos WHERE codigo_ficha = ?")
                .bind(&estranha.codigo_ficha)
                .fetch_one(&pool)
                .await?;
        assert_eq!(classificacao, "gravíssimo");
        Ok(())
    }
}
