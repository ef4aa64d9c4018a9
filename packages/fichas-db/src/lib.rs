//! Fichas DB - Biblioteca compartilhada das fichas de estratificação de risco gestacional
//!
//! Esta biblioteca fornece:
//! - Modelos de dados das fichas e dos usuários
//! - Migrações automáticas do banco de dados
//! - Resolução de identidade da gestante (CPF ou nome + data de nascimento)
//! - Regras de ciclo de vida (desfecho, fora de área, PNAR, compartilhamento)
//! - Escopo de visibilidade por papel e município
//! - Agregações e relatórios administrativos
//! - Pool de conexão e funções de utilidades para SQLite

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod agregacao;
pub mod ciclo;
pub mod error;
pub mod escopo;
pub mod exportacao;
pub mod identidade;
pub mod migrations;
pub mod models;
pub mod multiselecao;
pub mod relatorio;
pub mod repositorio;
pub mod rotulos;
pub mod validacao;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

pub use error::{FichaError, FichaResult};

/// Configuração da conexão com o banco de dados
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Caminho para o arquivo SQLite
    pub db_path: String,
    /// Número máximo de conexões no pool
    pub max_connections: u32,
    /// Tempo máximo de espera por um lock de escrita, em segundos
    pub busy_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            db_path: "data/fichas.db".to_string(),
            max_connections: 5,
            busy_timeout_secs: 5,
        }
    }
}

/// Inicializa o pool de conexões SQLite e aplica as migrações pendentes
pub async fn init_db_pool(config: &DbConfig) -> Result<SqlitePool> {
    let db_path = Path::new(&config.db_path);

    // Verifica se o diretório pai existe
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .context("Falha ao criar diretório para banco de dados")?;
        }
    }

    // SQLite serializa as escritas; o busy_timeout faz as demais conexões
    // aguardarem o lock em vez de falhar imediatamente
    let connection_options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
        .pragma("synchronous", "NORMAL");

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connection_options)
        .await
        .context("Falha ao conectar ao banco de dados SQLite")?;

    migrations::run_migrations(&pool)
        .await
        .context("Falha ao aplicar migrações")?;

    info!("Banco de dados inicializado com sucesso: {}", config.db_path);
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_db_connection() -> Result<()> {
        // Usar diretório temporário para testes
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("dados").join("test.db");

        let config = DbConfig {
            db_path: db_path.to_string_lossy().to_string(),
            max_connections: 2,
            busy_timeout_secs: 1,
        };

        // Inicializar banco (o diretório "dados" ainda não existe)
        let pool = init_db_pool(&config).await?;

        let result: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await?;
        assert_eq!(result.0, 1);

        let fichas: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM calculos")
            .fetch_one(&pool)
            .await?;
        assert_eq!(fichas, 0);

        Ok(())
    }
}
