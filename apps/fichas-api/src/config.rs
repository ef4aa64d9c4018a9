//! Configuração do serviço lida das variáveis de ambiente

use std::env;
use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use fichas_db::DbConfig;

/// Configuração completa do serviço
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub db: DbConfig,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// Requisições simultâneas atendidas antes de enfileirar
    pub max_concurrency: usize,
    /// Logs em JSON em vez do formato legível
    pub log_json: bool,
}

fn var_opcional(nome: &str) -> Option<String> {
    env::var(nome).ok().filter(|v| !v.trim().is_empty())
}

fn var_numerica<T: std::str::FromStr>(nome: &str, padrao: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var_opcional(nome) {
        Some(valor) => valor
            .trim()
            .parse()
            .with_context(|| format!("{} inválido: {}", nome, valor)),
        None => Ok(padrao),
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let padrao = DbConfig::default();
        let db = DbConfig {
            db_path: var_opcional("FICHAS_DB_PATH").unwrap_or(padrao.db_path),
            max_connections: var_numerica("FICHAS_DB_MAX_CONN", padrao.max_connections)?,
            busy_timeout_secs: var_numerica("FICHAS_DB_BUSY_TIMEOUT", padrao.busy_timeout_secs)?,
        };

        let bind_addr = var_opcional("FICHAS_BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("FICHAS_BIND_ADDR inválido: {}", bind_addr))?;

        let jwt_secret =
            var_opcional("FICHAS_JWT_SECRET").context("FICHAS_JWT_SECRET não definido")?;
        if jwt_secret.len() < 16 {
            bail!("FICHAS_JWT_SECRET deve ter pelo menos 16 caracteres");
        }

        let max_concurrency = var_numerica("FICHAS_MAX_CONCURRENCY", 64usize)?.max(1);
        let log_json = matches!(
            var_opcional("FICHAS_LOG_JSON").as_deref(),
            Some("1") | Some("true")
        );

        Ok(Self {
            db,
            bind_addr,
            jwt_secret,
            max_concurrency,
            log_json,
        })
    }
}
