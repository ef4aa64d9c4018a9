//! Registro de desfecho e marcação fora de área
//!
//! O desfecho é um fato clínico sobre a pessoa: vale para todas as fichas sem
//! desfecho da gestante, em qualquer município. "Fora de área" diz respeito à
//! cobertura de um município: vale apenas para as fichas da gestante naquele
//! município.

use chrono::Local;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{FichaError, FichaResult};
use crate::escopo::EscopoVisibilidade;
use crate::identidade::ChaveGestante;
use crate::models::Ficha;
use crate::rotulos::Rotulos;

fn obrigatorio<'a>(valor: &'a str) -> Option<&'a str> {
    Some(valor.trim()).filter(|v| !v.is_empty())
}

/// Registra o desfecho em todas as fichas sem desfecho da gestante.
///
/// Devolve os códigos das fichas atualizadas.
pub async fn registrar_desfecho_lote(
    pool: &SqlitePool,
    rotulos: &Rotulos,
    escopo: &EscopoVisibilidade,
    nome_gestante: &str,
    data_nasc: &str,
    desfecho: &str,
) -> FichaResult<Vec<String>> {
    let (Some(nome), Some(nascimento), Some(desfecho)) = (
        obrigatorio(nome_gestante),
        obrigatorio(data_nasc),
        obrigatorio(desfecho),
    ) else {
        return Err(FichaError::validacao(
            "desfecho",
            "Nome da gestante, data de nascimento e desfecho são obrigatórios.",
        ));
    };

    if !rotulos.desfecho_valido(desfecho) {
        warn!("Desfecho inválido: {}", desfecho);
        return Err(FichaError::ValorInvalido(format!(
            "Desfecho inválido: {}.",
            desfecho
        )));
    }

    // A transação começa pela escrita: no WAL, ler antes de escrever pode
    // falhar com SQLITE_BUSY sem passar pelo busy_timeout
    let mut tx = pool.begin().await?;

    let data_desfecho = Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
    let atualizadas = sqlx::query_as::<_, Ficha>(
        "UPDATE calculos SET desfecho = ?, data_desfecho = ? \
         WHERE nome_gestante = ? AND data_nasc = ? \
         AND (desfecho IS NULL OR TRIM(desfecho) = '') \
         RETURNING *",
    )
    .bind(desfecho)
    .bind(&data_desfecho)
    .bind(nome)
    .bind(nascimento)
    .fetch_all(&mut *tx)
    .await?;

    // Quem não vê nenhuma das fichas não fica sabendo que elas existem;
    // descartar `tx` desfaz a atualização
    if !atualizadas.iter().any(|f| escopo.ve_ficha(f)) {
        return Err(FichaError::NaoEncontrado(
            "Nenhuma ficha encontrada para o nome e data de nascimento fornecidos.".to_string(),
        ));
    }

    tx.commit().await?;
    let codigos: Vec<String> = atualizadas.into_iter().map(|f| f.codigo_ficha).collect();

    info!(
        "Desfecho {} ({}) registrado em {} ficha(s) por usuário {}",
        desfecho,
        rotulos.desfecho(desfecho),
        codigos.len(),
        escopo.usuario_id
    );
    Ok(codigos)
}

/// Marca como fora de área todas as fichas da gestante no município da ficha
/// informada. Devolve os códigos das fichas atualizadas.
pub async fn marcar_fora_area(
    pool: &SqlitePool,
    escopo: &EscopoVisibilidade,
    codigo_ficha: &str,
    nome_gestante: &str,
    data_nasc: &str,
) -> FichaResult<Vec<String>> {
    let (Some(codigo), Some(nome), Some(nascimento)) = (
        obrigatorio(codigo_ficha),
        obrigatorio(nome_gestante),
        obrigatorio(data_nasc),
    ) else {
        return Err(FichaError::validacao("codigo_ficha", "Dados incompletos."));
    };

    let nao_encontrado = || {
        FichaError::NaoEncontrado(
            "Registro não encontrado ou já marcado como fora de área.".to_string(),
        )
    };

    let referencia = sqlx::query_as::<_, Ficha>(
        "SELECT * FROM calculos WHERE codigo_ficha = ? AND nome_gestante = ? \
         AND data_nasc = ? AND fa = 0",
    )
    .bind(codigo.to_uppercase())
    .bind(nome)
    .bind(nascimento)
    .fetch_optional(pool)
    .await?
    .filter(|f| escopo.ve_ficha(f))
    .ok_or_else(nao_encontrado)?;

    // Sem transação aberta pela leitura acima; a marcação é uma instrução só
    let codigos: Vec<String> = match referencia.chave() {
        ChaveGestante::Cpf(digitos) => {
            sqlx::query_scalar(
                "UPDATE calculos SET fa = 1 WHERE cpf_digitos = ? AND municipio = ? AND fa = 0 \
                 RETURNING codigo_ficha",
            )
            .bind(digitos)
            .bind(&referencia.municipio)
            .fetch_all(pool)
            .await?
        }
        ChaveGestante::NomeNascimento { nome, data_nasc } => {
            sqlx::query_scalar(
                "UPDATE calculos SET fa = 1 WHERE nome_gestante = ? AND data_nasc = ? \
                 AND municipio = ? AND cpf_digitos = '' AND fa = 0 RETURNING codigo_ficha",
            )
            .bind(nome)
            .bind(data_nasc)
            .bind(&referencia.municipio)
            .fetch_all(pool)
            .await?
        }
    };

    if codigos.is_empty() {
        return Err(nao_encontrado());
    }

    info!(
        "{} ficha(s) marcada(s) como fora de área em {} por usuário {}",
        codigos.len(),
        referencia.municipio,
        escopo.usuario_id
    );
    Ok(codigos)
}
