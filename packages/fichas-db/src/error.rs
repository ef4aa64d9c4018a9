//! Definições de erro para a biblioteca fichas-db
//!
//! Este módulo define a taxonomia de erros usada pelas operações sobre fichas

use thiserror::Error;

/// Erros das operações sobre fichas, gestantes e relatórios
#[derive(Error, Debug)]
pub enum FichaError {
    /// Entrada ausente ou malformada; nada foi gravado
    #[error("{mensagem}")]
    Validacao { campo: String, mensagem: String },

    /// Valor fora do vocabulário reconhecido (ex.: código de desfecho)
    #[error("{0}")]
    ValorInvalido(String),

    /// Registro inexistente ou fora do escopo de quem consulta
    #[error("{0}")]
    NaoEncontrado(String),

    #[error("Acesso negado: {0}")]
    PermissaoNegada(String),

    #[error("Violação de restrição: {0}")]
    ConstraintViolation(String),

    #[error("Erro de persistência: {0}")]
    Persistencia(String),
}

/// Alias para operações que podem falhar com [`FichaError`]
pub type FichaResult<T> = Result<T, FichaError>;

impl FichaError {
    pub fn validacao(campo: impl Into<String>, mensagem: impl Into<String>) -> Self {
        FichaError::Validacao {
            campo: campo.into(),
            mensagem: mensagem.into(),
        }
    }

    /// Indica se o erro vem do armazenamento (e deve ser exposto de forma genérica)
    pub fn is_persistencia(&self) -> bool {
        matches!(
            self,
            FichaError::Persistencia(_) | FichaError::ConstraintViolation(_)
        )
    }
}

/// Conversão de erros específicos do SQLx para nossos tipos de erro
impl From<sqlx::Error> for FichaError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => {
                FichaError::NaoEncontrado("Registro não encontrado".to_string())
            }
            sqlx::Error::Database(dbe) => {
                if let Some(code) = dbe.code() {
                    // 2067 = SQLITE_CONSTRAINT_UNIQUE, 1555 = SQLITE_CONSTRAINT_PRIMARYKEY
                    if matches!(code.as_ref(), "23000" | "2067" | "1555" | "787") {
                        return FichaError::ConstraintViolation(dbe.message().to_string());
                    }
                }
                FichaError::Persistencia(dbe.message().to_string())
            }
            sqlx::Error::ColumnNotFound(col) => {
                FichaError::Persistencia(format!("Coluna não encontrada: {}", col))
            }
            sqlx::Error::ColumnDecode { index, source } => FichaError::Persistencia(format!(
                "Erro ao decodificar coluna {}: {}",
                index, source
            )),
            sqlx::Error::Io(io_err) => FichaError::Persistencia(io_err.to_string()),
            sqlx::Error::PoolClosed => {
                FichaError::Persistencia("Pool de conexões fechado".to_string())
            }
            sqlx::Error::PoolTimedOut => {
                FichaError::Persistencia("Timeout no pool de conexões".to_string())
            }
            other => FichaError::Persistencia(format!("Erro inesperado: {:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_vira_nao_encontrado() {
        let erro: FichaError = sqlx::Error::RowNotFound.into();
        assert!(matches!(erro, FichaError::NaoEncontrado(_)));
        assert!(!erro.is_persistencia());
    }

    #[test]
    fn test_mensagem_de_validacao_e_exibida_sem_prefixo() {
        let erro = FichaError::validacao("cpf", "CPF inválido. Deve conter exatamente 11 dígitos.");
        assert_eq!(
            erro.to_string(),
            "CPF inválido. Deve conter exatamente 11 dígitos."
        );
    }
}
