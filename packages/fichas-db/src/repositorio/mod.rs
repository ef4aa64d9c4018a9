//! Operações de persistência sobre fichas e usuários
//!
//! Cada operação adquire uma conexão (ou transação) do pool e a devolve em
//! qualquer caminho de saída; uma transação não confirmada é desfeita quando
//! descartada. Atualizações que alcançam várias fichas são um único `UPDATE`
//! com o predicado de identidade, confirmado uma vez.

use serde::{Deserialize, Serialize};
use tracing::warn;

pub mod ciclo;
pub mod compartilhamento;
pub mod fichas;
pub mod pnar;
pub mod usuarios;

pub use ciclo::{marcar_fora_area, registrar_desfecho_lote};
pub use compartilhamento::{
    compartilhar_ficha, compartilhar_municipio, ficha_compartilhada, previa_compartilhamento,
    AdminMunicipal, Compartilhamento, PreviaCompartilhamento,
};
pub use fichas::{
    buscar_por_codigo, buscar_por_cpf, fichas_no_filtro, historico, historico_gestante,
    inserir_ficha, FiltroHistorico,
};
pub use pnar::{listar_pnar, registrar_pnar, FiltroPnar, ItemPnar};
pub use usuarios::{carregar_usuario, municipios_visiveis, usuarios_ativos_por_municipio};

/// Condição SQL de ficha ativa (sem desfecho e dentro da área)
pub(crate) const ATIVA_SQL: &str = "(desfecho IS NULL OR TRIM(desfecho) = '') AND fa = 0";

/// Limite de registros por página
pub const MAX_POR_PAGINA: u32 = 100;

/// Página pedida pelo cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paginacao {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Paginacao {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: MAX_POR_PAGINA,
        }
    }
}

impl Paginacao {
    /// Página mínima 1, entre 1 e [`MAX_POR_PAGINA`] itens
    pub fn normalizada(self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_POR_PAGINA),
        }
    }

    pub(crate) fn limit_offset(self) -> (i64, i64) {
        let p = self.normalizada();
        (
            i64::from(p.per_page),
            i64::from(p.page - 1) * i64::from(p.per_page),
        )
    }
}

/// Resultado paginado
#[derive(Debug, Clone, Serialize)]
pub struct Pagina<T> {
    pub itens: Vec<T>,
    pub total_registros: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Monta `ORDER BY` a partir de uma lista de colunas permitidas.
///
/// Valores fora da lista caem no padrão com um aviso no log.
pub(crate) fn ordenacao(
    coluna: Option<&str>,
    direcao: Option<&str>,
    permitidas: &[&'static str],
    padrao: (&'static str, &'static str),
) -> String {
    let coluna = match coluna.map(str::trim).filter(|c| !c.is_empty()) {
        None => padrao.0,
        Some(c) => match permitidas.iter().find(|p| **p == c) {
            Some(p) => *p,
            None => {
                warn!("Coluna de ordenação inválida: {}. Usando '{}'.", c, padrao.0);
                padrao.0
            }
        },
    };
    let direcao = match direcao.map(|d| d.trim().to_uppercase()) {
        None => padrao.1,
        Some(d) if d == "ASC" => "ASC",
        Some(d) if d == "DESC" => "DESC",
        Some(d) => {
            warn!("Direção de ordenação inválida: {}. Usando '{}'.", d, padrao.1);
            padrao.1
        }
    };
    format!(" ORDER BY {} {}", coluna, direcao)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginacao_normalizada() {
        let p = Paginacao { page: 0, per_page: 500 }.normalizada();
        assert_eq!(p, Paginacao { page: 1, per_page: 100 });
        assert_eq!(Paginacao { page: 3, per_page: 20 }.limit_offset(), (20, 40));
    }

    #[test]
    fn test_ordenacao_com_lista_permitida() {
        let permitidas = ["id", "nome_gestante"];
        assert_eq!(
            ordenacao(Some("nome_gestante"), Some("asc"), &permitidas, ("id", "DESC")),
            " ORDER BY nome_gestante ASC"
        );
        assert_eq!(
            ordenacao(Some("senha; DROP TABLE calculos"), Some("lado"), &permitidas, ("id", "DESC")),
            " ORDER BY id DESC"
        );
        assert_eq!(ordenacao(None, None, &permitidas, ("id", "DESC")), " ORDER BY id DESC");
    }
}
