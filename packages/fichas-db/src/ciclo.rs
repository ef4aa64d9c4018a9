//! Ciclo de vida de uma ficha
//!
//! Depois de gravada, uma ficha só muda por meio destes campos. Desfecho, fora
//! de área e sinalização PNAR são independentes entre si: nenhuma ordem é
//! imposta, e o estado "ativa" é derivado deles em [`CicloVida::status`].

use serde::{Deserialize, Serialize};

/// Situação derivada de uma ficha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFicha {
    /// Sem desfecho e dentro da área
    Ativa,
    /// Desfecho registrado
    Resolvida,
    /// Marcada como fora da área do município
    ForaDeArea,
}

impl std::fmt::Display for StatusFicha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFicha::Ativa => write!(f, "ativa"),
            StatusFicha::Resolvida => write!(f, "resolvida"),
            StatusFicha::ForaDeArea => write!(f, "fora_de_area"),
        }
    }
}

/// Campos mutáveis de uma ficha
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CicloVida {
    /// Código do desfecho; `None` enquanto a gestação está em curso
    pub desfecho: Option<String>,
    pub data_desfecho: Option<String>,
    /// Coluna `fa`
    pub fora_area: bool,
    pub pnar_sinalizado: bool,
    pub pnar_ambulatorio: Option<String>,
    pub pnar_data_registro: Option<String>,
    pub pdf_compartilhado_municipal: bool,
}

impl CicloVida {
    /// Desfecho preenchido (texto vazio conta como ausente)
    pub fn resolvida(&self) -> bool {
        self.desfecho
            .as_deref()
            .map_or(false, |d| !d.trim().is_empty())
    }

    pub fn ativa(&self) -> bool {
        !self.resolvida() && !self.fora_area
    }

    /// Quando os dois marcadores estão presentes, o desfecho prevalece
    pub fn status(&self) -> StatusFicha {
        if self.resolvida() {
            StatusFicha::Resolvida
        } else if self.fora_area {
            StatusFicha::ForaDeArea
        } else {
            StatusFicha::Ativa
        }
    }
}
