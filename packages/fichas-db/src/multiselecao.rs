//! Campos de múltipla escolha das fichas
//!
//! Os formulários enviam as listas de marcação (características, comorbidades,
//! etc.) como lista JSON, como string solta ou simplesmente não enviam. Registros
//! antigos também trazem listas codificadas duas vezes (`["[\"a\",\"b\"]"]`).
//! Toda leitura passa por [`MultiSelecao::parse`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Conjunto de códigos marcados em um campo de múltipla escolha.
///
/// A ordem de inserção é preservada apenas para exibição; códigos repetidos
/// são descartados.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiSelecao(Vec<String>);

impl MultiSelecao {
    /// Interpreta o valor bruto armazenado ou recebido do formulário
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                // Valor não-JSON: um único código solto
                warn!("Multiseleção não é JSON ({}), tratando como item único: {}", e, raw);
                Self::from_itens([raw.to_string()])
            }
        }
    }

    /// Interpreta um valor JSON já decodificado
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::String(s) => {
                let s = s.trim();
                // String que contém outra lista JSON
                if s.starts_with('[') {
                    if let Ok(inner @ Value::Array(_)) = serde_json::from_str::<Value>(s) {
                        return Self::from_value(&inner);
                    }
                }
                Self::from_itens([s.to_string()])
            }
            Value::Array(itens) => {
                if let [Value::String(unico)] = itens.as_slice() {
                    if unico.trim_start().starts_with('[') {
                        if let Ok(inner @ Value::Array(_)) = serde_json::from_str::<Value>(unico) {
                            return Self::from_value(&inner);
                        }
                    }
                }
                Self::from_itens(itens.iter().filter_map(item_como_texto))
            }
            outro => Self::from_itens(item_como_texto(outro)),
        }
    }

    fn from_itens(itens: impl IntoIterator<Item = String>) -> Self {
        let mut codigos: Vec<String> = Vec::new();
        for item in itens {
            let item = item.trim();
            if item.is_empty() || codigos.iter().any(|c| c == item) {
                continue;
            }
            codigos.push(item.to_string());
        }
        Self(codigos)
    }

    /// Serialização canônica para a coluna do banco (lista JSON)
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn itens(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contem(&self, codigo: &str) -> bool {
        self.0.iter().any(|c| c == codigo)
    }
}

fn item_como_texto(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        outro => Some(outro.to_string()),
    }
}

impl<S: Into<String>> FromIterator<S> for MultiSelecao {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_itens(iter.into_iter().map(Into::into))
    }
}
