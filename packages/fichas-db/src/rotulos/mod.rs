//! Tabelas de rótulos para exibição
//!
//! Os códigos gravados nas fichas são convertidos em rótulos legíveis apenas na
//! leitura (relatórios, exportação). As tabelas são dados estáticos carregados
//! uma única vez em [`Rotulos::padrao`] e injetados em quem precisa delas; os
//! testes podem montar versões reduzidas com [`Rotulos::definir`].

use std::collections::HashMap;

mod etnias;
pub mod regioes;
mod tabelas;

pub use regioes::Regioes;

/// Rótulo usado quando o campo não foi preenchido
pub const NAO_INFORMADO: &str = "Não informado";

/// Tabelas de código → rótulo de campos de escolha única
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tabela {
    Genero,
    Sexualidade,
    RacaCorEtnia,
    EtniaIndigena,
    Deficiencia,
    Desfecho,
}

/// Campos de múltipla escolha da ficha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampoMultiplo {
    Caracteristicas,
    AvaliacaoNutricional,
    Comorbidades,
    HistoriaObstetrica,
    CondicoesGestacionais,
}

impl CampoMultiplo {
    pub const TODOS: [CampoMultiplo; 5] = [
        CampoMultiplo::Caracteristicas,
        CampoMultiplo::AvaliacaoNutricional,
        CampoMultiplo::Comorbidades,
        CampoMultiplo::HistoriaObstetrica,
        CampoMultiplo::CondicoesGestacionais,
    ];

    /// Nome da coluna (e da chave JSON) correspondente
    pub fn coluna(self) -> &'static str {
        match self {
            CampoMultiplo::Caracteristicas => "caracteristicas",
            CampoMultiplo::AvaliacaoNutricional => "avaliacao_nutricional",
            CampoMultiplo::Comorbidades => "comorbidades",
            CampoMultiplo::HistoriaObstetrica => "historia_obstetrica",
            CampoMultiplo::CondicoesGestacionais => "condicoes_gestacionais",
        }
    }
}

/// Conjunto imutável de tabelas de rótulos
#[derive(Debug, Clone, Default)]
pub struct Rotulos {
    simples: HashMap<Tabela, HashMap<String, String>>,
    multiplos: HashMap<CampoMultiplo, HashMap<String, String>>,
}

fn carregar(pares: &[(&str, &str)]) -> HashMap<String, String> {
    pares
        .iter()
        .map(|(codigo, rotulo)| (codigo.to_string(), rotulo.to_string()))
        .collect()
}

impl Rotulos {
    /// Tabelas completas usadas em produção
    pub fn padrao() -> Self {
        let mut rotulos = Self::default();
        rotulos.simples.insert(Tabela::Genero, carregar(tabelas::GENERO));
        rotulos.simples.insert(Tabela::Sexualidade, carregar(tabelas::SEXUALIDADE));
        rotulos.simples.insert(Tabela::RacaCorEtnia, carregar(tabelas::RACA_COR_ETNIA));
        rotulos.simples.insert(Tabela::EtniaIndigena, carregar(etnias::ETNIAS));
        rotulos.simples.insert(Tabela::Deficiencia, carregar(tabelas::DEFICIENCIA));
        rotulos.simples.insert(Tabela::Desfecho, carregar(tabelas::DESFECHO));

        rotulos.multiplos.insert(CampoMultiplo::Caracteristicas, carregar(tabelas::CARACTERISTICAS));
        rotulos.multiplos.insert(
            CampoMultiplo::AvaliacaoNutricional,
            carregar(tabelas::AVALIACAO_NUTRICIONAL),
        );
        rotulos.multiplos.insert(CampoMultiplo::Comorbidades, carregar(tabelas::COMORBIDADES));
        rotulos.multiplos.insert(
            CampoMultiplo::HistoriaObstetrica,
            carregar(tabelas::HISTORIA_OBSTETRICA),
        );
        rotulos.multiplos.insert(
            CampoMultiplo::CondicoesGestacionais,
            carregar(tabelas::CONDICOES_GESTACIONAIS),
        );
        rotulos
    }

    /// Substitui uma tabela de escolha única (útil para fixtures de teste)
    pub fn definir(mut self, tabela: Tabela, pares: &[(&str, &str)]) -> Self {
        self.simples.insert(tabela, carregar(pares));
        self
    }

    /// Substitui a tabela de um campo de múltipla escolha
    pub fn definir_multiplo(mut self, campo: CampoMultiplo, pares: &[(&str, &str)]) -> Self {
        self.multiplos.insert(campo, carregar(pares));
        self
    }

    fn buscar(&self, tabela: Tabela, codigo: &str) -> Option<&str> {
        self.simples
            .get(&tabela)
            .and_then(|t| t.get(codigo))
            .map(String::as_str)
    }

    pub fn genero(&self, codigo: &str) -> String {
        self.buscar(Tabela::Genero, codigo.trim())
            .unwrap_or(codigo.trim())
            .to_string()
    }

    pub fn sexualidade(&self, codigo: &str) -> String {
        self.buscar(Tabela::Sexualidade, codigo.trim())
            .unwrap_or(codigo.trim())
            .to_string()
    }

    /// Raça/cor/etnia; valores desconhecidos caem em "Não informado"
    pub fn raca(&self, codigo: &str) -> String {
        let chave = codigo.trim().to_lowercase();
        self.buscar(Tabela::RacaCorEtnia, &chave)
            .unwrap_or(NAO_INFORMADO)
            .to_string()
    }

    /// Nome da etnia indígena; códigos fora da tabela são exibidos como vieram
    pub fn etnia(&self, codigo: &str) -> String {
        let codigo = codigo.trim();
        if codigo.is_empty() {
            return NAO_INFORMADO.to_string();
        }
        self.buscar(Tabela::EtniaIndigena, codigo)
            .unwrap_or(codigo)
            .to_string()
    }

    pub fn deficiencia(&self, valor: &str) -> String {
        self.buscar(Tabela::Deficiencia, valor.trim())
            .unwrap_or(NAO_INFORMADO)
            .to_string()
    }

    pub fn desfecho(&self, codigo: &str) -> String {
        self.buscar(Tabela::Desfecho, codigo.trim())
            .unwrap_or(codigo.trim())
            .to_string()
    }

    /// Indica se o código pertence ao vocabulário de desfechos
    pub fn desfecho_valido(&self, codigo: &str) -> bool {
        let codigo = codigo.trim();
        !codigo.is_empty() && self.buscar(Tabela::Desfecho, codigo).is_some()
    }

    /// Rótulo de um item de múltipla escolha; códigos desconhecidos passam direto
    pub fn item(&self, campo: CampoMultiplo, codigo: &str) -> String {
        let codigo = codigo.trim();
        self.multiplos
            .get(&campo)
            .and_then(|t| t.get(codigo))
            .map(String::as_str)
            .unwrap_or(codigo)
            .to_string()
    }
}

/// Agrupa o texto livre de deficiência em Sim / Não / Não informado
///
/// Usado na gravação e também na leitura de registros antigos.
pub fn bucket_deficiencia(valor: &str) -> &'static str {
    match valor.trim().to_lowercase().as_str() {
        "sim" | "s" | "1" | "yes" | "true" => "Sim",
        "não" | "nao" | "n" | "0" | "no" | "false" | "" => "Não",
        _ => NAO_INFORMADO,
    }
}
