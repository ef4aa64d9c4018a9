//! Modelos de dados das fichas e dos usuários
//!
//! Este módulo define as estruturas de dados principais: a ficha de
//! estratificação gravada em `calculos`, a classificação de risco canônica e o
//! usuário autenticado com seu papel.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::ciclo::CicloVida;
use crate::identidade::ChaveGestante;
use crate::multiselecao::MultiSelecao;
use crate::rotulos::CampoMultiplo;

/// Classificação de risco gestacional
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassificacaoRisco {
    #[serde(rename = "Risco Habitual")]
    Habitual,
    #[serde(rename = "Risco Intermediário")]
    Intermediario,
    #[serde(rename = "Risco Alto")]
    Alto,
}

impl ClassificacaoRisco {
    pub const TODAS: [ClassificacaoRisco; 3] = [
        ClassificacaoRisco::Habitual,
        ClassificacaoRisco::Intermediario,
        ClassificacaoRisco::Alto,
    ];

    pub fn rotulo(self) -> &'static str {
        match self {
            ClassificacaoRisco::Habitual => "Risco Habitual",
            ClassificacaoRisco::Intermediario => "Risco Intermediário",
            ClassificacaoRisco::Alto => "Risco Alto",
        }
    }

    /// Chave usada nos contadores do painel
    pub fn chave(self) -> &'static str {
        match self {
            ClassificacaoRisco::Habitual => "risco_habitual",
            ClassificacaoRisco::Intermediario => "risco_intermediario",
            ClassificacaoRisco::Alto => "risco_alto",
        }
    }

    /// Normaliza as grafias históricas para a classificação canônica
    pub fn canonicalizar(valor: &str) -> Option<Self> {
        let normalizado = valor
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        match normalizado.as_str() {
            "risco habitual" | "habitual" => Some(ClassificacaoRisco::Habitual),
            "médio risco" | "medio risco" | "risco intermediário" | "risco intermediario"
            | "intermediário" | "intermediario" => Some(ClassificacaoRisco::Intermediario),
            "alto risco" | "risco alto" | "alto" => Some(ClassificacaoRisco::Alto),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClassificacaoRisco {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rotulo())
    }
}

/// Ficha de estratificação de risco, como gravada na tabela `calculos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ficha {
    pub id: i64,
    /// Código curto de 8 caracteres, nunca reutilizado
    pub codigo_ficha: String,
    /// Profissional que enviou a ficha
    pub user_id: i64,
    pub profissional: Option<String>,
    pub nome_gestante: String,
    /// `DD/MM/YYYY`, parte da chave de identidade
    pub data_nasc: String,
    /// Pode ser o valor sentinela `000.000.000-00`
    pub cpf: String,
    pub telefone: String,
    pub municipio: String,
    pub ubs: String,
    pub acs: String,
    pub periodo_gestacional: String,
    pub data_envio: NaiveDate,
    pub pontuacao_total: i64,
    /// Texto gravado; registros antigos têm grafias não canônicas
    pub classificacao_risco: String,
    pub imc: Option<String>,
    pub caracteristicas: MultiSelecao,
    pub avaliacao_nutricional: MultiSelecao,
    pub comorbidades: MultiSelecao,
    pub historia_obstetrica: MultiSelecao,
    pub condicoes_gestacionais: MultiSelecao,
    pub deficiencia: String,
    pub genero: String,
    pub sexualidade: String,
    pub raca_cor_etnia: String,
    pub etnia_indigena: String,
    #[serde(flatten)]
    pub ciclo: CicloVida,
}

impl Ficha {
    pub fn classificacao(&self) -> Option<ClassificacaoRisco> {
        ClassificacaoRisco::canonicalizar(&self.classificacao_risco)
    }

    pub fn ativa(&self) -> bool {
        self.ciclo.ativa()
    }

    pub fn chave(&self) -> ChaveGestante {
        ChaveGestante::da_ficha(self)
    }

    pub fn multiplo(&self, campo: CampoMultiplo) -> &MultiSelecao {
        match campo {
            CampoMultiplo::Caracteristicas => &self.caracteristicas,
            CampoMultiplo::AvaliacaoNutricional => &self.avaliacao_nutricional,
            CampoMultiplo::Comorbidades => &self.comorbidades,
            CampoMultiplo::HistoriaObstetrica => &self.historia_obstetrica,
            CampoMultiplo::CondicoesGestacionais => &self.condicoes_gestacionais,
        }
    }

    /// Raça/cor/etnia indígena, em qualquer das grafias aceitas
    pub fn indigena(&self) -> bool {
        matches!(
            self.raca_cor_etnia.trim().to_lowercase().as_str(),
            "indigena" | "indígena"
        )
    }
}

fn erro_decodificacao(coluna: &str, mensagem: String) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: coluna.to_string(),
        source: Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            mensagem,
        )),
    }
}

/// `data_envio` é sempre `YYYY-MM-DD`; formatos antigos são reescritos ao migrar
/// (ver `migrations::normalizar_registros_legados`), pois filtros e ordenação
/// comparam o texto da coluna.
pub(crate) fn parse_data_armazenada(valor: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(valor.trim(), "%Y-%m-%d").ok()
}

fn texto(row: &SqliteRow, coluna: &str) -> sqlx::Result<String> {
    Ok(row.try_get::<Option<String>, _>(coluna)?.unwrap_or_default())
}

fn opcional(row: &SqliteRow, coluna: &str) -> sqlx::Result<Option<String>> {
    Ok(row
        .try_get::<Option<String>, _>(coluna)?
        .filter(|v| !v.trim().is_empty()))
}

fn multipla(row: &SqliteRow, coluna: &str) -> sqlx::Result<MultiSelecao> {
    Ok(MultiSelecao::parse(&texto(row, coluna)?))
}

fn flag(row: &SqliteRow, coluna: &str) -> sqlx::Result<bool> {
    Ok(row.try_get::<Option<i64>, _>(coluna)?.unwrap_or(0) != 0)
}

impl FromRow<'_, SqliteRow> for Ficha {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let data_envio_bruta = texto(row, "data_envio")?;
        let data_envio = parse_data_armazenada(&data_envio_bruta).ok_or_else(|| {
            erro_decodificacao(
                "data_envio",
                format!("Data de envio inválida: {}", data_envio_bruta),
            )
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            codigo_ficha: row.try_get("codigo_ficha")?,
            user_id: row.try_get("user_id")?,
            profissional: opcional(row, "profissional")?,
            nome_gestante: row.try_get("nome_gestante")?,
            data_nasc: row.try_get("data_nasc")?,
            cpf: texto(row, "cpf")?,
            telefone: texto(row, "telefone")?,
            municipio: row.try_get("municipio")?,
            ubs: texto(row, "ubs")?,
            acs: texto(row, "acs")?,
            periodo_gestacional: texto(row, "periodo_gestacional")?,
            data_envio,
            pontuacao_total: row.try_get::<Option<i64>, _>("pontuacao_total")?.unwrap_or(0),
            classificacao_risco: texto(row, "classificacao_risco")?,
            imc: opcional(row, "imc")?,
            caracteristicas: multipla(row, "caracteristicas")?,
            avaliacao_nutricional: multipla(row, "avaliacao_nutricional")?,
            comorbidades: multipla(row, "comorbidades")?,
            historia_obstetrica: multipla(row, "historia_obstetrica")?,
            condicoes_gestacionais: multipla(row, "condicoes_gestacionais")?,
            deficiencia: texto(row, "deficiencia")?,
            genero: texto(row, "genero")?,
            sexualidade: texto(row, "sexualidade")?,
            raca_cor_etnia: texto(row, "raca_cor_etnia")?,
            etnia_indigena: texto(row, "etnia_indigena")?,
            ciclo: CicloVida {
                desfecho: opcional(row, "desfecho")?,
                data_desfecho: opcional(row, "data_desfecho")?,
                fora_area: flag(row, "fa")?,
                pnar_sinalizado: flag(row, "pnar_sinalizado")?,
                pnar_ambulatorio: opcional(row, "pnar_ambulatorio")?,
                pnar_data_registro: opcional(row, "pnar_data_registro")?,
                pdf_compartilhado_municipal: flag(row, "pdf_compartilhado_municipal")?,
            },
        })
    }
}

/// Ficha validada, pronta para ser gravada
#[derive(Debug, Clone, PartialEq)]
pub struct NovaFicha {
    pub nome_gestante: String,
    pub data_nasc: String,
    /// CPF formatado (`000.000.000-00` quando desconhecido)
    pub cpf: String,
    pub telefone: String,
    pub municipio: String,
    pub ubs: String,
    pub acs: String,
    pub periodo_gestacional: String,
    pub data_envio: NaiveDate,
    pub pontuacao_total: i64,
    pub classificacao_risco: ClassificacaoRisco,
    pub imc: Option<String>,
    pub caracteristicas: MultiSelecao,
    pub avaliacao_nutricional: MultiSelecao,
    pub comorbidades: MultiSelecao,
    pub historia_obstetrica: MultiSelecao,
    pub condicoes_gestacionais: MultiSelecao,
    pub deficiencia: String,
    pub genero: String,
    pub sexualidade: String,
    pub raca_cor_etnia: String,
    pub etnia_indigena: String,
}

/// Papel do usuário no sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Papel {
    /// Profissional de saúde; vê apenas as próprias fichas
    Comum,
    /// Administrador municipal
    Municipal,
    /// Administrador estadual
    Estadual,
    /// Usuário de apoio (PNAR, saúde indígena)
    Apoio,
}

impl std::str::FromStr for Papel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "comum" => Ok(Papel::Comum),
            "municipal" => Ok(Papel::Municipal),
            "estadual" => Ok(Papel::Estadual),
            "apoio" => Ok(Papel::Apoio),
            outro => Err(format!("Papel inválido: {}", outro)),
        }
    }
}

impl std::fmt::Display for Papel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Papel::Comum => write!(f, "comum"),
            Papel::Municipal => write!(f, "municipal"),
            Papel::Estadual => write!(f, "estadual"),
            Papel::Apoio => write!(f, "apoio"),
        }
    }
}

/// Tabela de origem da conta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoUsuario {
    /// Tabela `usuarios`
    Usuario,
    /// Tabela `usuarios_apoio`
    Apoio,
}

/// Usuário autenticado e seus atributos de acesso
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub tipo: TipoUsuario,
    pub nome: String,
    pub papel: Papel,
    pub is_admin: bool,
    pub is_super_admin: bool,
    /// Município de lotação (opcional para apoio)
    pub municipio: Option<String>,
    /// Municípios adicionais de `usuario_municipios`
    pub municipios_associados: Vec<String>,
    pub acesso_saude_indigena: bool,
    pub pnar: bool,
    /// Ambulatório PNAR do usuário de apoio
    pub servico_pnar: Option<String>,
    pub ativo: bool,
}

impl Usuario {
    pub fn super_admin_estadual(&self) -> bool {
        self.papel == Papel::Estadual && self.is_super_admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalizar_grafias_historicas() {
        use ClassificacaoRisco::*;
        assert_eq!(ClassificacaoRisco::canonicalizar("Risco Habitual"), Some(Habitual));
        assert_eq!(ClassificacaoRisco::canonicalizar("  médio   RISCO "), Some(Intermediario));
        assert_eq!(ClassificacaoRisco::canonicalizar("Risco Intermediário"), Some(Intermediario));
        assert_eq!(ClassificacaoRisco::canonicalizar("risco intermediario"), Some(Intermediario));
        assert_eq!(ClassificacaoRisco::canonicalizar("Alto Risco"), Some(Alto));
        assert_eq!(ClassificacaoRisco::canonicalizar("Risco Alto"), Some(Alto));
        assert_eq!(ClassificacaoRisco::canonicalizar("baixo"), None);
        assert_eq!(ClassificacaoRisco::canonicalizar(""), None);
    }

    #[test]
    fn test_classificacao_serializa_como_rotulo() {
        let json = serde_json::to_string(&ClassificacaoRisco::Intermediario).unwrap();
        assert_eq!(json, "\"Risco Intermediário\"");
    }

    #[test]
    fn test_papel() {
        assert_eq!("municipal".parse::<Papel>(), Ok(Papel::Municipal));
        assert!("root".parse::<Papel>().is_err());
        assert_eq!(Papel::Apoio.to_string(), "apoio");
    }

    #[test]
    fn test_data_armazenada() {
        let esperada = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(parse_data_armazenada("2025-03-07"), Some(esperada));
        // Formatos que o SQL não compara corretamente são recusados na leitura
        assert_eq!(parse_data_armazenada("2025-03-07 10:00:00"), None);
        assert_eq!(parse_data_armazenada("07/03/2025"), None);
        assert_eq!(parse_data_armazenada("ontem"), None);
    }
}
