//! Validação do envio de fichas
//!
//! Nenhuma escrita acontece antes de [`validar`] aceitar o envio. Os erros
//! carregam a mensagem exibida ao profissional.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{FichaError, FichaResult};
use crate::identidade::CPF_DESCONHECIDO;
use crate::models::{ClassificacaoRisco, NovaFicha};
use crate::multiselecao::MultiSelecao;
use crate::rotulos::{bucket_deficiencia, NAO_INFORMADO};

/// Campos brutos recebidos do formulário de estratificação
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissaoFicha {
    pub nome_gestante: Option<String>,
    pub data_nasc: Option<String>,
    pub cpf: Option<String>,
    pub telefone: Option<String>,
    pub municipio: Option<String>,
    pub ubs: Option<String>,
    pub acs: Option<String>,
    pub periodo_gestacional: Option<String>,
    pub data_envio: Option<String>,
    #[serde(deserialize_with = "texto_ou_numero")]
    pub pontuacao_total: Option<String>,
    pub classificacao_risco: Option<String>,
    #[serde(deserialize_with = "texto_ou_numero")]
    pub imc: Option<String>,
    pub caracteristicas: Option<Value>,
    pub avaliacao_nutricional: Option<Value>,
    pub comorbidades: Option<Value>,
    pub historia_obstetrica: Option<Value>,
    pub condicoes_gestacionais: Option<Value>,
    pub deficiencia: Option<String>,
    pub genero: Option<String>,
    pub sexualidade: Option<String>,
    pub raca_cor_etnia: Option<String>,
    pub etnia_indigena: Option<String>,
}

/// Aceita `"12"`, `12` ou `12.5` e guarda como texto
fn texto_ou_numero<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(outro) => Some(outro.to_string()),
    })
}

fn preenchido(valor: &Option<String>) -> Option<&str> {
    valor.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn obrigatorio<'a>(campo: &str, rotulo: &str, valor: &'a Option<String>) -> FichaResult<&'a str> {
    preenchido(valor).ok_or_else(|| {
        FichaError::validacao(campo, format!("O campo \"{}\" é obrigatório.", rotulo))
    })
}

/// Converte `DD/MM/YYYY` em data, exigindo o formato exato
pub fn parse_data_br(valor: &str) -> Option<NaiveDate> {
    let bytes = valor.as_bytes();
    let formato_ok = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !formato_ok {
        return None;
    }
    NaiveDate::parse_from_str(valor, "%d/%m/%Y").ok()
}

/// Datas de filtro de relatório: ISO (`YYYY-MM-DD`) ou `DD/MM/YYYY`
pub fn parse_data_filtro(campo: &str, valor: &str) -> FichaResult<NaiveDate> {
    let valor = valor.trim();
    NaiveDate::parse_from_str(valor, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_data_br(valor))
        .ok_or_else(|| {
            FichaError::validacao(
                campo,
                format!("Data inválida: {}. Use o formato YYYY-MM-DD ou DD/MM/YYYY.", valor),
            )
        })
}

/// Valida o CPF e devolve a forma gravada (`XXX.XXX.XXX-XX`)
pub fn validar_cpf(cpf: Option<&str>) -> FichaResult<String> {
    let cpf = cpf.map(str::trim).unwrap_or_default();
    if cpf.is_empty() || cpf == CPF_DESCONHECIDO {
        return Ok(CPF_DESCONHECIDO.to_string());
    }
    let digitos: String = cpf.chars().filter(char::is_ascii_digit).collect();
    if digitos.len() != 11 {
        return Err(FichaError::validacao(
            "cpf",
            "CPF inválido. Deve conter exatamente 11 dígitos.",
        ));
    }
    Ok(format!(
        "{}.{}.{}-{}",
        &digitos[0..3],
        &digitos[3..6],
        &digitos[6..9],
        &digitos[9..11]
    ))
}

fn multipla(valor: &Option<Value>) -> MultiSelecao {
    match valor {
        None => MultiSelecao::default(),
        // Formulários enviam a lista serializada como texto
        Some(Value::String(s)) => MultiSelecao::parse(s),
        Some(outro) => MultiSelecao::from_value(outro),
    }
}

/// Valida um envio e produz a ficha a ser gravada.
///
/// `hoje` é usado quando `data_envio` não é informada.
pub fn validar(sub: &SubmissaoFicha, hoje: NaiveDate) -> FichaResult<NovaFicha> {
    let nome_gestante = obrigatorio("nome_gestante", "Nome da Gestante", &sub.nome_gestante)?;
    let data_nasc = obrigatorio("data_nasc", "Data de Nascimento", &sub.data_nasc)?;
    let telefone = obrigatorio("telefone", "Telefone", &sub.telefone)?;
    let municipio = obrigatorio("municipio", "Município", &sub.municipio)?;
    let ubs = obrigatorio("ubs", "UBS", &sub.ubs)?;
    let acs = obrigatorio("acs", "ACS", &sub.acs)?;
    let periodo = obrigatorio(
        "periodo_gestacional",
        "Período Gestacional",
        &sub.periodo_gestacional,
    )?;
    let classificacao = obrigatorio(
        "classificacao_risco",
        "Classificação de Risco",
        &sub.classificacao_risco,
    )?;
    let genero = obrigatorio("genero", "Gênero", &sub.genero)?;
    let raca = obrigatorio("raca_cor_etnia", "Raça/Cor/Etnia", &sub.raca_cor_etnia)?;

    let cpf = validar_cpf(sub.cpf.as_deref())?;

    let pontuacao_total = match preenchido(&sub.pontuacao_total) {
        None => 0,
        Some(p) => p
            .parse::<i64>()
            .map_err(|_| FichaError::validacao("pontuacao_total", "Pontuação total inválida."))?,
    };

    if parse_data_br(data_nasc).is_none() {
        return Err(FichaError::validacao(
            "data_nasc",
            "Data de nascimento inválida. Use o formato DD/MM/YYYY.",
        ));
    }

    let data_envio = match preenchido(&sub.data_envio) {
        None => hoje,
        Some(d) => parse_data_br(d).ok_or_else(|| {
            FichaError::validacao(
                "data_envio",
                "Data de envio inválida. Use o formato DD/MM/YYYY.",
            )
        })?,
    };

    let classificacao_risco = ClassificacaoRisco::canonicalizar(classificacao).ok_or_else(|| {
        FichaError::validacao(
            "classificacao_risco",
            format!("Classificação de risco inválida: {}", classificacao),
        )
    })?;

    let imc = match preenchido(&sub.imc) {
        None => None,
        Some(v) => {
            let numero = v
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| FichaError::validacao("imc", "IMC inválido."))?;
            Some(format!("{:.2}", numero))
        }
    };

    let deficiencia = match preenchido(&sub.deficiencia) {
        None => NAO_INFORMADO.to_string(),
        Some(d) if d == NAO_INFORMADO || d == "nao_informado" => NAO_INFORMADO.to_string(),
        Some(d) => bucket_deficiencia(d).to_string(),
    };

    let nova = NovaFicha {
        nome_gestante: nome_gestante.to_string(),
        data_nasc: data_nasc.to_string(),
        cpf,
        telefone: telefone.to_string(),
        municipio: municipio.to_string(),
        ubs: ubs.to_string(),
        acs: acs.to_string(),
        periodo_gestacional: periodo.to_string(),
        data_envio,
        pontuacao_total,
        classificacao_risco,
        imc,
        caracteristicas: multipla(&sub.caracteristicas),
        avaliacao_nutricional: multipla(&sub.avaliacao_nutricional),
        comorbidades: multipla(&sub.comorbidades),
        historia_obstetrica: multipla(&sub.historia_obstetrica),
        condicoes_gestacionais: multipla(&sub.condicoes_gestacionais),
        deficiencia,
        genero: genero.to_string(),
        sexualidade: preenchido(&sub.sexualidade)
            .unwrap_or("nao_informado")
            .to_string(),
        raca_cor_etnia: raca.to_string(),
        etnia_indigena: preenchido(&sub.etnia_indigena).unwrap_or_default().to_string(),
    };

    debug!(
        "Ficha validada: municipio={}, classificacao={}, comorbidades={}",
        nova.municipio,
        nova.classificacao_risco,
        nova.comorbidades.len()
    );
    Ok(nova)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hoje() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn envio_completo() -> SubmissaoFicha {
        serde_json::from_value(json!({
            "nome_gestante": "Maria da Silva",
            "data_nasc": "01/02/1990",
            "cpf": "123.456.789-00",
            "telefone": "(83) 99999-0000",
            "municipio": "João Pessoa",
            "ubs": "UBS Centro",
            "acs": "Joana",
            "periodo_gestacional": "1º trimestre",
            "pontuacao_total": 12,
            "classificacao_risco": "médio risco",
            "caracteristicas": "[\"15anos\", \"tabagista_ativo\"]",
            "comorbidades": ["cardiopatia"],
            "genero": "mulher_cisgenero",
            "raca_cor_etnia": "parda",
            "deficiencia": "s"
        }))
        .unwrap()
    }

    fn mensagem(erro: FichaError) -> String {
        erro.to_string()
    }

    #[test]
    fn test_envio_valido() {
        let nova = validar(&envio_completo(), hoje()).unwrap();
        assert_eq!(nova.cpf, "123.456.789-00");
        assert_eq!(nova.pontuacao_total, 12);
        assert_eq!(nova.classificacao_risco, ClassificacaoRisco::Intermediario);
        assert_eq!(nova.data_envio, hoje());
        assert_eq!(nova.caracteristicas.itens(), ["15anos", "tabagista_ativo"]);
        assert_eq!(nova.comorbidades.itens(), ["cardiopatia"]);
        assert!(nova.historia_obstetrica.is_empty());
        assert_eq!(nova.deficiencia, "Sim");
        assert_eq!(nova.sexualidade, "nao_informado");
    }

    #[test]
    fn test_campos_obrigatorios_em_ordem() {
        let mut sub = envio_completo();
        sub.telefone = Some("  ".into());
        sub.genero = None;
        assert_eq!(
            mensagem(validar(&sub, hoje()).unwrap_err()),
            "O campo \"Telefone\" é obrigatório."
        );

        sub.telefone = Some("1".into());
        assert_eq!(
            mensagem(validar(&sub, hoje()).unwrap_err()),
            "O campo \"Gênero\" é obrigatório."
        );
    }

    #[test]
    fn test_cpf() {
        assert_eq!(validar_cpf(Some("123.456.789-00")).unwrap(), "123.456.789-00");
        assert_eq!(validar_cpf(Some("12345678900")).unwrap(), "123.456.789-00");
        assert_eq!(validar_cpf(None).unwrap(), CPF_DESCONHECIDO);
        assert_eq!(validar_cpf(Some("")).unwrap(), CPF_DESCONHECIDO);

        let erro = validar_cpf(Some("111.111.111-1")).unwrap_err();
        assert!(matches!(erro, FichaError::Validacao { ref campo, .. } if campo == "cpf"));
        assert_eq!(erro.to_string(), "CPF inválido. Deve conter exatamente 11 dígitos.");
    }

    #[test]
    fn test_datas() {
        let mut sub = envio_completo();
        sub.data_nasc = Some("1990-02-01".into());
        assert_eq!(
            mensagem(validar(&sub, hoje()).unwrap_err()),
            "Data de nascimento inválida. Use o formato DD/MM/YYYY."
        );

        let mut sub = envio_completo();
        sub.data_envio = Some("31/02/2025".into());
        assert_eq!(
            mensagem(validar(&sub, hoje()).unwrap_err()),
            "Data de envio inválida. Use o formato DD/MM/YYYY."
        );

        let mut sub = envio_completo();
        sub.data_envio = Some("05/06/2025".into());
        let nova = validar(&sub, hoje()).unwrap();
        assert_eq!(nova.data_envio, NaiveDate::from_ymd_opt(2025, 6, 5).unwrap());
    }

    #[test]
    fn test_pontuacao() {
        let mut sub = envio_completo();
        sub.pontuacao_total = Some("".into());
        assert_eq!(validar(&sub, hoje()).unwrap().pontuacao_total, 0);

        sub.pontuacao_total = Some("doze".into());
        assert_eq!(
            mensagem(validar(&sub, hoje()).unwrap_err()),
            "Pontuação total inválida."
        );
    }

    #[test]
    fn test_classificacao_desconhecida_rejeitada() {
        let mut sub = envio_completo();
        sub.classificacao_risco = Some("gravíssimo".into());
        let erro = validar(&sub, hoje()).unwrap_err();
        assert!(matches!(erro, FichaError::Validacao { ref campo, .. } if campo == "classificacao_risco"));
    }

    #[test]
    fn test_parse_data_filtro() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(parse_data_filtro("data_inicio", "2025-01-31").unwrap(), d);
        assert_eq!(parse_data_filtro("data_inicio", "31/01/2025").unwrap(), d);
        assert!(parse_data_filtro("data_inicio", "31-01-2025").is_err());
    }
}
