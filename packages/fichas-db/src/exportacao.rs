//! Rótulos de uma ficha para o documento impresso
//!
//! O layout do PDF fica fora desta biblioteca; aqui só se monta o conteúdo já
//! traduzido para exibição.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::ciclo::StatusFicha;
use crate::error::FichaResult;
use crate::escopo::EscopoVisibilidade;
use crate::models::Ficha;
use crate::repositorio::buscar_por_codigo;
use crate::rotulos::{bucket_deficiencia, CampoMultiplo, Rotulos, NAO_INFORMADO};

/// Sub-opções de características exibidas juntas em uma única linha
const SUBMENU: &[(&str, &str)] = &[
    ("Situação de Rua", "Situação de rua"),
    ("Indígena", "Indígena"),
    ("Quilombola", "Quilombola"),
];

/// Conteúdo exibível de uma ficha
#[derive(Debug, Clone, Serialize)]
pub struct DocumentoFicha {
    pub ficha: Ficha,
    pub status: StatusFicha,
    /// "UBS/UBSI" para gestantes indígenas
    pub rotulo_ubs: &'static str,
    /// "ACS/AIS" para gestantes indígenas
    pub rotulo_acs: &'static str,
    pub classificacao_risco: String,
    pub caracteristicas: Vec<String>,
    pub avaliacao_nutricional: Vec<String>,
    pub comorbidades: Vec<String>,
    pub historia_obstetrica: Vec<String>,
    pub condicoes_gestacionais: Vec<String>,
    pub genero: String,
    pub sexualidade: String,
    pub raca_cor_etnia: String,
    pub etnia_indigena: String,
    pub deficiencia: String,
    pub desfecho: Option<String>,
}

fn submenu(rotulo: &str) -> Option<&'static str> {
    SUBMENU
        .iter()
        .find(|(chave, _)| *chave == rotulo)
        .map(|(_, exibicao)| *exibicao)
}

/// Rótulos de um campo de múltipla escolha, com as sub-opções agrupadas no fim
pub fn itens_exibicao(rotulos: &Rotulos, ficha: &Ficha, campo: CampoMultiplo) -> Vec<String> {
    let mut itens = Vec::new();
    let mut agrupados = Vec::new();

    for codigo in ficha.multiplo(campo).itens() {
        let rotulo = rotulos.item(campo, codigo);
        match submenu(codigo).or_else(|| submenu(&rotulo)) {
            Some(exibicao) => agrupados.push(exibicao),
            None if !rotulo.is_empty() => itens.push(rotulo),
            None => {}
        }
    }

    if !agrupados.is_empty() {
        itens.push(agrupados.join(", "));
    }
    itens
}

/// Monta o documento a partir de uma ficha já autorizada
pub fn montar_documento(rotulos: &Rotulos, ficha: Ficha) -> DocumentoFicha {
    let indigena = ficha.indigena();
    let campo = |c| itens_exibicao(rotulos, &ficha, c);
    let simples = |valor: &str, mapear: &dyn Fn(&str) -> String| {
        let valor = valor.trim();
        if valor.is_empty() {
            NAO_INFORMADO.to_string()
        } else {
            mapear(valor)
        }
    };

    let caracteristicas = campo(CampoMultiplo::Caracteristicas);
    let avaliacao_nutricional = campo(CampoMultiplo::AvaliacaoNutricional);
    let comorbidades = campo(CampoMultiplo::Comorbidades);
    let historia_obstetrica = campo(CampoMultiplo::HistoriaObstetrica);
    let condicoes_gestacionais = campo(CampoMultiplo::CondicoesGestacionais);

    DocumentoFicha {
        status: ficha.ciclo.status(),
        rotulo_ubs: if indigena { "UBS/UBSI" } else { "UBS" },
        rotulo_acs: if indigena { "ACS/AIS" } else { "ACS" },
        classificacao_risco: ficha
            .classificacao()
            .map_or(NAO_INFORMADO, |c| c.rotulo())
            .to_string(),
        caracteristicas,
        avaliacao_nutricional,
        comorbidades,
        historia_obstetrica,
        condicoes_gestacionais,
        genero: simples(&ficha.genero, &|v| rotulos.genero(v)),
        sexualidade: simples(&ficha.sexualidade, &|v| rotulos.sexualidade(v)),
        raca_cor_etnia: rotulos.raca(&ficha.raca_cor_etnia),
        etnia_indigena: rotulos.etnia(&ficha.etnia_indigena),
        deficiencia: rotulos.deficiencia(bucket_deficiencia(&ficha.deficiencia)),
        desfecho: ficha
            .ciclo
            .desfecho
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| rotulos.desfecho(d)),
        ficha,
    }
}

/// Documento de uma ficha visível ao usuário
pub async fn documento_ficha(
    pool: &SqlitePool,
    rotulos: &Rotulos,
    escopo: &EscopoVisibilidade,
    codigo: &str,
) -> FichaResult<DocumentoFicha> {
    let ficha = buscar_por_codigo(pool, escopo, codigo).await?;
    debug!("Montando documento da ficha {}", ficha.codigo_ficha);
    Ok(montar_documento(rotulos, ficha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escopo::resolver_escopo;
    use crate::fixtures::{banco_temporario, inserir_ficha_teste, inserir_usuario, FichaBuilder};
    use crate::models::Papel;
    use crate::FichaError;

    #[test]
    fn test_submenu_em_uma_linha() {
        let rotulos = Rotulos::padrao();
        let ficha = FichaBuilder::new(1)
            .multiplo(
                CampoMultiplo::Caracteristicas,
                &["situacao_rua", "quilombola", "codigo_livre"],
            )
            .build();
        let itens = itens_exibicao(&rotulos, &ficha, CampoMultiplo::Caracteristicas);
        assert_eq!(itens, ["codigo_livre", "Situação de rua, Quilombola"]);
    }

    #[test]
    fn test_rotulos_ubs_acs_para_indigena() {
        let rotulos = Rotulos::padrao();
        let doc = montar_documento(&rotulos, FichaBuilder::new(1).raca("indigena").build());
        assert_eq!((doc.rotulo_ubs, doc.rotulo_acs), ("UBS/UBSI", "ACS/AIS"));
        assert_eq!(doc.raca_cor_etnia, "Indígena");
        assert_eq!(doc.etnia_indigena, NAO_INFORMADO);

        let doc = montar_documento(
            &rotulos,
            FichaBuilder::new(2).classificacao("médio risco").deficiencia("s").desfecho("W90").build(),
        );
        assert_eq!((doc.rotulo_ubs, doc.rotulo_acs), ("UBS", "ACS"));
        assert_eq!(doc.classificacao_risco, "Risco Intermediário");
        assert_eq!(doc.deficiencia, "Sim");
        assert_eq!(doc.desfecho, Some(rotulos.desfecho("W90")));
        assert_eq!(doc.status, StatusFicha::Resolvida);
    }

    #[tokio::test]
    async fn test_documento_respeita_visibilidade() -> anyhow::Result<()> {
        let (_dir, pool) = banco_temporario().await?;
        let ana = inserir_usuario(&pool, "Ana", Papel::Comum, "Patos").await?;
        let bia = inserir_usuario(&pool, "Bia", Papel::Comum, "Patos").await?;
        let f = inserir_ficha_teste(&pool, FichaBuilder::new(0).user_id(ana.id)).await?;
        let rotulos = Rotulos::padrao();

        let doc = documento_ficha(&pool, &rotulos, &resolver_escopo(&ana), &f.codigo_ficha).await?;
        assert_eq!(doc.ficha.codigo_ficha, f.codigo_ficha);

        assert!(matches!(
            documento_ficha(&pool, &rotulos, &resolver_escopo(&bia), &f.codigo_ficha).await,
            Err(FichaError::NaoEncontrado(_))
        ));
        Ok(())
    }
}
