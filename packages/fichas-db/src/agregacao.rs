//! Agregação das fichas em contagens e porcentagens
//!
//! Dois modos convivem no mesmo relatório:
//!
//! - **cartão ativo**: uma ficha por gestante, a ativa de maior `id`
//!   ([`representantes_ativas`]). Alimenta as distribuições demográficas,
//!   clínicas e de risco.
//! - **consolidado**: todas as fichas do filtro, da mais recente para a mais
//!   antiga; desfechos e fora de área são contados uma vez por gestante, valendo
//!   a primeira ficha vista.
//!
//! Toda porcentagem é `round(count / total * 100, 1)`, e 0 quando o total é 0.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::identidade::{agrupar, representantes_ativas};
use crate::models::{ClassificacaoRisco, Ficha};
use crate::rotulos::{bucket_deficiencia, CampoMultiplo, Rotulos, NAO_INFORMADO};

/// Códigos de etnia que não identificam um povo
const ETNIAS_VAZIAS: &[&str] = &["Não indígena", NAO_INFORMADO, "-"];

/// Quantidade e porcentagem de um rótulo
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contagem {
    pub count: u64,
    pub porcentagem: f64,
}

/// Porcentagem com uma casa decimal
pub fn porcentagem(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Conta os rótulos e calcula as porcentagens sobre `total`
pub fn distribuicao<I, S>(rotulos: I, total: u64) -> BTreeMap<String, Contagem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut contagens: BTreeMap<String, u64> = BTreeMap::new();
    for rotulo in rotulos {
        *contagens.entry(rotulo.into()).or_default() += 1;
    }
    contagens
        .into_iter()
        .map(|(rotulo, count)| {
            (
                rotulo,
                Contagem {
                    count,
                    porcentagem: porcentagem(count, total),
                },
            )
        })
        .collect()
}

/// Distribuição por classificação de risco canônica
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumoRisco {
    pub risco_habitual: u64,
    pub risco_intermediario: u64,
    pub risco_alto: u64,
    /// Grafias que não correspondem a nenhuma classificação
    pub nao_informado: u64,
    pub porcentagem_habitual: f64,
    pub porcentagem_intermediario: f64,
    pub porcentagem_alto: f64,
}

impl ResumoRisco {
    pub fn contar<'a>(fichas: impl IntoIterator<Item = &'a Ficha>) -> Self {
        let mut r = Self::default();
        for ficha in fichas {
            match ficha.classificacao() {
                Some(ClassificacaoRisco::Habitual) => r.risco_habitual += 1,
                Some(ClassificacaoRisco::Intermediario) => r.risco_intermediario += 1,
                Some(ClassificacaoRisco::Alto) => r.risco_alto += 1,
                None => r.nao_informado += 1,
            }
        }
        let total = r.total();
        r.porcentagem_habitual = porcentagem(r.risco_habitual, total);
        r.porcentagem_intermediario = porcentagem(r.risco_intermediario, total);
        r.porcentagem_alto = porcentagem(r.risco_alto, total);
        r
    }

    pub fn total(&self) -> u64 {
        self.risco_habitual + self.risco_intermediario + self.risco_alto + self.nao_informado
    }
}

/// Pacote de estatísticas de um relatório
#[derive(Debug, Clone, Serialize)]
pub struct Estatisticas {
    /// Gestantes com ao menos uma ficha ativa
    pub total_registros: u64,
    /// Fichas no filtro, de qualquer status
    pub total_registros_filtrados: u64,
    pub municipios_unicos: u64,
    pub periodo_gestacional: BTreeMap<String, Contagem>,
    pub genero_counts: BTreeMap<String, Contagem>,
    pub sexualidade_counts: BTreeMap<String, Contagem>,
    pub raca_cor_etnia_counts: BTreeMap<String, Contagem>,
    /// Porcentagens sobre as gestantes com etnia indígena informada
    pub etnia_indigena_counts: BTreeMap<String, Contagem>,
    pub deficiencia_counts: BTreeMap<String, Contagem>,
    pub media_pontuacao: f64,
    pub classificacao_risco: ResumoRisco,
    pub caracteristicas_counts: BTreeMap<String, Contagem>,
    pub avaliacao_nutricional_counts: BTreeMap<String, Contagem>,
    pub comorbidades_counts: BTreeMap<String, Contagem>,
    pub historia_obstetrica_counts: BTreeMap<String, Contagem>,
    pub condicoes_gestacionais_counts: BTreeMap<String, Contagem>,
    pub desfecho_counts: BTreeMap<String, Contagem>,
    pub total_desfechos: u64,
    pub fora_area_count: u64,
    pub total_gestantes_distintas: u64,
}

fn rotulo_ou_nao_informado(valor: &str, mapear: impl Fn(&str) -> String) -> String {
    let valor = valor.trim();
    if valor.is_empty() {
        NAO_INFORMADO.to_string()
    } else {
        mapear(&valor.to_lowercase())
    }
}

/// Rótulos de um campo de múltipla escolha, um por item marcado
fn contar_multiplo(rotulos: &Rotulos, fichas: &[&Ficha], campo: CampoMultiplo) -> BTreeMap<String, Contagem> {
    let contribuintes = fichas.iter().filter(|f| !f.multiplo(campo).is_empty()).count() as u64;
    let itens = fichas.iter().flat_map(|f| {
        f.multiplo(campo)
            .itens()
            .iter()
            .map(move |codigo| rotulos.item(campo, codigo))
    });
    distribuicao(itens.filter(|r| r != "-"), contribuintes)
}

/// Média das pontuações informadas (zero é tratado como ausente)
pub fn media_pontuacao(fichas: &[&Ficha]) -> f64 {
    let validas: Vec<i64> = fichas
        .iter()
        .map(|f| f.pontuacao_total)
        .filter(|p| *p > 0)
        .collect();
    if validas.is_empty() {
        return 0.0;
    }
    let media = validas.iter().sum::<i64>() as f64 / validas.len() as f64;
    (media * 10.0).round() / 10.0
}

/// Calcula as estatísticas de um conjunto filtrado de fichas.
///
/// `fichas` deve vir da mais recente para a mais antiga, como devolvido por
/// [`crate::repositorio::fichas_no_filtro`].
pub fn estatisticas(rotulos: &Rotulos, fichas: &[Ficha]) -> Estatisticas {
    let ativas = representantes_ativas(fichas);
    let total_ativas = ativas.len() as u64;

    // Modo consolidado: primeira ficha vista de cada gestante
    let gestantes = agrupar(fichas);
    let primeiras: Vec<&Ficha> = gestantes.iter().filter_map(|g| g.primeira()).collect();
    let fora_area_count = primeiras.iter().filter(|f| f.ciclo.fora_area).count() as u64;
    let desfechos: Vec<String> = primeiras
        .iter()
        .filter_map(|f| f.ciclo.desfecho.as_deref())
        .filter(|d| rotulos.desfecho_valido(d))
        .map(|d| rotulos.desfecho(d))
        .filter(|d| d != NAO_INFORMADO)
        .collect();
    let total_desfechos = desfechos.len() as u64;

    let periodos: Vec<&str> = ativas
        .iter()
        .map(|f| f.periodo_gestacional.trim())
        .filter(|p| !p.is_empty())
        .collect();
    let total_periodos = periodos.len() as u64;

    let etnias: Vec<String> = ativas
        .iter()
        .map(|f| f.etnia_indigena.trim())
        .filter(|c| !c.is_empty() && !ETNIAS_VAZIAS.contains(c))
        .map(|c| rotulos.etnia(c))
        .collect();
    let total_indigenas = etnias.len() as u64;

    let municipios_unicos = ativas
        .iter()
        .map(|f| f.municipio.trim())
        .filter(|m| !m.is_empty())
        .collect::<BTreeSet<_>>()
        .len() as u64;

    let mut deficiencia_counts = distribuicao(
        ativas.iter().map(|f| bucket_deficiencia(&f.deficiencia)),
        total_ativas,
    );
    for rotulo in ["Sim", "Não", NAO_INFORMADO] {
        deficiencia_counts
            .entry(rotulo.to_string())
            .or_insert(Contagem { count: 0, porcentagem: 0.0 });
    }

    debug!(
        "Estatísticas: {} fichas, {} gestantes ativas, {} gestantes distintas",
        fichas.len(),
        total_ativas,
        gestantes.len()
    );

    Estatisticas {
        total_registros: total_ativas,
        total_registros_filtrados: fichas.len() as u64,
        municipios_unicos,
        periodo_gestacional: distribuicao(periodos, total_periodos),
        genero_counts: distribuicao(
            ativas
                .iter()
                .map(|f| rotulo_ou_nao_informado(&f.genero, |c| rotulos.genero(c))),
            total_ativas,
        ),
        sexualidade_counts: distribuicao(
            ativas
                .iter()
                .map(|f| rotulo_ou_nao_informado(&f.sexualidade, |c| rotulos.sexualidade(c))),
            total_ativas,
        ),
        raca_cor_etnia_counts: distribuicao(
            ativas.iter().map(|f| rotulos.raca(&f.raca_cor_etnia)),
            total_ativas,
        ),
        etnia_indigena_counts: distribuicao(
            etnias.into_iter().filter(|n| !ETNIAS_VAZIAS.contains(&n.as_str())),
            total_indigenas,
        ),
        deficiencia_counts,
        media_pontuacao: media_pontuacao(&ativas),
        classificacao_risco: ResumoRisco::contar(ativas.iter().copied()),
        caracteristicas_counts: contar_multiplo(rotulos, &ativas, CampoMultiplo::Caracteristicas),
        avaliacao_nutricional_counts: contar_multiplo(
            rotulos,
            &ativas,
            CampoMultiplo::AvaliacaoNutricional,
        ),
        comorbidades_counts: contar_multiplo(rotulos, &ativas, CampoMultiplo::Comorbidades),
        historia_obstetrica_counts: contar_multiplo(
            rotulos,
            &ativas,
            CampoMultiplo::HistoriaObstetrica,
        ),
        condicoes_gestacionais_counts: contar_multiplo(
            rotulos,
            &ativas,
            CampoMultiplo::CondicoesGestacionais,
        ),
        desfecho_counts: distribuicao(desfechos, total_desfechos),
        total_desfechos,
        fora_area_count,
        total_gestantes_distintas: gestantes.len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FichaBuilder;
    use proptest::prelude::*;

    #[test]
    fn test_porcentagem_arredonda_uma_casa() {
        assert_eq!(porcentagem(1, 3), 33.3);
        assert_eq!(porcentagem(2, 3), 66.7);
        assert_eq!(porcentagem(5, 0), 0.0);
        assert_eq!(porcentagem(0, 7), 0.0);
    }

    #[test]
    fn test_cartao_ativo_usa_a_ativa_de_maior_id() {
        let rotulos = Rotulos::padrao();
        let fichas = vec![
            FichaBuilder::new(2).cpf("").classificacao("Risco Alto").desfecho("W90").build(),
            FichaBuilder::new(1).cpf("").classificacao("médio risco").build(),
        ];
        let e = estatisticas(&rotulos, &fichas);
        assert_eq!(e.total_registros, 1);
        assert_eq!(e.classificacao_risco.risco_intermediario, 1);
        assert_eq!(e.classificacao_risco.risco_alto, 0);
        assert_eq!(e.classificacao_risco.porcentagem_intermediario, 100.0);
        assert_eq!(e.total_registros_filtrados, 2);
    }

    #[test]
    fn test_desfecho_e_fora_area_contados_uma_vez_por_gestante() {
        let rotulos = Rotulos::padrao();
        // Mais recente primeiro: a primeira ficha vista decide
        let fichas = vec![
            FichaBuilder::new(3).cpf("111.111.111-11").desfecho("W90").build(),
            FichaBuilder::new(2).cpf("111.111.111-11").desfecho("W90").municipio("Patos").build(),
            FichaBuilder::new(1).cpf("11111111111").build(),
            FichaBuilder::new(4).cpf("").nome("Ana").fora_area().build(),
            FichaBuilder::new(5).cpf("").nome("Ana").build(),
        ];
        let e = estatisticas(&rotulos, &fichas);
        assert_eq!(e.total_gestantes_distintas, 2);
        assert_eq!(e.total_desfechos, 1);
        assert_eq!(e.desfecho_counts.values().map(|c| c.count).sum::<u64>(), 1);
        assert_eq!(e.fora_area_count, 1);
        // Gestante do CPF tem a id=1 ativa; Ana tem a id=5
        assert_eq!(e.total_registros, 2);
    }

    #[test]
    fn test_multiselecao_conta_cada_item() {
        let rotulos = Rotulos::padrao();
        let fichas = vec![
            FichaBuilder::new(1)
                .cpf("")
                .nome("Ana")
                .multiplo(CampoMultiplo::Comorbidades, &["cardiopatia", "epilepsia", "codigo_novo"])
                .build(),
            FichaBuilder::new(2)
                .cpf("")
                .nome("Bia")
                .multiplo(CampoMultiplo::Comorbidades, &["cardiopatia"])
                .build(),
            FichaBuilder::new(3).cpf("").nome("Cris").build(),
        ];
        let e = estatisticas(&rotulos, &fichas);
        let cardiopatia = rotulos.item(CampoMultiplo::Comorbidades, "cardiopatia");
        assert_eq!(e.comorbidades_counts[&cardiopatia].count, 2);
        // Total: gestantes com ao menos um item marcado
        assert_eq!(e.comorbidades_counts[&cardiopatia].porcentagem, 100.0);
        assert_eq!(e.comorbidades_counts["codigo_novo"].count, 1);
        assert_eq!(e.comorbidades_counts.values().map(|c| c.count).sum::<u64>(), 4);
    }

    #[test]
    fn test_demograficos_e_media() {
        let rotulos = Rotulos::padrao();
        let fichas = vec![
            FichaBuilder::new(1).cpf("").nome("Ana").raca("indigena").etnia("Não indígena").pontuacao(10).deficiencia("sim").build(),
            FichaBuilder::new(2).cpf("").nome("Bia").raca("Parda").pontuacao(15).deficiencia("talvez").build(),
            FichaBuilder::new(3).cpf("").nome("Cris").raca("").pontuacao(0).genero("").build(),
        ];
        let e = estatisticas(&rotulos, &fichas);
        assert_eq!(e.media_pontuacao, 12.5);
        assert_eq!(e.raca_cor_etnia_counts["Indígena"].count, 1);
        assert_eq!(e.raca_cor_etnia_counts["Parda"].count, 1);
        assert_eq!(e.raca_cor_etnia_counts[NAO_INFORMADO].count, 1);
        assert_eq!(e.genero_counts[NAO_INFORMADO].count, 1);
        assert_eq!(e.deficiencia_counts["Sim"].count, 1);
        assert_eq!(e.deficiencia_counts["Não"].count, 1);
        assert_eq!(e.deficiencia_counts[NAO_INFORMADO].count, 1);
        assert!(e.etnia_indigena_counts.is_empty());
        assert_eq!(e.municipios_unicos, 1);
    }

    #[test]
    fn test_conjunto_vazio() {
        let e = estatisticas(&Rotulos::padrao(), &[]);
        assert_eq!(e.total_registros, 0);
        assert_eq!(e.media_pontuacao, 0.0);
        assert_eq!(e.classificacao_risco.porcentagem_alto, 0.0);
        assert_eq!(e.deficiencia_counts.len(), 3);
    }

    proptest! {
        /// Sem valores vazios, as contagens somam o total e as porcentagens ~100
        #[test]
        fn porcentagens_somam_cem(rotulos in prop::collection::vec("[a-e]", 1..200)) {
            let total = rotulos.len() as u64;
            let dist = distribuicao(rotulos, total);
            let soma_count: u64 = dist.values().map(|c| c.count).sum();
            let soma_pct: f64 = dist.values().map(|c| c.porcentagem).sum();
            prop_assert_eq!(soma_count, total);
            let tolerancia = 0.1 * dist.len() as f64 + 1e-9;
            prop_assert!((soma_pct - 100.0).abs() <= tolerancia, "soma = {}", soma_pct);
        }

        #[test]
        fn porcentagem_entre_zero_e_cem(total in 1u64..10_000, fracao in 0.0f64..=1.0) {
            let count = (total as f64 * fracao) as u64;
            let p = porcentagem(count, total);
            prop_assert!((0.0..=100.0).contains(&p));
        }
    }
}
