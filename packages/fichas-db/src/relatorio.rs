//! Relatórios administrativos e painel de monitoramento

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::agregacao::{estatisticas, Estatisticas, ResumoRisco};
use crate::ciclo::StatusFicha;
use crate::error::{FichaError, FichaResult};
use crate::escopo::{Abrangencia, EscopoVisibilidade, FiltroEfetivo, FiltroRelatorio, Recorte};
use crate::identidade::representantes_ativas;
use crate::models::{Ficha, TipoUsuario};
use crate::repositorio::{fichas_no_filtro, municipios_visiveis, usuarios_ativos_por_municipio};
use crate::rotulos::{Regioes, Rotulos, NAO_INFORMADO};

/// Linha da tabela do relatório, com os rótulos de exibição
#[derive(Debug, Clone, Serialize)]
pub struct LinhaRelatorio {
    pub codigo_ficha: String,
    pub nome_gestante: String,
    pub data_nasc: String,
    pub cpf: String,
    pub municipio: String,
    pub ubs: String,
    pub acs: String,
    pub profissional: Option<String>,
    pub periodo_gestacional: String,
    pub data_envio: NaiveDate,
    pub pontuacao_total: i64,
    pub classificacao_risco: String,
    pub genero: String,
    pub sexualidade: String,
    pub raca_cor_etnia: String,
    pub etnia_indigena: String,
    /// "Sim" ou "Não"
    pub fa: String,
    /// Rótulo do desfecho, ou "-"
    pub desfecho: String,
    pub status: StatusFicha,
}

impl LinhaRelatorio {
    pub fn nova(rotulos: &Rotulos, ficha: &Ficha) -> Self {
        let ou_nao_informado = |valor: &str, rotulo: String| {
            if valor.trim().is_empty() {
                NAO_INFORMADO.to_string()
            } else {
                rotulo
            }
        };
        Self {
            codigo_ficha: ficha.codigo_ficha.clone(),
            nome_gestante: ficha.nome_gestante.clone(),
            data_nasc: ficha.data_nasc.clone(),
            cpf: ficha.cpf.clone(),
            municipio: ficha.municipio.clone(),
            ubs: ficha.ubs.clone(),
            acs: ficha.acs.clone(),
            profissional: ficha.profissional.clone(),
            periodo_gestacional: ficha.periodo_gestacional.clone(),
            data_envio: ficha.data_envio,
            pontuacao_total: ficha.pontuacao_total,
            classificacao_risco: ficha
                .classificacao()
                .map_or(NAO_INFORMADO, |c| c.rotulo())
                .to_string(),
            genero: ou_nao_informado(
                &ficha.genero,
                rotulos.genero(&ficha.genero.to_lowercase()),
            ),
            sexualidade: ou_nao_informado(
                &ficha.sexualidade,
                rotulos.sexualidade(&ficha.sexualidade.to_lowercase()),
            ),
            raca_cor_etnia: rotulos.raca(&ficha.raca_cor_etnia),
            etnia_indigena: rotulos.etnia(&ficha.etnia_indigena),
            fa: if ficha.ciclo.fora_area { "Sim" } else { "Não" }.to_string(),
            desfecho: match ficha.ciclo.desfecho.as_deref().map(str::trim) {
                Some(d) if !d.is_empty() => rotulos.desfecho(d),
                _ => "-".to_string(),
            },
            status: ficha.ciclo.status(),
        }
    }
}

/// Relatório geral ou de saúde indígena
#[derive(Debug, Clone, Serialize)]
pub struct Relatorio {
    pub recorte: Recorte,
    /// Municípios disponíveis para o filtro
    pub municipios: Vec<String>,
    pub filtro: FiltroEfetivo,
    pub registros: Vec<LinhaRelatorio>,
    pub estatisticas: Estatisticas,
    /// Preenchido quando parte do filtro pedido foi descartada
    pub aviso: Option<String>,
}

/// Gera o relatório do recorte pedido dentro do escopo do usuário
pub async fn gerar_relatorio(
    pool: &SqlitePool,
    rotulos: &Rotulos,
    escopo: &EscopoVisibilidade,
    recorte: Recorte,
    filtro: &FiltroRelatorio,
) -> FichaResult<Relatorio> {
    if recorte == Recorte::Pnar {
        return Err(FichaError::ValorInvalido(
            "A fila PNAR não possui relatório consolidado.".to_string(),
        ));
    }
    let abrangencia = escopo.abrangencia_para(recorte)?;
    let municipios = municipios_visiveis(pool, &abrangencia, recorte).await?;
    let efetivo = FiltroEfetivo::novo(abrangencia, filtro);

    let fichas: Vec<Ficha> = fichas_no_filtro(pool, &efetivo)
        .await?
        .into_iter()
        .filter(|f| recorte.admite(f))
        .collect();

    let estatisticas = estatisticas(rotulos, &fichas);
    let registros = fichas.iter().map(|f| LinhaRelatorio::nova(rotulos, f)).collect();

    info!(
        "Relatório {:?} para usuário {}: {} fichas, {} gestantes ativas",
        recorte, escopo.usuario_id, estatisticas.total_registros_filtrados, estatisticas.total_registros
    );

    Ok(Relatorio {
        recorte,
        municipios,
        aviso: efetivo.aviso.clone(),
        filtro: efetivo,
        registros,
        estatisticas,
    })
}

/// Filtro regional do painel de monitoramento
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltroRegional {
    pub macrorregiao: Option<String>,
    pub regiao: Option<String>,
    pub municipio: Option<String>,
}

fn preenchido(valor: &Option<String>) -> Option<&str> {
    valor.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Gestantes ativas por classificação de risco
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContagemRisco {
    pub total: u64,
    pub risco_habitual: u64,
    pub risco_intermediario: u64,
    pub risco_alto: u64,
}

impl From<&ResumoRisco> for ContagemRisco {
    fn from(r: &ResumoRisco) -> Self {
        Self {
            total: r.total(),
            risco_habitual: r.risco_habitual,
            risco_intermediario: r.risco_intermediario,
            risco_alto: r.risco_alto,
        }
    }
}

/// Painel de monitoramento regional
#[derive(Debug, Clone, Serialize)]
pub struct PainelMonitoramento {
    /// Filtro efetivamente aplicado
    pub filtro: FiltroRegional,
    pub municipios_permitidos: Vec<String>,
    pub geral: ContagemRisco,
    pub por_municipio: BTreeMap<String, ContagemRisco>,
    pub municipios_unicos: u64,
    /// Profissionais ativos lotados em cada município do filtro
    pub usuarios_ativos: BTreeMap<String, i64>,
    pub aviso: Option<String>,
}

/// Municípios cobertos por um filtro regional; o município prevalece
fn expandir_filtro(regioes: &Regioes, filtro: &FiltroRegional) -> (FiltroRegional, Vec<String>) {
    let mut efetivo = FiltroRegional {
        macrorregiao: preenchido(&filtro.macrorregiao).map(str::to_string),
        regiao: preenchido(&filtro.regiao).map(str::to_string),
        municipio: preenchido(&filtro.municipio).map(str::to_string),
    };

    if let Some(municipio) = efetivo.municipio.clone() {
        if efetivo.macrorregiao.is_none() && efetivo.regiao.is_none() {
            if let Some(local) = regioes.localizar(&municipio) {
                efetivo.macrorregiao = Some(local.macrorregiao);
                efetivo.regiao = Some(local.regiao);
            }
        }
        return (efetivo, vec![municipio]);
    }

    let municipios = regioes.municipios(efetivo.macrorregiao.as_deref(), efetivo.regiao.as_deref());
    (efetivo, municipios)
}

/// Monta o painel de monitoramento.
///
/// Usuário restrito que pede uma região fora do seu escopo volta ao próprio
/// município, com aviso.
pub async fn painel_monitoramento(
    pool: &SqlitePool,
    regioes: &Regioes,
    escopo: &EscopoVisibilidade,
    filtro: &FiltroRegional,
) -> FichaResult<PainelMonitoramento> {
    if !escopo.administrador && escopo.tipo != TipoUsuario::Apoio {
        return Err(FichaError::PermissaoNegada(
            "apenas administradores e apoio acessam o monitoramento".to_string(),
        ));
    }

    let (mut efetivo, candidatos) = expandir_filtro(regioes, filtro);
    let mut aviso = None;

    let permitidos: BTreeSet<String> = match &escopo.abrangencia {
        Abrangencia::Todos => candidatos.into_iter().collect(),
        restrita @ Abrangencia::Municipios(proprios) => {
            let dentro = restrita.restringir(candidatos);
            if dentro.is_empty() {
                warn!(
                    "Filtro regional fora do escopo do usuário {}: {:?}",
                    escopo.usuario_id, efetivo
                );
                aviso = Some(
                    "Filtro fora dos municípios permitidos. Exibindo os municípios do usuário."
                        .to_string(),
                );
                let proprio = if proprios.len() == 1 {
                    proprios.iter().next().cloned()
                } else {
                    None
                };
                efetivo = FiltroRegional {
                    macrorregiao: None,
                    regiao: None,
                    municipio: proprio.clone(),
                };
                if let Some(m) = &proprio {
                    if let Some(local) = regioes.localizar(m) {
                        efetivo.macrorregiao = Some(local.macrorregiao);
                        efetivo.regiao = Some(local.regiao);
                    }
                }
                proprios.clone()
            } else {
                dentro
            }
        }
    };

    let filtro_sql = FiltroEfetivo::novo(
        Abrangencia::Municipios(permitidos.clone()),
        &FiltroRelatorio::default(),
    );
    let fichas = fichas_no_filtro(pool, &filtro_sql).await?;
    let ativas = representantes_ativas(&fichas);

    let mut por_municipio: BTreeMap<String, Vec<&Ficha>> = BTreeMap::new();
    for ficha in ativas.iter().copied() {
        por_municipio.entry(ficha.municipio.clone()).or_default().push(ficha);
    }

    let municipios_permitidos: Vec<String> = permitidos.into_iter().collect();
    let usuarios_ativos = usuarios_ativos_por_municipio(pool, &municipios_permitidos).await?;

    Ok(PainelMonitoramento {
        filtro: efetivo,
        geral: ContagemRisco::from(&ResumoRisco::contar(ativas.iter().copied())),
        municipios_unicos: por_municipio.len() as u64,
        por_municipio: por_municipio
            .into_iter()
            .map(|(m, fichas)| (m, ContagemRisco::from(&ResumoRisco::contar(fichas))))
            .collect(),
        municipios_permitidos,
        usuarios_ativos,
        aviso,
    })
}
