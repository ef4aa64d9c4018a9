//! Escopo de visibilidade
//!
//! Toda consulta sobre fichas passa por [`resolver_escopo`], que traduz o
//! usuário autenticado em um conjunto de municípios visíveis e nos acessos
//! especiais (saúde indígena, PNAR). Os filtros de relatório são combinados com
//! esse escopo em [`FiltroEfetivo`].

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite};
use std::collections::BTreeSet;
use tracing::warn;

use crate::error::{FichaError, FichaResult};
use crate::models::{ClassificacaoRisco, Ficha, Papel, TipoUsuario, Usuario};

/// Municípios alcançados por uma consulta
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Abrangencia {
    /// Sem restrição de município
    Todos,
    Municipios(BTreeSet<String>),
}

impl Abrangencia {
    pub fn contem(&self, municipio: &str) -> bool {
        match self {
            Abrangencia::Todos => true,
            Abrangencia::Municipios(m) => m.contains(municipio),
        }
    }

    pub fn apenas(municipio: impl Into<String>) -> Self {
        Abrangencia::Municipios(BTreeSet::from([municipio.into()]))
    }

    /// Interseção com uma lista explícita de municípios
    pub fn restringir<I, S>(&self, municipios: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        municipios
            .into_iter()
            .map(Into::into)
            .filter(|m: &String| self.contem(m))
            .collect()
    }
}

/// Subconjunto de fichas alcançado por um relatório
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recorte {
    Geral,
    /// Apenas gestantes de raça/cor/etnia indígena
    SaudeIndigena,
    /// Fichas de alto risco sinalizadas para o PNAR e ainda ativas
    Pnar,
}

impl Recorte {
    pub fn admite(self, ficha: &Ficha) -> bool {
        match self {
            Recorte::Geral => true,
            Recorte::SaudeIndigena => ficha.indigena(),
            Recorte::Pnar => {
                ficha.ciclo.pnar_sinalizado
                    && ficha.classificacao() == Some(ClassificacaoRisco::Alto)
                    && ficha.ativa()
            }
        }
    }
}

/// Visibilidade resolvida de um usuário
#[derive(Debug, Clone, Serialize)]
pub struct EscopoVisibilidade {
    pub usuario_id: i64,
    pub tipo: TipoUsuario,
    pub papel: Papel,
    /// Administrador municipal ou estadual
    pub administrador: bool,
    pub abrangencia: Abrangencia,
    /// Vê fichas de gestantes indígenas de qualquer município
    pub saude_indigena_global: bool,
    /// Vê a fila PNAR de qualquer município
    pub pnar_global: bool,
    /// Restringe a fila PNAR ao ambulatório do usuário de apoio
    pub servico_pnar: Option<String>,
}

/// Resolve o escopo de visibilidade de um usuário.
///
/// 1. Estadual super-administrador: todos os municípios.
/// 2. Demais papéis: municípios associados mais o de lotação.
/// 3. Acessos especiais de apoio valem para todos os municípios, mas só para
///    o recorte correspondente.
pub fn resolver_escopo(usuario: &Usuario) -> EscopoVisibilidade {
    let super_estadual = usuario.super_admin_estadual();

    let abrangencia = if super_estadual {
        Abrangencia::Todos
    } else {
        let municipios: BTreeSet<String> = usuario
            .municipios_associados
            .iter()
            .chain(usuario.municipio.iter())
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        Abrangencia::Municipios(municipios)
    };

    let apoio = usuario.tipo == TipoUsuario::Apoio;

    EscopoVisibilidade {
        usuario_id: usuario.id,
        tipo: usuario.tipo,
        papel: usuario.papel,
        administrador: !apoio
            && (usuario.is_admin || matches!(usuario.papel, Papel::Municipal | Papel::Estadual)),
        abrangencia,
        saude_indigena_global: super_estadual || (apoio && usuario.acesso_saude_indigena),
        pnar_global: super_estadual || (apoio && usuario.pnar),
        servico_pnar: if apoio && usuario.pnar {
            usuario.servico_pnar.clone().filter(|s| !s.trim().is_empty())
        } else {
            None
        },
    }
}

impl EscopoVisibilidade {
    /// Ficha enviada pelo próprio usuário
    pub fn dono(&self, ficha: &Ficha) -> bool {
        self.tipo == TipoUsuario::Usuario && ficha.user_id == self.usuario_id
    }

    /// Apoio sem ambulatório cadastrado não vê a fila
    pub fn servico_pnar_obrigatorio(&self) -> FichaResult<Option<&str>> {
        match (self.tipo, self.servico_pnar.as_deref()) {
            (TipoUsuario::Apoio, None) => Err(FichaError::PermissaoNegada(
                "usuário de apoio sem serviço PNAR cadastrado".to_string(),
            )),
            (TipoUsuario::Apoio, Some(servico)) => Ok(Some(servico)),
            (TipoUsuario::Usuario, _) => Ok(None),
        }
    }

    fn ve_na_fila_pnar(&self, ficha: &Ficha) -> bool {
        self.pnar_global
            && Recorte::Pnar.admite(ficha)
            && match self.servico_pnar_obrigatorio() {
                Ok(Some(servico)) => ficha.ciclo.pnar_ambulatorio.as_deref() == Some(servico),
                Ok(None) => true,
                Err(_) => false,
            }
    }

    /// Indica se a ficha pode ser exibida a este usuário
    pub fn ve_ficha(&self, ficha: &Ficha) -> bool {
        self.dono(ficha)
            || (self.administrador && self.abrangencia.contem(&ficha.municipio))
            || (self.saude_indigena_global && ficha.indigena())
            || self.ve_na_fila_pnar(ficha)
    }

    /// Municípios alcançados por um relatório do recorte pedido
    pub fn abrangencia_para(&self, recorte: Recorte) -> FichaResult<Abrangencia> {
        match recorte {
            Recorte::Geral if self.administrador => Ok(self.abrangencia.clone()),
            Recorte::SaudeIndigena if self.saude_indigena_global => Ok(Abrangencia::Todos),
            Recorte::SaudeIndigena if self.administrador => Ok(self.abrangencia.clone()),
            Recorte::Pnar if self.pnar_global => Ok(Abrangencia::Todos),
            Recorte::Geral => Err(FichaError::PermissaoNegada(
                "apenas administradores podem acessar relatórios".to_string(),
            )),
            Recorte::SaudeIndigena => Err(FichaError::PermissaoNegada(
                "sem acesso ao relatório de saúde indígena".to_string(),
            )),
            Recorte::Pnar => Err(FichaError::PermissaoNegada(
                "sem acesso à fila PNAR".to_string(),
            )),
        }
    }
}

/// Filtros opcionais informados na tela de relatório
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FiltroRelatorio {
    pub municipio: Option<String>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
}

/// Filtro de relatório já combinado com o escopo do usuário
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FiltroEfetivo {
    pub abrangencia: Abrangencia,
    pub municipio: Option<String>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    /// Preenchido quando o filtro de município foi descartado
    pub aviso: Option<String>,
}

impl FiltroEfetivo {
    /// Combina o filtro pedido com a abrangência do usuário.
    ///
    /// Um município fora da abrangência não gera erro: o filtro é descartado,
    /// o relatório volta a cobrir todos os municípios permitidos e um aviso é
    /// devolvido junto com o resultado.
    pub fn novo(abrangencia: Abrangencia, filtro: &FiltroRelatorio) -> Self {
        let pedido = filtro
            .municipio
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());

        let (municipio, aviso) = match pedido {
            Some(m) if abrangencia.contem(m) => (Some(m.to_string()), None),
            Some(m) => {
                warn!("Filtro de município fora do escopo descartado: {}", m);
                (
                    None,
                    Some(format!(
                        "Acesso negado ao município {}. Exibindo os municípios permitidos.",
                        m
                    )),
                )
            }
            None => (None, None),
        };

        Self {
            abrangencia,
            municipio,
            data_inicio: filtro.data_inicio,
            data_fim: filtro.data_fim,
            aviso,
        }
    }

    /// Predicado equivalente a [`FiltroEfetivo::aplicar_sql`]
    pub fn admite(&self, ficha: &Ficha) -> bool {
        self.abrangencia.contem(&ficha.municipio)
            && self
                .municipio
                .as_deref()
                .map_or(true, |m| ficha.municipio == m)
            && self.data_inicio.map_or(true, |d| ficha.data_envio >= d)
            && self.data_fim.map_or(true, |d| ficha.data_envio <= d)
    }

    /// Acrescenta as condições ao `WHERE` já iniciado na consulta
    pub fn aplicar_sql(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        if let Abrangencia::Municipios(municipios) = &self.abrangencia {
            if municipios.is_empty() {
                qb.push(" AND 0");
            } else {
                qb.push(" AND municipio IN (");
                let mut separados = qb.separated(", ");
                for m in municipios {
                    separados.push_bind(m.clone());
                }
                separados.push_unseparated(")");
            }
        }
        if let Some(m) = &self.municipio {
            qb.push(" AND municipio = ").push_bind(m.clone());
        }
        if let Some(d) = self.data_inicio {
            qb.push(" AND data_envio >= ").push_bind(d);
        }
        if let Some(d) = self.data_fim {
            qb.push(" AND data_envio <= ").push_bind(d);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{usuario, FichaBuilder};

    #[test]
    fn test_super_estadual_ve_tudo() {
        let mut u = usuario(1, Papel::Estadual, "João Pessoa");
        u.is_super_admin = true;
        let escopo = resolver_escopo(&u);
        assert_eq!(escopo.abrangencia, Abrangencia::Todos);
        assert!(escopo.saude_indigena_global);
        assert!(escopo.pnar_global);
    }

    #[test]
    fn test_estadual_sem_super_fica_restrito() {
        let u = usuario(1, Papel::Estadual, "Patos");
        let escopo = resolver_escopo(&u);
        assert_eq!(escopo.abrangencia, Abrangencia::apenas("Patos"));
        assert!(!escopo.pnar_global);
    }

    #[test]
    fn test_municipal_com_municipios_associados() {
        let mut u = usuario(2, Papel::Municipal, "João Pessoa");
        u.municipios_associados = vec!["Bayeux".into(), "João Pessoa".into()];
        let escopo = resolver_escopo(&u);
        assert!(escopo.abrangencia.contem("Bayeux"));
        assert!(escopo.abrangencia.contem("João Pessoa"));
        assert!(!escopo.abrangencia.contem("Campina Grande"));
    }

    #[test]
    fn test_filtro_fora_do_escopo_e_descartado_com_aviso() {
        let escopo = resolver_escopo(&usuario(2, Papel::Municipal, "João Pessoa"));
        let filtro = FiltroRelatorio {
            municipio: Some("Campina Grande".into()),
            ..Default::default()
        };
        let efetivo = FiltroEfetivo::novo(escopo.abrangencia_para(Recorte::Geral).unwrap(), &filtro);

        assert_eq!(efetivo.municipio, None);
        assert_eq!(efetivo.abrangencia, Abrangencia::apenas("João Pessoa"));
        assert!(efetivo.aviso.as_deref().unwrap().contains("Campina Grande"));

        let cg = FichaBuilder::new(1).municipio("Campina Grande").build();
        let jp = FichaBuilder::new(2).municipio("João Pessoa").build();
        assert!(!efetivo.admite(&cg));
        assert!(efetivo.admite(&jp));
    }

    #[test]
    fn test_filtro_dentro_do_escopo_estreita() {
        let mut u = usuario(2, Papel::Municipal, "João Pessoa");
        u.municipios_associados = vec!["Bayeux".into()];
        let escopo = resolver_escopo(&u);
        let filtro = FiltroRelatorio {
            municipio: Some("Bayeux".into()),
            ..Default::default()
        };
        let efetivo = FiltroEfetivo::novo(escopo.abrangencia.clone(), &filtro);
        assert_eq!(efetivo.municipio.as_deref(), Some("Bayeux"));
        assert!(efetivo.aviso.is_none());
        assert!(!efetivo.admite(&FichaBuilder::new(1).municipio("João Pessoa").build()));
    }

    #[test]
    fn test_intervalo_de_datas_inclusivo() {
        let d = |dia| NaiveDate::from_ymd_opt(2025, 3, dia).unwrap();
        let efetivo = FiltroEfetivo::novo(
            Abrangencia::Todos,
            &FiltroRelatorio {
                municipio: None,
                data_inicio: Some(d(10)),
                data_fim: Some(d(20)),
            },
        );
        assert!(efetivo.admite(&FichaBuilder::new(1).data_envio(d(10)).build()));
        assert!(efetivo.admite(&FichaBuilder::new(2).data_envio(d(20)).build()));
        assert!(!efetivo.admite(&FichaBuilder::new(3).data_envio(d(21)).build()));
        assert!(!efetivo.admite(&FichaBuilder::new(4).data_envio(d(9)).build()));
    }

    #[test]
    fn test_comum_ve_apenas_as_proprias_fichas() {
        let escopo = resolver_escopo(&usuario(7, Papel::Comum, "João Pessoa"));
        assert!(escopo.ve_ficha(&FichaBuilder::new(1).user_id(7).build()));
        assert!(!escopo.ve_ficha(&FichaBuilder::new(2).user_id(8).build()));
        assert!(escopo.abrangencia_para(Recorte::Geral).is_err());
    }

    #[test]
    fn test_apoio_saude_indigena_ve_todos_os_municipios_so_indigenas() {
        let mut u = usuario(3, Papel::Apoio, "João Pessoa");
        u.tipo = TipoUsuario::Apoio;
        u.acesso_saude_indigena = true;
        let escopo = resolver_escopo(&u);

        let indigena = FichaBuilder::new(1).municipio("Baía da Traição").raca("indigena").build();
        let parda = FichaBuilder::new(2).municipio("Baía da Traição").raca("parda").build();
        assert!(escopo.ve_ficha(&indigena));
        assert!(!escopo.ve_ficha(&parda));
        assert_eq!(
            escopo.abrangencia_para(Recorte::SaudeIndigena).unwrap(),
            Abrangencia::Todos
        );
        assert!(escopo.abrangencia_para(Recorte::Geral).is_err());
    }

    #[test]
    fn test_apoio_pnar_ve_apenas_o_proprio_servico() {
        let mut u = usuario(4, Papel::Apoio, "");
        u.tipo = TipoUsuario::Apoio;
        u.pnar = true;
        u.servico_pnar = Some("Ambulatório A".into());
        let escopo = resolver_escopo(&u);

        let do_servico = FichaBuilder::new(1)
            .classificacao("Risco Alto")
            .pnar("Ambulatório A")
            .build();
        let de_outro = FichaBuilder::new(2)
            .classificacao("Risco Alto")
            .pnar("Ambulatório B")
            .build();
        assert!(escopo.ve_ficha(&do_servico));
        assert!(!escopo.ve_ficha(&de_outro));
    }

    #[test]
    fn test_recorte_pnar() {
        let ficha = FichaBuilder::new(1).classificacao("alto risco").pnar("X").build();
        assert!(Recorte::Pnar.admite(&ficha));
        let resolvida = FichaBuilder::new(2)
            .classificacao("Risco Alto")
            .pnar("X")
            .desfecho("W90")
            .build();
        assert!(!Recorte::Pnar.admite(&resolvida));
        let habitual = FichaBuilder::new(3).classificacao("Risco Habitual").pnar("X").build();
        assert!(!Recorte::Pnar.admite(&habitual));
    }
}
