//! Macrorregiões e regiões de saúde
//!
//! Cada município pertence a exatamente uma região, e cada região a uma
//! macrorregião. A tabela é usada pelo painel de monitoramento para expandir um
//! filtro regional em uma lista de municípios.

use std::collections::BTreeMap;

/// Tabela macrorregião → região → municípios
#[derive(Debug, Clone, Default)]
pub struct Regioes {
    macros: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

/// Posição de um município na divisão regional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localizacao {
    pub macrorregiao: String,
    pub regiao: String,
}

impl Regioes {
    /// Divisão regional vigente
    pub fn padrao() -> Self {
        let mut regioes = Self::default();
        for (macro_nome, lista) in MACRORREGIOES {
            for (regiao, municipios) in lista.iter() {
                regioes = regioes.com_regiao(macro_nome, regiao, municipios);
            }
        }
        regioes
    }

    /// Acrescenta (ou substitui) uma região
    pub fn com_regiao(mut self, macrorregiao: &str, regiao: &str, municipios: &[&str]) -> Self {
        self.macros.entry(macrorregiao.to_string()).or_default().insert(
            regiao.to_string(),
            municipios.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    /// Macrorregião e região de um município, se ele constar da tabela
    pub fn localizar(&self, municipio: &str) -> Option<Localizacao> {
        self.macros.iter().find_map(|(macro_nome, regioes)| {
            regioes.iter().find_map(|(regiao, municipios)| {
                municipios.iter().any(|m| m == municipio).then(|| Localizacao {
                    macrorregiao: macro_nome.clone(),
                    regiao: regiao.clone(),
                })
            })
        })
    }

    /// Municípios cobertos por um filtro regional.
    ///
    /// Sem macrorregião, todos os municípios; região sem macrorregião é ignorada.
    pub fn municipios(&self, macrorregiao: Option<&str>, regiao: Option<&str>) -> Vec<String> {
        match macrorregiao {
            None => self
                .macros
                .values()
                .flat_map(|r| r.values().flatten().cloned())
                .collect(),
            Some(macro_nome) => {
                let Some(regioes) = self.macros.get(macro_nome) else {
                    return Vec::new();
                };
                match regiao {
                    Some(regiao) => regioes.get(regiao).cloned().unwrap_or_default(),
                    None => regioes.values().flatten().cloned().collect(),
                }
            }
        }
    }

    pub fn macrorregioes(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.macros
            .iter()
            .map(|(m, r)| (m.as_str(), r.keys().map(String::as_str).collect()))
    }
}

/// Macrorregiões de saúde, suas regiões e os municípios de cada região
pub(crate) const MACRORREGIOES: &[(&str, &[(&str, &[&str])])] = &[
    (
        "1ª",
        &[
            (
                "1ª",
                &[
                    "Alhandra",
                    "Bayeux",
                    "Caaporã",
                    "Cabedelo",
                    "Conde",
                    "Cruz do Espírito Santo",
                    "João Pessoa",
                    "Lucena",
                    "Mari",
                    "Pitimbu",
                    "Riachão do Poço",
                    "Santa Rita",
                    "Sapé",
                    "Sobrado",
                ],
            ),
            (
                "2ª",
                &[
                    "Alagoinha",
                    "Araçagi",
                    "Araruna",
                    "Bananeiras",
                    "Belém",
                    "Borborema",
                    "Cacimba de Dentro",
                    "Caiçara",
                    "Casserengue",
                    "Cuitegi",
                    "Dona Inês",
                    "Duas Estradas",
                    "Guarabira",
                    "Lagoa de Dentro",
                    "Logradouro",
                    "Mulungu",
                    "Pilões",
                    "Pilõezinhos",
                    "Pirpirituba",
                    "Riachão",
                    "Serra da Raiz",
                    "Serraria",
                    "Sertãozinho",
                    "Solânea",
                    "Tacima",
                ],
            ),
            (
                "12ª",
                &[
                    "Caldas Brandão",
                    "Gurinhém",
                    "Ingá",
                    "Itabaiana",
                    "Itatuba",
                    "Juarez Távora",
                    "Juripiranga",
                    "Mogeiro",
                    "Pedras de Fogo",
                    "Pilar",
                    "Riachão do Bacamarte",
                    "Salgado de São Félix",
                    "São José dos Ramos",
                    "São Miguel de Taipu",
                ],
            ),
            (
                "14ª",
                &[
                    "Baía da Traição",
                    "Capim",
                    "Cuité de Mamanguape",
                    "Curral de Cima",
                    "Itapororoca",
                    "Jacaraú",
                    "Marcação",
                    "Mamanguape",
                    "Mataraca",
                    "Pedro Régis",
                    "Rio Tinto",
                ],
            ),
        ],
    ),
    (
        "2ª",
        &[
            (
                "3ª",
                &[
                    "Alagoa Grande",
                    "Alagoa Nova",
                    "Algodão de Jandaíra",
                    "Arara",
                    "Areia",
                    "Areial",
                    "Esperança",
                    "Lagoa Seca",
                    "Matinhas",
                    "Montadas",
                    "Remígio",
                    "São Sebastião de Lagoa de Roça",
                ],
            ),
            (
                "4ª",
                &[
                    "Baraúna",
                    "Barra de Santana",
                    "Cubati",
                    "Cuité",
                    "Damião",
                    "Frei Martinho",
                    "Nova Floresta",
                    "Nova Palmeira",
                    "Pedra Lavrada",
                    "Picuí",
                    "São Vicente do Seridó",
                    "Sossêgo",
                ],
            ),
            (
                "5ª",
                &[
                    "Amparo",
                    "Camalaú",
                    "Caraúbas",
                    "Congo",
                    "Coxixola",
                    "Gurjão",
                    "Monteiro",
                    "Ouro Velho",
                    "Parari",
                    "Prata",
                    "São João do Cariri",
                    "São João do Tigre",
                    "São José dos Cordeiros",
                    "São Sebastião do Umbuzeiro",
                    "Serra Branca",
                    "Sumé",
                    "Zabelê",
                ],
            ),
            (
                "15ª",
                &[
                    "Alcantil",
                    "Aroeiras",
                    "Barra de Santa Rosa",
                    "Barra de São Miguel",
                    "Boqueirão",
                    "Cabaceiras",
                    "Caturité",
                    "Gado Bravo",
                    "Natuba",
                    "Queimadas",
                    "Riacho de Santo Antônio",
                    "Santa Cecília",
                    "São Domingos do Cariri",
                    "Umbuzeiro",
                ],
            ),
            (
                "16ª",
                &[
                    "Assunção",
                    "Boa Vista",
                    "Campina Grande",
                    "Fagundes",
                    "Juazeirinho",
                    "Livramento",
                    "Massaranduba",
                    "Olivedos",
                    "Pocinhos",
                    "Puxinanã",
                    "Santo André",
                    "Serra Redonda",
                    "Soledade",
                    "Taperoá",
                    "Tenório",
                ],
            ),
        ],
    ),
    (
        "3ª",
        &[
            (
                "6ª",
                &[
                    "Areia de Baraúnas",
                    "Cacimba de Areia",
                    "Cacimbas",
                    "Catingueira",
                    "Condado",
                    "Desterro",
                    "Emas",
                    "Junco do Seridó",
                    "Mãe d'Água",
                    "Malta",
                    "Maturéia",
                    "Passagem",
                    "Patos",
                    "Quixaba",
                    "Salgadinho",
                    "Santa Luzia",
                    "Santa Teresinha",
                    "São José de Espinharas",
                    "São José do Bonfim",
                    "São José do Sabugi",
                    "São Mamede",
                    "Teixeira",
                    "Várzea",
                    "Vista Serrana",
                ],
            ),
            (
                "7ª",
                &[
                    "Aguiar",
                    "Boa Ventura",
                    "Conceição",
                    "Coremas",
                    "Curral Velho",
                    "Diamante",
                    "Ibiara",
                    "Igaracy",
                    "Itaporanga",
                    "Nova Olinda",
                    "Olho d'Água",
                    "Pedra Branca",
                    "Piancó",
                    "Santa Inês",
                    "Santana de Mangueira",
                    "Santana dos Garrotes",
                    "São José de Caiana",
                    "Serra Grande",
                ],
            ),
            (
                "8ª",
                &[
                    "Belém do Brejo do Cruz",
                    "Bom Sucesso",
                    "Brejo do Cruz",
                    "Brejo dos Santos",
                    "Catolé do Rocha",
                    "Jericó",
                    "Mato Grosso",
                    "Riacho dos Cavalos",
                    "São Bento",
                    "São José do Brejo do Cruz",
                ],
            ),
            (
                "9ª",
                &[
                    "Bernardino Batista",
                    "Bom Jesus",
                    "Bonito de Santa Fé",
                    "Cachoeira dos Índios",
                    "Cajazeiras",
                    "Carrapateira",
                    "Joca Claudino",
                    "Monte Horebe",
                    "Poço Dantas",
                    "Poço de José de Moura",
                    "Santa Helena",
                    "São João do Rio do Peixe",
                    "São José de Piranhas",
                    "Triunfo",
                    "Uiraúna",
                ],
            ),
            (
                "10ª",
                &[
                    "Aparecida",
                    "Lastro",
                    "Marizópolis",
                    "Nazarezinho",
                    "Santa Cruz",
                    "São Francisco",
                    "São José da Lagoa Tapada",
                    "Sousa",
                    "Vieirópolis",
                ],
            ),
            (
                "11ª",
                &[
                    "Água Branca",
                    "Imaculada",
                    "Juru",
                    "Manaíra",
                    "Princesa Isabel",
                    "São José de Princesa",
                    "Tavares",
                ],
            ),
            (
                "13ª",
                &[
                    "Cajazeirinhas",
                    "Lagoa",
                    "Paulista",
                    "Pombal",
                    "São Bentinho",
                    "São Domingos",
                ],
            ),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localizar() {
        let regioes = Regioes::padrao();
        let loc = regioes.localizar("João Pessoa").unwrap();
        assert_eq!(loc.macrorregiao, "1ª");
        assert_eq!(loc.regiao, "1ª");
        assert!(regioes.localizar("Recife").is_none());
    }

    #[test]
    fn test_municipios_por_filtro() {
        let regioes = Regioes::padrao();
        let todos = regioes.municipios(None, None);
        assert_eq!(todos.len(), 223);

        let loc = regioes.localizar("Campina Grande").unwrap();
        let da_regiao = regioes.municipios(Some(&loc.macrorregiao), Some(&loc.regiao));
        assert!(da_regiao.contains(&"Campina Grande".to_string()));
        assert!(!da_regiao.contains(&"João Pessoa".to_string()));

        assert!(regioes.municipios(Some("9ª"), None).is_empty());
    }
}
