//! Resolução de identidade da gestante
//!
//! Não existe tabela de gestantes: cada ficha carrega CPF, nome e data de
//! nascimento, e as fichas da mesma pessoa são reunidas na leitura. A chave é o
//! CPF quando ele é conhecido; caso contrário, o par exato (nome, data de
//! nascimento). Duas pessoas sem CPF com o mesmo nome e data de nascimento são
//! tratadas como uma só.
//!
//! [`normalizar_cpf`] é a única normalização do CPF. Em memória ela alimenta
//! [`ChaveGestante`]; no banco, o resultado fica gravado na coluna
//! `cpf_digitos` (ver [`digitos_identidade`]) e as consultas comparam essa
//! coluna, nunca o texto bruto de `cpf`.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::Ficha;

/// CPF desconhecido depois de removida a formatação
pub const CPF_SENTINELA: &str = "00000000000";

/// CPF gravado quando a gestante não informa o documento
pub const CPF_DESCONHECIDO: &str = "000.000.000-00";

/// Dígitos do CPF, ou `None` se vazio ou sentinela
pub fn normalizar_cpf(cpf: &str) -> Option<String> {
    let digitos: String = cpf.chars().filter(char::is_ascii_digit).collect();
    if digitos.is_empty() || digitos == CPF_SENTINELA {
        None
    } else {
        Some(digitos)
    }
}

/// Valor da coluna `cpf_digitos`: os dígitos do CPF, ou vazio quando desconhecido
pub fn digitos_identidade(cpf: &str) -> String {
    normalizar_cpf(cpf).unwrap_or_default()
}

/// Chave que identifica uma gestante
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum ChaveGestante {
    Cpf(String),
    NomeNascimento { nome: String, data_nasc: String },
}

impl ChaveGestante {
    pub fn de(cpf: &str, nome: &str, data_nasc: &str) -> Self {
        match normalizar_cpf(cpf) {
            Some(digitos) => ChaveGestante::Cpf(digitos),
            None => ChaveGestante::NomeNascimento {
                nome: nome.to_string(),
                data_nasc: data_nasc.to_string(),
            },
        }
    }

    pub fn da_ficha(ficha: &Ficha) -> Self {
        Self::de(&ficha.cpf, &ficha.nome_gestante, &ficha.data_nasc)
    }
}

/// Fichas de uma mesma gestante, na ordem em que foram recebidas
#[derive(Debug, Clone)]
pub struct Gestante<'a> {
    pub chave: ChaveGestante,
    pub fichas: Vec<&'a Ficha>,
}

impl<'a> Gestante<'a> {
    /// Ficha ativa de maior `id`; `None` se nenhuma ficha estiver ativa
    pub fn representante_ativa(&self) -> Option<&'a Ficha> {
        self.fichas
            .iter()
            .copied()
            .filter(|f| f.ativa())
            .max_by_key(|f| f.id)
    }

    pub fn primeira(&self) -> Option<&'a Ficha> {
        self.fichas.first().copied()
    }
}

/// Agrupa as fichas por gestante, preservando a ordem da primeira aparição
pub fn agrupar(fichas: &[Ficha]) -> Vec<Gestante<'_>> {
    let mut posicoes: HashMap<ChaveGestante, usize> = HashMap::new();
    let mut grupos: Vec<Gestante<'_>> = Vec::new();

    for ficha in fichas {
        let chave = ficha.chave();
        match posicoes.get(&chave) {
            Some(&i) => grupos[i].fichas.push(ficha),
            None => {
                posicoes.insert(chave.clone(), grupos.len());
                grupos.push(Gestante {
                    chave,
                    fichas: vec![ficha],
                });
            }
        }
    }

    grupos
}

/// Uma ficha por gestante com ao menos uma ficha ativa
pub fn representantes_ativas(fichas: &[Ficha]) -> Vec<&Ficha> {
    agrupar(fichas)
        .iter()
        .filter_map(Gestante::representante_ativa)
        .collect()
}
