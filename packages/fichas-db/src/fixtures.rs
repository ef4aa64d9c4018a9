//! Utilitários de teste: banco temporário, usuários e fichas de exemplo

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

use crate::ciclo::CicloVida;
use crate::identidade::{digitos_identidade, CPF_DESCONHECIDO};
use crate::models::{ClassificacaoRisco, Ficha, Papel, TipoUsuario, Usuario};
use crate::multiselecao::MultiSelecao;
use crate::rotulos::CampoMultiplo;
use crate::{init_db_pool, DbConfig};

/// Banco SQLite migrado em um diretório temporário.
///
/// O `TempDir` precisa viver enquanto o pool for usado.
pub async fn banco_temporario() -> Result<(TempDir, SqlitePool)> {
    let dir = tempfile::tempdir()?;
    let config = DbConfig {
        db_path: dir.path().join("fichas.db").to_string_lossy().to_string(),
        max_connections: 2,
        busy_timeout_secs: 1,
    };
    let pool = init_db_pool(&config).await?;
    Ok((dir, pool))
}

/// Usuário em memória, sem passar pelo banco
pub fn usuario(id: i64, papel: Papel, municipio: &str) -> Usuario {
    Usuario {
        id,
        tipo: if papel == Papel::Apoio {
            TipoUsuario::Apoio
        } else {
            TipoUsuario::Usuario
        },
        nome: format!("Usuário {}", id),
        papel,
        is_admin: false,
        is_super_admin: false,
        municipio: Some(municipio.to_string()).filter(|m| !m.is_empty()),
        municipios_associados: Vec::new(),
        acesso_saude_indigena: false,
        pnar: false,
        servico_pnar: None,
        ativo: true,
    }
}

fn email_unico(nome: &str) -> String {
    let base: String = nome
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase();
    format!("{}.{}@fichas.test", base, Uuid::new_v4().simple())
}

/// Grava um profissional aprovado e ativo
pub async fn inserir_usuario(
    pool: &SqlitePool,
    nome: &str,
    papel: Papel,
    municipio: &str,
) -> Result<Usuario> {
    let id = sqlx::query(
        "INSERT INTO usuarios (nome, municipio, email, approved, ativo, role) VALUES (?, ?, ?, 1, 1, ?)",
    )
    .bind(nome)
    .bind(municipio)
    .bind(email_unico(nome))
    .bind(papel.to_string())
    .execute(pool)
    .await
    .with_context(|| format!("Falha ao inserir usuário {}", nome))?
    .last_insert_rowid();

    let mut u = usuario(id, papel, municipio);
    u.nome = nome.to_string();
    Ok(u)
}

pub async fn associar_municipio(pool: &SqlitePool, usuario_id: i64, municipio: &str) -> Result<()> {
    sqlx::query("INSERT INTO usuario_municipios (usuario_id, municipio) VALUES (?, ?)")
        .bind(usuario_id)
        .bind(municipio)
        .execute(pool)
        .await?;
    Ok(())
}

/// Grava um usuário de apoio e devolve o id
pub async fn inserir_apoio(
    pool: &SqlitePool,
    nome: &str,
    municipio: Option<&str>,
    acesso_saude_indigena: bool,
    pnar: bool,
    servico: Option<&str>,
) -> Result<i64> {
    let id = sqlx::query(
        "INSERT INTO usuarios_apoio (nome, email, municipio, acesso_saude_indigena, pnar, servico) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(nome)
    .bind(email_unico(nome))
    .bind(municipio)
    .bind(acesso_saude_indigena)
    .bind(pnar)
    .bind(servico)
    .execute(pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

/// Construtor de fichas para testes
#[derive(Debug, Clone)]
pub struct FichaBuilder {
    ficha: Ficha,
}

impl FichaBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            ficha: Ficha {
                id,
                codigo_ficha: format!("T{:07}", id),
                user_id: 1,
                profissional: Some("Enfermeira Teste".to_string()),
                nome_gestante: "Maria da Silva".to_string(),
                data_nasc: "01/02/1990".to_string(),
                cpf: CPF_DESCONHECIDO.to_string(),
                telefone: "(83) 99999-0000".to_string(),
                municipio: "João Pessoa".to_string(),
                ubs: "UBS Centro".to_string(),
                acs: "ACS Joana".to_string(),
                periodo_gestacional: "1º trimestre".to_string(),
                data_envio: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default(),
                pontuacao_total: 0,
                classificacao_risco: "Risco Habitual".to_string(),
                imc: None,
                caracteristicas: MultiSelecao::default(),
                avaliacao_nutricional: MultiSelecao::default(),
                comorbidades: MultiSelecao::default(),
                historia_obstetrica: MultiSelecao::default(),
                condicoes_gestacionais: MultiSelecao::default(),
                deficiencia: "Não".to_string(),
                genero: "mulher_cisgenero".to_string(),
                sexualidade: "heterossexual".to_string(),
                raca_cor_etnia: "parda".to_string(),
                etnia_indigena: String::new(),
                ciclo: CicloVida::default(),
            },
        }
    }

    pub fn cpf(mut self, cpf: &str) -> Self {
        self.ficha.cpf = cpf.to_string();
        self
    }

    pub fn nome(mut self, nome: &str) -> Self {
        self.ficha.nome_gestante = nome.to_string();
        self
    }

    pub fn data_nasc(mut self, data: &str) -> Self {
        self.ficha.data_nasc = data.to_string();
        self
    }

    pub fn municipio(mut self, municipio: &str) -> Self {
        self.ficha.municipio = municipio.to_string();
        self
    }

    pub fn periodo(mut self, periodo: &str) -> Self {
        self.ficha.periodo_gestacional = periodo.to_string();
        self
    }

    pub fn user_id(mut self, user_id: i64) -> Self {
        self.ficha.user_id = user_id;
        self
    }

    pub fn data_envio(mut self, data: NaiveDate) -> Self {
        self.ficha.data_envio = data;
        self
    }

    pub fn pontuacao(mut self, pontos: i64) -> Self {
        self.ficha.pontuacao_total = pontos;
        self
    }

    pub fn classificacao(mut self, classificacao: &str) -> Self {
        self.ficha.classificacao_risco = classificacao.to_string();
        self
    }

    pub fn raca(mut self, raca: &str) -> Self {
        self.ficha.raca_cor_etnia = raca.to_string();
        self
    }

    pub fn etnia(mut self, etnia: &str) -> Self {
        self.ficha.etnia_indigena = etnia.to_string();
        self
    }

    pub fn genero(mut self, genero: &str) -> Self {
        self.ficha.genero = genero.to_string();
        self
    }

    pub fn sexualidade(mut self, sexualidade: &str) -> Self {
        self.ficha.sexualidade = sexualidade.to_string();
        self
    }

    pub fn deficiencia(mut self, deficiencia: &str) -> Self {
        self.ficha.deficiencia = deficiencia.to_string();
        self
    }

    pub fn imc(mut self, imc: &str) -> Self {
        self.ficha.imc = Some(imc.to_string());
        self
    }

    pub fn multiplo(mut self, campo: CampoMultiplo, codigos: &[&str]) -> Self {
        let valor: MultiSelecao = codigos.iter().map(|c| c.to_string()).collect();
        match campo {
            CampoMultiplo::Caracteristicas => self.ficha.caracteristicas = valor,
            CampoMultiplo::AvaliacaoNutricional => self.ficha.avaliacao_nutricional = valor,
            CampoMultiplo::Comorbidades => self.ficha.comorbidades = valor,
            CampoMultiplo::HistoriaObstetrica => self.ficha.historia_obstetrica = valor,
            CampoMultiplo::CondicoesGestacionais => self.ficha.condicoes_gestacionais = valor,
        }
        self
    }

    pub fn desfecho(mut self, codigo: &str) -> Self {
        self.ficha.ciclo.desfecho = Some(codigo.to_string());
        self.ficha.ciclo.data_desfecho = Some("01/06/2025 10:00:00".to_string());
        self
    }

    pub fn fora_area(mut self) -> Self {
        self.ficha.ciclo.fora_area = true;
        self
    }

    pub fn pnar(mut self, ambulatorio: &str) -> Self {
        self.ficha.ciclo.pnar_sinalizado = true;
        self.ficha.ciclo.pnar_ambulatorio = Some(ambulatorio.to_string());
        self.ficha.ciclo.pnar_data_registro = Some("2025-02-01 09:00:00".to_string());
        self
    }

    pub fn compartilhada(mut self) -> Self {
        self.ficha.ciclo.pdf_compartilhado_municipal = true;
        self
    }

    pub fn build(self) -> Ficha {
        self.ficha
    }
}

/// Grava a ficha do construtor com um código novo e a devolve como lida do banco.
///
/// Classificações reconhecidas são gravadas com o rótulo canônico, como faz
/// `inserir_ficha`; as demais ficam como vieram.
pub async fn inserir_ficha_teste(pool: &SqlitePool, builder: FichaBuilder) -> Result<Ficha> {
    let f = builder.build();
    let codigo = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    let classificacao = ClassificacaoRisco::canonicalizar(&f.classificacao_risco)
        .map(|c| c.rotulo().to_string())
        .unwrap_or_else(|| f.classificacao_risco.clone());

    sqlx::query(
        r#"
        INSERT INTO calculos (
            user_id, codigo_ficha, nome_gestante, data_nasc, cpf, cpf_digitos, telefone, municipio, ubs, acs,
            periodo_gestacional, data_envio, pontuacao_total, classificacao_risco, imc,
            caracteristicas, avaliacao_nutricional, comorbidades, historia_obstetrica,
            condicoes_gestacionais, profissional, deficiencia, genero, sexualidade,
            raca_cor_etnia, etnia_indigena, desfecho, data_desfecho, fa,
            pdf_compartilhado_municipal, pnar_sinalizado, pnar_ambulatorio, pnar_data_registro
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(f.user_id)
    .bind(&codigo)
    .bind(&f.nome_gestante)
    .bind(&f.data_nasc)
    .bind(&f.cpf)
    .bind(digitos_identidade(&f.cpf))
    .bind(&f.telefone)
    .bind(&f.municipio)
    .bind(&f.ubs)
    .bind(&f.acs)
    .bind(&f.periodo_gestacional)
    .bind(f.data_envio)
    .bind(f.pontuacao_total)
    .bind(&classificacao)
    .bind(&f.imc)
    .bind(f.caracteristicas.to_json())
    .bind(f.avaliacao_nutricional.to_json())
    .bind(f.comorbidades.to_json())
    .bind(f.historia_obstetrica.to_json())
    .bind(f.condicoes_gestacionais.to_json())
    .bind(&f.profissional)
    .bind(&f.deficiencia)
    .bind(&f.genero)
    .bind(&f.sexualidade)
    .bind(&f.raca_cor_etnia)
    .bind(&f.etnia_indigena)
    .bind(&f.ciclo.desfecho)
    .bind(&f.ciclo.data_desfecho)
    .bind(f.ciclo.fora_area)
    .bind(f.ciclo.pdf_compartilhado_municipal)
    .bind(f.ciclo.pnar_sinalizado)
    .bind(&f.ciclo.pnar_ambulatorio)
    .bind(&f.ciclo.pnar_data_registro)
    .execute(pool)
    .await
    .context("Falha ao inserir ficha de teste")?;

    let ficha = sqlx::query_as::<_, Ficha>("SELECT * FROM calculos WHERE codigo_ficha = ?")
        .bind(&codigo)
        .fetch_one(pool)
        .await?;
    Ok(ficha)
}
