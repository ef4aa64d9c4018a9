//! Dicionários código → rótulo dos campos do formulário
//!
//! Reproduzidos tal como o formulário os envia, inclusive as chaves
//! duplicadas com grafias diferentes.

pub(crate) const GENERO: &[(&str, &str)] = &[
    ("mulher_cisgenero", "Mulher Cisgênero"),
    ("homem_trans", "Homem Trans"),
    ("pessoa_nao_binaria", "Pessoa Não-Binária"),
    ("outro", "Outro"),
    ("nao_informado", "Não Informado"),
];

pub(crate) const SEXUALIDADE: &[(&str, &str)] = &[
    ("heterossexual", "Heterossexual"),
    ("homossexual", "Homossexual"),
    ("bissexual", "Bissexual"),
    ("outro", "Outro"),
    ("nao_informado", "Não Informado"),
];

pub(crate) const RACA_COR_ETNIA: &[(&str, &str)] = &[
    ("branca", "Branca"),
    ("preta", "Preta"),
    ("parda", "Parda"),
    ("amarela", "Amarela"),
    ("indigena", "Indígena"),
    ("indígena", "Indígena"),
    ("indigena ", "Indígena"),
    ("", "Não informado"),
];

pub(crate) const DEFICIENCIA: &[(&str, &str)] = &[
    ("Sim", "Sim"),
    ("Não", "Não"),
    ("Não informado", "Não informado"),
    ("nao_informado", "Não informado"),
];

pub(crate) const CARACTERISTICAS: &[(&str, &str)] = &[
    ("15anos", "≤ 15 anos"),
    ("40anos", "≥ 40 anos"),
    ("nao_aceita_gravidez", "Não aceitação da gravidez"),
    ("violencia_domestica", "Indícios de Violência Doméstica"),
    ("rua_indigena_quilombola", "Situação de rua / indígena ou quilombola"),
    ("sem_escolaridade", "Sem escolaridade"),
    ("tabagista_ativo", "Tabagista ativo"),
    ("raca_negra", "Raça negra"),
    ("situacao_rua", "Situação de Rua"),
    ("quilombola", "Quilombola"),
    ("indigena", "Indígena"),
];

pub(crate) const AVALIACAO_NUTRICIONAL: &[(&str, &str)] = &[
    ("baixo_peso", "Baixo Peso (IMC < 18.5)"),
    ("sobrepeso", "Sobrepeso (IMC 25-29.9)"),
    ("obesidade1", "Obesidade Grau I e II (IMC 30-39.9)"),
    ("obesidade_morbida", "Obesidade Mórbida (IMC ≥ 40)"),
];

pub(crate) const COMORBIDADES: &[(&str, &str)] = &[
    ("aids_hiv", "AIDS/HIV"),
    ("alteracoes_tireoide", "Alterações da tireoide (hipotireoidismo sem controle e hipertireoidismo)"),
    ("diabetes_mellitus", "Diabetes Mellitus"),
    ("endocrinopatias", "Endocrinopatias sem controle"),
    ("cardiopatia", "Cardiopatia diagnosticada"),
    ("cancer", "Câncer Diagnosticado"),
    ("cirurgia_bariatrica", "Cirurgia Bariátrica há menos de 1 ano"),
    ("doencas_autoimunes", "Doenças Autoimunes (colagenoses)"),
    ("doencas_psiquiatricas", "Doenças Psiquiátricas (Encaminhar ao CAPS)"),
    ("doenca_renal", "Doença Renal Grave"),
    ("dependencia_drogas", "Dependência de Drogas (Encaminhar ao CAPS)"),
    ("epilepsia", "Epilepsia e doenças neurológicas graves de difícil controle"),
    ("hepatites", "Hepatites (encaminhar ao infectologista)"),
    ("has_controlada", "HAS crônica controlada (Sem hipotensor e exames normais)"),
    ("has_complicada", "HAS crônica complicada"),
    ("ginecopatia", "Ginecopatia (Miomatose ≥ 7cm, malformação uterina, massa anexial ≥ 8cm ou com características complexas)"),
    ("pneumopatia", "Pneumopatia grave de difícil controle"),
    ("tuberculose", "Tuberculose em tratamento ou com diagnóstico na gestação (Encaminhar ao Pneumologista)"),
    ("trombofilia", "Trombofilia ou Tromboembolia"),
    ("teratogenico", "Uso de medicações com potencial efeito teratogênico"),
    ("varizes", "Varizes acentuadas"),
    ("doencas_hematologicas", "Doenças hematológicas (PTI, Anemia Falciforme, PTT, Coagulopatias, Talassemias)"),
    ("transplantada", "Transplantada em uso de imunossupressor"),
];

pub(crate) const HISTORIA_OBSTETRICA: &[(&str, &str)] = &[
    ("abortamentos", "2 abortamentos espontâneos consecutivos ou 3 não consecutivos (confirmados clínico/laboratorial)"),
    ("abortamentos_consecutivos", "3 ou mais abortamentos espontâneos consecutivos"),
    ("prematuros", "Mais de um Prematuro com menos de 36 semanas"),
    ("obito_fetal", "Óbito Fetal sem causa determinada"),
    ("preeclampsia", "Pré-eclâmpsia ou Pré-eclâmpsia superposta"),
    ("eclampsia", "Eclâmpsia"),
    ("hipertensao_gestacional", "Hipertensão Gestacional"),
    ("acretismo", "Acretismo placentário"),
    ("descolamento_placenta", "Descolamento prematuro de placenta"),
    ("insuficiencia_istmo", "Insuficiência Istmo Cervical"),
    ("restricao_crescimento", "Restrição de Crescimento Intrauterino"),
    ("malformacao_fetal", "História de malformação Fetal complexa"),
    ("isoimunizacao", "Isoimunização em gestação anterior"),
    ("diabetes_gestacional", "Diabetes gestacional"),
    ("psicose_puerperal", "Psicose Puerperal"),
    ("tromboembolia", "História de tromboembolia"),
];

pub(crate) const CONDICOES_GESTACIONAIS: &[(&str, &str)] = &[
    ("ameaca_aborto", "Ameaça de aborto - Encaminhar URGÊNCIA"),
    ("acretismo_placentario_atual", "Acretismo Placentário"),
    ("placenta_previa", "Placenta Pós"),
    ("anemia_grave", "Anemia não responsiva à tratamento (Hb≤8) e hemopatia"),
    ("citologia_anormal", "Citologia Cervical anormal (LIEAG) – Encaminhar para PTGI"),
    ("tireoide_gestacao", "Doenças da tireoide diagnosticada na gestação"),
    ("diabetes_gestacional_atual", "Diabetes gestacional"),
    ("doenca_hipertensiva", "Doença Hipertensiva na Gestação (Pré-eclâmpsia, Hipertensão gestacional e Pré-eclâmpsia superada)"),
    ("doppler_anormal", "Alteração no doppler das Artérias uterinas (aumento da resistência) e/ou alto risco para Pré-eclâmpsia"),
    ("doenca_hemolitica", "Doença Hemolítica"),
    ("gemelar", "Gemelar"),
    ("isoimunizacao_rh", "Isoimunizacao Rh"),
    ("insuficiencia_istmo_atual", "Insuficiência Istmo cervical"),
    ("colo_curto", "Colo curto no morfológico 2T"),
    ("malformacao_congenita", "Malformação Congênita Fetal"),
    ("neoplasia_cancer", "Neoplasia ginecológica ou Câncer diagnosticado na gestação"),
    ("polidramnio_oligodramnio", "Polidrâmnio/Oligodrâmnio"),
    ("restricao_crescimento", "Restrição de crescimento fetal Intrauterino"),
    ("toxoplasmose", "Toxoplasmose"),
    ("sifilis_complicada", "Sífilis terciária, Alterações ultrassom sugestivas de sífilis neonatal ou resistência ao tratamento com Penicilina Benzatina"),
    ("infeccao_urinaria_repeticao", "Infecção Urinária de repetição (pielonefrite ou ITU≥3x)"),
    ("hiv_htlv_hepatites", "HIV, HTLV ou Hepatites Agudas"),
    ("condilomacao_acuminado", "Condiloma acuminado (no canal vaginal/colo ou lesões extensas em região genital/perianal)"),
    ("feto_percentil", "Feto com percentil > P90 (GIG) ou entre P3-10 (PIG), com doppler normal"),
    ("hepatopatias", "Hepatopatias (colestase ou aumento das transaminases)"),
    ("hanseníase", "Hanseníase diagnosticada na gestação"),
    ("tuberculose_gestacao", "Tuberculose diagnosticada na gestação"),
    ("dependencia_drogas_atual", "Dependência e/ou uso abusivo de drogas lícitas e ilícitas"),
];

pub(crate) const DESFECHO: &[(&str, &str)] = &[
    ("A96", "Morte"),
    ("W82", "Aborto espontâneo"),
    ("W83", "Aborto provocado"),
    ("W90", "Parto sem complicações de nascido vivo"),
    ("W91", "Parto sem complicações de natimorto"),
    ("W92", "Parto com complicações de nascido vivo"),
    ("W93", "Parto com complicações de natimorto"),
    ("", "Não informado"),
];
