use crate::core::date::{analyze_birth_date, personal_cycles};
use crate::core::letters::reduce;
use crate::core::name::{analyze_name, audit_name, DEFAULT_PROFILE};
use crate::domain::model::{AuditLog, MapaNumerologico, NameAttribute};
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Builds the full map for `nome` born on `nascimento`. Personal cycles are
/// only filled in when a `referencia` date is given.
pub fn gerar_mapa_numerologico(
    nome: &str,
    nascimento: NaiveDate,
    referencia: Option<NaiveDate>,
) -> Result<MapaNumerologico> {
    let name = analyze_name(nome)?;
    let date = analyze_birth_date(nascimento);

    let expressao = name.expressao.reduced;
    let destino = date.destino;

    Ok(MapaNumerologico {
        nome: nome.trim().to_string(),
        data_nascimento: nascimento,
        motivacao: name.motivacao.reduced,
        impressao: name.impressao.reduced,
        expressao,
        destino,
        missao: reduce(destino + expressao),
        ciclos_vida: date.ciclos_vida,
        desafios: date.desafios,
        ciclos_pessoais: referencia.map(|reference| personal_cycles(nascimento, reference)),
    })
}

/// Same map plus one audit log per name attribute.
pub fn gerar_mapa_com_auditoria(
    nome: &str,
    nascimento: NaiveDate,
    referencia: Option<NaiveDate>,
    profile: Option<&str>,
) -> Result<(MapaNumerologico, Vec<AuditLog>)> {
    let mapa = gerar_mapa_numerologico(nome, nascimento, referencia)?;
    let profile = profile.unwrap_or(DEFAULT_PROFILE);

    let audits = NameAttribute::ALL
        .iter()
        .map(|attribute| audit_name(nome, *attribute, profile))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        "🗺️ Map built for '{}' with {} audit logs",
        mapa.nome,
        audits.len()
    );

    Ok((mapa, audits))
}
