use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which whole-name number an analysis produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameAttribute {
    Motivacao,
    Impressao,
    Expressao,
}

impl NameAttribute {
    pub const ALL: [NameAttribute; 3] = [Self::Motivacao, Self::Impressao, Self::Expressao];

    /// Display name used in audit logs.
    pub fn operation_name(&self) -> &'static str {
        match self {
            Self::Motivacao => "Motivação",
            Self::Impressao => "Impressão",
            Self::Expressao => "Expressão",
        }
    }

    pub fn topic(&self) -> &'static str {
        match self {
            Self::Motivacao => "motivacao",
            Self::Impressao => "impressao",
            Self::Expressao => "expressao",
        }
    }
}

/// Totals for one attribute before and after reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSum {
    pub raw_sum: u32,
    pub accented_vowels: u32,
    pub accent_bonus: u32,
    pub reduced: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameNumbers {
    pub motivacao: NameSum,
    pub impressao: NameSum,
    pub expressao: NameSum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiclosVida {
    pub primeiro: u32,
    pub segundo: u32,
    pub terceiro: u32,
}

/// Challenge numbers, 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Desafios {
    pub primeiro: u32,
    pub segundo: u32,
    pub principal: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateNumbers {
    pub destino: u32,
    pub ciclos_vida: CiclosVida,
    pub desafios: Desafios,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiclosPessoais {
    pub referencia: NaiveDate,
    pub ano_pessoal: u32,
    pub mes_pessoal: u32,
    pub dia_pessoal: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapaNumerologico {
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub motivacao: u32,
    pub impressao: u32,
    pub expressao: u32,
    pub destino: u32,
    pub missao: u32,
    pub ciclos_vida: CiclosVida,
    pub desafios: Desafios,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ciclos_pessoais: Option<CiclosPessoais>,
}

/// One letter as seen by a reduction step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterTrace {
    pub character: char,
    pub value: u32,
    pub is_vowel: bool,
    pub is_consonant: bool,
    /// Accent bonus added on top of `value`.
    pub bonus: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    pub token: String,
    pub letters: Vec<LetterTrace>,
    pub raw_sum: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_sum: Option<u32>,
    pub accented_vowels: u32,
    pub accent_bonus: u32,
    /// True only for the step whose sum feeds the final result.
    pub contributing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub operation: String,
    pub input: String,
    pub profile: String,
    pub result: u32,
    pub total_accented_vowels: u32,
    pub total_accent_bonus: u32,
    pub total_sum: u32,
    pub steps: Vec<AuditStep>,
}

impl AuditLog {
    pub fn contributing_step(&self) -> Option<&AuditStep> {
        self.steps.iter().find(|step| step.contributing)
    }
}
