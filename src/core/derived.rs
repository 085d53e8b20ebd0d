//! Vibration of addresses, plates and phone numbers, and compatibility
//! scores between numbers or whole maps.

use crate::core::letters::{fold_letter, reduce};
use crate::domain::model::MapaNumerologico;
use crate::utils::error::{NumerologiaError, Result};
use serde::{Deserialize, Serialize};

/// Lowest score any compatibility comparison reports.
pub const COMPATIBILITY_FLOOR: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivedKind {
    Endereco,
    Placa,
    Telefone,
}

impl DerivedKind {
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Endereco => "endereco",
            Self::Placa => "placa",
            Self::Telefone => "telefone",
        }
    }
}

impl std::str::FromStr for DerivedKind {
    type Err = NumerologiaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "endereco" | "endereço" | "address" => Ok(Self::Endereco),
            "placa" | "plate" => Ok(Self::Placa),
            "telefone" | "phone" => Ok(Self::Telefone),
            other => Err(NumerologiaError::invalid_input(format!(
                "unknown vibration kind '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vibration {
    pub raw_sum: u32,
    pub reduced: u32,
}

/// Letters count by table value without accent bonus; digits count by face value.
pub fn string_vibration(text: &str) -> Result<Vibration> {
    let mut raw_sum = 0;
    let mut counted = 0usize;

    for c in text.chars() {
        if let Some(digit) = c.to_digit(10) {
            raw_sum += digit;
            counted += 1;
        } else if let Some(letter) = fold_letter(c) {
            raw_sum += letter.value();
            counted += 1;
        }
    }

    if counted == 0 {
        return Err(NumerologiaError::invalid_input(format!(
            "'{}' has no letters or digits",
            text
        )));
    }

    Ok(Vibration {
        raw_sum,
        reduced: reduce(raw_sum),
    })
}

pub fn compatibility_score(a: u32, b: u32) -> i64 {
    let distance = i64::from(a.abs_diff(b));
    (100 - distance * 15).max(COMPATIBILITY_FLOOR)
}

/// Mean of expressão, destino and motivação closeness, rounded.
pub fn map_compatibility(first: &MapaNumerologico, second: &MapaNumerologico) -> i64 {
    let pairs = [
        (first.expressao, second.expressao),
        (first.destino, second.destino),
        (first.motivacao, second.motivacao),
    ];
    let total: i64 = pairs
        .iter()
        .map(|(a, b)| 100 - i64::from(a.abs_diff(*b)) * 10)
        .sum();

    let average = (total as f64 / pairs.len() as f64).round() as i64;
    average.max(COMPATIBILITY_FLOOR)
}
