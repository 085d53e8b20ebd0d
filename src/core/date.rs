//! Birth-date numbers: destino, life cycles, challenges and the personal
//! year/month/day for a reference date.

use crate::core::letters::{digit_sum, reduce, reduce_with};
use crate::domain::model::{CiclosPessoais, CiclosVida, DateNumbers, Desafios};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateParts {
    day: u32,
    month: u32,
    year: u32,
}

impl From<NaiveDate> for DateParts {
    fn from(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year().unsigned_abs(),
        }
    }
}

/// reduce(day) + reduce(month) + reduce(digits of year), reduced again.
pub fn destiny_number(birth: NaiveDate) -> u32 {
    let parts = DateParts::from(birth);
    reduce(reduce(parts.day) + reduce(parts.month) + reduce(digit_sum(parts.year)))
}

pub fn life_cycles(birth: NaiveDate) -> CiclosVida {
    let parts = DateParts::from(birth);
    CiclosVida {
        primeiro: reduce(parts.month),
        segundo: reduce(parts.day),
        terceiro: reduce(parts.year),
    }
}

/// Challenges work on plain single digits; master numbers are not kept.
pub fn challenges(birth: NaiveDate) -> Desafios {
    let parts = DateParts::from(birth);
    let day = reduce_with(parts.day, false);
    let month = reduce_with(parts.month, false);
    let year = reduce_with(parts.year, false);

    let primeiro = month.abs_diff(day);
    let segundo = year.abs_diff(day);
    Desafios {
        primeiro,
        segundo,
        principal: primeiro.abs_diff(segundo),
    }
}

pub fn analyze_birth_date(birth: NaiveDate) -> DateNumbers {
    DateNumbers {
        destino: destiny_number(birth),
        ciclos_vida: life_cycles(birth),
        desafios: challenges(birth),
    }
}

pub fn personal_year(birth: NaiveDate, reference: NaiveDate) -> u32 {
    let birth = DateParts::from(birth);
    let reference = DateParts::from(reference);
    reduce(birth.day + birth.month + reference.year)
}

pub fn personal_cycles(birth: NaiveDate, reference: NaiveDate) -> CiclosPessoais {
    let ano_pessoal = personal_year(birth, reference);
    let mes_pessoal = reduce(ano_pessoal + reference.month());
    let dia_pessoal = reduce(mes_pessoal + reference.day());

    CiclosPessoais {
        referencia: reference,
        ano_pessoal,
        mes_pessoal,
        dia_pessoal,
    }
}
