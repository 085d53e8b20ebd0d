//! Whole-name numbers: motivação (vowels), impressão (consonants) and
//! expressão (all letters).
//!
//! The numeric path ([`analyze_name`], [`name_sum`]) and the audit path
//! ([`audit_name`]) are separate entry points over the same letter rules;
//! the audit is never consulted to produce a number.

use crate::core::letters::{fold_letter, reduce, FoldedLetter};
use crate::domain::model::{AuditLog, AuditStep, LetterTrace, NameAttribute, NameNumbers, NameSum};
use crate::utils::error::{NumerologiaError, Result};

/// Added to an accented vowel's table value.
pub const ACCENT_BONUS: u32 = 1;

pub const DEFAULT_PROFILE: &str = "cabalistico";

fn counts_for(attribute: NameAttribute, letter: &FoldedLetter) -> bool {
    match attribute {
        NameAttribute::Motivacao => letter.is_vowel(),
        NameAttribute::Impressao => letter.is_consonant(),
        NameAttribute::Expressao => true,
    }
}

fn bonus_for(attribute: NameAttribute, letter: &FoldedLetter) -> u32 {
    if attribute != NameAttribute::Impressao && letter.is_vowel() && letter.accented {
        ACCENT_BONUS
    } else {
        0
    }
}

fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|word| word.chars().any(|c| fold_letter(c).is_some()))
}

fn ensure_letters(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(NumerologiaError::invalid_input("name cannot be empty"));
    }
    if !name.chars().any(|c| fold_letter(c).is_some()) {
        return Err(NumerologiaError::invalid_input(format!(
            "name '{}' has no letters",
            name
        )));
    }
    Ok(())
}

#[derive(Default)]
struct Tally {
    raw_sum: u32,
    accented_vowels: u32,
    accent_bonus: u32,
}

impl Tally {
    fn add(&mut self, attribute: NameAttribute, letter: &FoldedLetter) {
        if !counts_for(attribute, letter) {
            return;
        }
        let bonus = bonus_for(attribute, letter);
        self.raw_sum += letter.value() + bonus;
        if bonus > 0 {
            self.accented_vowels += 1;
            self.accent_bonus += bonus;
        }
    }

    fn finish(self) -> NameSum {
        NameSum {
            raw_sum: self.raw_sum,
            accented_vowels: self.accented_vowels,
            accent_bonus: self.accent_bonus,
            reduced: reduce(self.raw_sum),
        }
    }
}

/// Sum for one attribute over the whole name, reduced once at the end.
pub fn name_sum(name: &str, attribute: NameAttribute) -> Result<NameSum> {
    ensure_letters(name)?;

    let mut tally = Tally::default();
    for letter in name.chars().filter_map(fold_letter) {
        tally.add(attribute, &letter);
    }
    Ok(tally.finish())
}

pub fn analyze_name(name: &str) -> Result<NameNumbers> {
    ensure_letters(name)?;

    let mut motivacao = Tally::default();
    let mut impressao = Tally::default();
    let mut expressao = Tally::default();
    for letter in name.chars().filter_map(fold_letter) {
        motivacao.add(NameAttribute::Motivacao, &letter);
        impressao.add(NameAttribute::Impressao, &letter);
        expressao.add(NameAttribute::Expressao, &letter);
    }

    Ok(NameNumbers {
        motivacao: motivacao.finish(),
        impressao: impressao.finish(),
        expressao: expressao.finish(),
    })
}

fn trace_token(token: &str, attribute: NameAttribute, contributing: bool) -> AuditStep {
    let mut letters = Vec::new();
    let mut tally = Tally::default();

    for c in token.chars() {
        let Some(letter) = fold_letter(c) else {
            continue;
        };
        if !counts_for(attribute, &letter) {
            continue;
        }
        letters.push(LetterTrace {
            character: c,
            value: letter.value(),
            is_vowel: letter.is_vowel(),
            is_consonant: letter.is_consonant(),
            bonus: bonus_for(attribute, &letter),
        });
        tally.add(attribute, &letter);
    }

    let reduced = reduce(tally.raw_sum);
    AuditStep {
        token: token.to_string(),
        letters,
        raw_sum: tally.raw_sum,
        reduced_sum: (reduced != tally.raw_sum).then_some(reduced),
        accented_vowels: tally.accented_vowels,
        accent_bonus: tally.accent_bonus,
        contributing,
    }
}

/// Replays the computation of one attribute with a per-word breakdown.
///
/// Word steps are informational. The last step covers the whole name and
/// is the one marked `contributing`.
pub fn audit_name(name: &str, attribute: NameAttribute, profile: &str) -> Result<AuditLog> {
    let total = name_sum(name, attribute)?;

    let mut steps: Vec<AuditStep> = words(name)
        .map(|word| trace_token(word, attribute, false))
        .collect();
    steps.push(trace_token(name.trim(), attribute, true));

    tracing::debug!(
        "🔢 {} for '{}': raw {} -> {}",
        attribute.operation_name(),
        name,
        total.raw_sum,
        total.reduced
    );

    Ok(AuditLog {
        operation: attribute.operation_name().to_string(),
        input: name.to_string(),
        profile: profile.to_string(),
        result: total.reduced,
        total_accented_vowels: total.accented_vowels,
        total_accent_bonus: total.accent_bonus,
        total_sum: total.raw_sum,
        steps,
    })
}
