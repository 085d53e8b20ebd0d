//! Kabbalistic letter table and the digit-sum reduction shared by every
//! analyzer.

/// Numbers that stop a reduction as soon as they appear.
pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

/// A letter after accent folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldedLetter {
    /// Uppercase ASCII base letter.
    pub base: char,
    /// Whether the original carried a diacritic (Ç counts).
    pub accented: bool,
}

impl FoldedLetter {
    pub fn is_vowel(&self) -> bool {
        matches!(self.base, 'A' | 'E' | 'I' | 'O' | 'U')
    }

    pub fn is_consonant(&self) -> bool {
        !self.is_vowel()
    }

    pub fn value(&self) -> u32 {
        table_value(self.base)
    }
}

fn table_value(base: char) -> u32 {
    match base {
        'A' | 'J' | 'S' => 1,
        'B' | 'K' | 'T' => 2,
        'C' | 'L' | 'U' => 3,
        'D' | 'M' | 'V' => 4,
        'E' | 'N' | 'W' => 5,
        'F' | 'O' | 'X' => 6,
        'G' | 'P' | 'Y' => 7,
        'H' | 'Q' | 'Z' => 8,
        'I' | 'R' => 9,
        _ => 0,
    }
}

/// Maps a character to its base letter. Returns `None` for anything that
/// is not an A–Z letter, with or without a Latin diacritic.
pub fn fold_letter(c: char) -> Option<FoldedLetter> {
    if c.is_ascii_alphabetic() {
        return Some(FoldedLetter {
            base: c.to_ascii_uppercase(),
            accented: false,
        });
    }

    let base = match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' | 'Ç' => 'C',
        'ñ' | 'Ñ' => 'N',
        'ý' | 'ÿ' | 'Ý' => 'Y',
        _ => return None,
    };

    Some(FoldedLetter {
        base,
        accented: true,
    })
}

/// Table value of a letter, accents ignored.
pub fn letter_value(c: char) -> Option<u32> {
    fold_letter(c).map(|letter| letter.value())
}

/// Lowercase ASCII rendition of `text` with diacritics removed. Characters
/// outside the folding table are kept as they are.
pub fn strip_accents(text: &str) -> String {
    text.chars()
        .map(|c| match fold_letter(c) {
            Some(letter) if letter.accented => letter.base.to_ascii_lowercase(),
            _ => c.to_ascii_lowercase(),
        })
        .collect()
}

pub fn is_master(n: u32) -> bool {
    MASTER_NUMBERS.contains(&n)
}

pub fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Reduces to a single digit, stopping at 11, 22 or 33.
pub fn reduce(sum: u32) -> u32 {
    reduce_with(sum, true)
}

pub fn reduce_with(mut sum: u32, allow_master: bool) -> u32 {
    while sum > 9 && !(allow_master && is_master(sum)) {
        sum = digit_sum(sum);
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_letter() {
        let expected = [
            1, 2, 3, 4, 5, 6, 7, 8, 9, // A..I
            1, 2, 3, 4, 5, 6, 7, 8, 9, // J..R
            1, 2, 3, 4, 5, 6, 7, 8, // S..Z
        ];
        for (c, value) in ('A'..='Z').zip(expected) {
            assert_eq!(letter_value(c), Some(value), "letter {}", c);
            assert_eq!(letter_value(c.to_ascii_lowercase()), Some(value));
        }
    }

    #[test]
    fn test_non_letters_have_no_value() {
        for c in ['0', '7', ' ', '-', '\'', '.', '!'] {
            assert_eq!(letter_value(c), None);
        }
    }

    #[test]
    fn test_accented_letters_fold_to_base() {
        assert_eq!(letter_value('é'), letter_value('E'));
        assert_eq!(letter_value('Ã'), letter_value('A'));
        assert_eq!(letter_value('ç'), Some(3));

        let folded = fold_letter('õ').unwrap();
        assert_eq!(folded.base, 'O');
        assert!(folded.accented);
        assert!(folded.is_vowel());

        let cedilla = fold_letter('Ç').unwrap();
        assert!(cedilla.accented);
        assert!(cedilla.is_consonant());
    }

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents("Número_Motivação"), "numero_motivacao");
        assert_eq!(strip_accents("Harmonia-Conjugal"), "harmonia-conjugal");
    }

    #[test]
    fn test_reduce_keeps_single_digits() {
        for n in 0..=9 {
            assert_eq!(reduce(n), n);
        }
    }

    #[test]
    fn test_reduce_preserves_master_numbers() {
        assert_eq!(reduce(11), 11);
        assert_eq!(reduce(22), 22);
        assert_eq!(reduce(33), 33);
        // 38 -> 11 stops there
        assert_eq!(reduce(38), 11);
        assert_eq!(reduce(29), 11);
        // 2009 -> 11
        assert_eq!(reduce(2009), 11);
        // 679 -> 22
        assert_eq!(reduce(679), 22);
    }

    #[test]
    fn test_reduce_without_masters() {
        assert_eq!(reduce_with(11, false), 2);
        assert_eq!(reduce_with(38, false), 2);
        assert_eq!(reduce_with(33, false), 6);
    }

    #[test]
    fn test_reduce_range_and_idempotence() {
        for n in 1..5000 {
            let r = reduce(n);
            assert!((1..=9).contains(&r) || is_master(r), "reduce({}) = {}", n, r);
            assert_eq!(reduce(r), r);
        }
    }

    #[test]
    fn test_plain_reductions() {
        assert_eq!(reduce(41), 5);
        assert_eq!(reduce(1990), 1);
        assert_eq!(reduce(99), 9);
    }
}
