//! Category names and the `{category}_{NN}` topic-key convention.

use crate::core::letters::{is_master, strip_accents};
use std::collections::HashMap;

/// How interpretations for a topic treat 11, 22 and 33.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterPolicy {
    /// Stored texts exist for the master numbers.
    Accepts,
    /// The topic's numbers are never masters (e.g. challenges, 0..=8).
    Rejects,
    /// Nothing says whether master texts exist; lookups are logged.
    Ambiguous,
}

struct BuiltinTopic {
    canonical: &'static str,
    synonyms: &'static [&'static str],
    masters: MasterPolicy,
}

const BUILTIN_TOPICS: &[BuiltinTopic] = &[
    BuiltinTopic {
        canonical: "motivacao",
        synonyms: &["numero_motivacao", "numero_da_motivacao", "motivacao_numero"],
        masters: MasterPolicy::Accepts,
    },
    BuiltinTopic {
        canonical: "impressao",
        synonyms: &["numero_impressao", "numero_da_impressao", "impressao_numero"],
        masters: MasterPolicy::Accepts,
    },
    BuiltinTopic {
        canonical: "expressao",
        synonyms: &["numero_expressao", "numero_da_expressao", "expressao_numero"],
        masters: MasterPolicy::Accepts,
    },
    BuiltinTopic {
        canonical: "destino",
        synonyms: &["numero_destino", "numero_do_destino", "caminho_de_vida"],
        masters: MasterPolicy::Accepts,
    },
    BuiltinTopic {
        canonical: "missao",
        synonyms: &["numero_missao", "numero_da_missao"],
        masters: MasterPolicy::Accepts,
    },
    BuiltinTopic {
        canonical: "ciclo_vida",
        synonyms: &["ciclos_vida", "ciclo_de_vida", "ciclos_de_vida"],
        masters: MasterPolicy::Accepts,
    },
    BuiltinTopic {
        canonical: "desafio",
        synonyms: &["desafios"],
        masters: MasterPolicy::Rejects,
    },
    BuiltinTopic {
        canonical: "ano_pessoal",
        synonyms: &["numero_ano_pessoal"],
        masters: MasterPolicy::Ambiguous,
    },
    BuiltinTopic {
        canonical: "mes_pessoal",
        synonyms: &["numero_mes_pessoal"],
        masters: MasterPolicy::Ambiguous,
    },
    BuiltinTopic {
        canonical: "dia_pessoal",
        synonyms: &["numero_dia_pessoal"],
        masters: MasterPolicy::Ambiguous,
    },
    BuiltinTopic {
        canonical: "harmonia_conjugal",
        synonyms: &["harmonia"],
        masters: MasterPolicy::Ambiguous,
    },
    BuiltinTopic {
        canonical: "endereco",
        synonyms: &["numero_endereco", "vibracao_endereco"],
        masters: MasterPolicy::Ambiguous,
    },
    BuiltinTopic {
        canonical: "placa",
        synonyms: &["numero_placa", "vibracao_placa"],
        masters: MasterPolicy::Ambiguous,
    },
    BuiltinTopic {
        canonical: "telefone",
        synonyms: &["numero_telefone", "vibracao_telefone"],
        masters: MasterPolicy::Ambiguous,
    },
    BuiltinTopic {
        canonical: "cores",
        synonyms: &["cor", "cores_favoraveis"],
        masters: MasterPolicy::Ambiguous,
    },
    BuiltinTopic {
        canonical: "pedras",
        synonyms: &["pedra", "pedras_favoraveis"],
        masters: MasterPolicy::Ambiguous,
    },
];

/// Lowercase, accents stripped, whitespace and hyphens turned into `_`.
pub fn normalize_category(category: &str) -> String {
    let stripped = strip_accents(category.trim());
    let mut normalized = String::with_capacity(stripped.len());
    let mut last_was_separator = false;

    for c in stripped.chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            if !last_was_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            last_was_separator = true;
        } else {
            normalized.push(c);
            last_was_separator = false;
        }
    }

    while normalized.ends_with('_') {
        normalized.pop();
    }
    normalized
}

pub fn topic_key(canonical: &str, number: u32) -> String {
    format!("{}_{:02}", canonical, number)
}

/// Synonym table mapping category spellings to one canonical topic.
#[derive(Debug, Clone)]
pub struct TopicTable {
    synonyms: HashMap<String, String>,
    masters: HashMap<String, MasterPolicy>,
}

impl Default for TopicTable {
    fn default() -> Self {
        let mut table = Self {
            synonyms: HashMap::new(),
            masters: HashMap::new(),
        };
        for topic in BUILTIN_TOPICS {
            table
                .masters
                .insert(topic.canonical.to_string(), topic.masters);
            for synonym in topic.synonyms {
                table
                    .synonyms
                    .insert(synonym.to_string(), topic.canonical.to_string());
            }
        }
        table
    }
}

impl TopicTable {
    /// Registers `alias` for `canonical`. Both are normalized first.
    pub fn with_synonym(mut self, alias: &str, canonical: &str) -> Self {
        self.synonyms
            .insert(normalize_category(alias), normalize_category(canonical));
        self
    }

    pub fn canonicalize(&self, category: &str) -> String {
        let normalized = normalize_category(category);
        match self.synonyms.get(&normalized) {
            Some(canonical) => canonical.clone(),
            None => normalized,
        }
    }

    pub fn master_policy(&self, canonical: &str) -> MasterPolicy {
        self.masters
            .get(canonical)
            .copied()
            .unwrap_or(MasterPolicy::Ambiguous)
    }

    /// Canonical topic key for `(category, number)`.
    pub fn key_for(&self, category: &str, number: u32) -> String {
        let canonical = self.canonicalize(category);
        if is_master(number) && self.master_policy(&canonical) != MasterPolicy::Accepts {
            tracing::warn!(
                "⚠️ Master number {} requested for topic '{}' whose master handling is {:?}",
                number,
                canonical,
                self.master_policy(&canonical)
            );
        }
        topic_key(&canonical, number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("Motivação"), "motivacao");
        assert_eq!(normalize_category("  Harmonia-Conjugal "), "harmonia_conjugal");
        assert_eq!(normalize_category("ciclo  de - vida"), "ciclo_de_vida");
    }

    #[test]
    fn test_synonyms_map_to_canonical() {
        let table = TopicTable::default();
        assert_eq!(table.canonicalize("motivação"), "motivacao");
        assert_eq!(table.canonicalize("número_motivação"), "motivacao");
        assert_eq!(table.canonicalize("Número da Motivação"), "motivacao");
        assert_eq!(table.canonicalize("harmonia-conjugal"), "harmonia_conjugal");
        assert_eq!(table.canonicalize("Ciclos de Vida"), "ciclo_vida");
    }

    #[test]
    fn test_unknown_categories_pass_through() {
        let table = TopicTable::default();
        assert_eq!(table.canonicalize("talento_oculto"), "talento_oculto");
        assert_eq!(table.master_policy("talento_oculto"), MasterPolicy::Ambiguous);
    }

    #[test]
    fn test_topic_key_is_zero_padded() {
        assert_eq!(topic_key("motivacao", 1), "motivacao_01");
        assert_eq!(topic_key("motivacao", 11), "motivacao_11");
        let table = TopicTable::default();
        assert_eq!(table.key_for("Número Destino", 7), "destino_07");
        assert_eq!(table.key_for("desafio", 0), "desafio_00");
    }

    #[test]
    fn test_custom_synonym() {
        let table = TopicTable::default().with_synonym("Alma", "Motivação");
        assert_eq!(table.canonicalize("alma"), "motivacao");
        assert_eq!(table.key_for("ALMA", 22), "motivacao_22");
    }

    #[test]
    fn test_master_policies() {
        let table = TopicTable::default();
        assert_eq!(table.master_policy("expressao"), MasterPolicy::Accepts);
        assert_eq!(table.master_policy("desafio"), MasterPolicy::Rejects);
        assert_eq!(table.master_policy("cores"), MasterPolicy::Ambiguous);
    }
}
