use crate::core::cache::NumberCache;
use crate::core::letters::strip_accents;
use crate::core::topics::{normalize_category, topic_key, TopicTable};
use crate::domain::content::{InterpretationContent, InterpretationLookup};
use crate::domain::model::{MapaNumerologico, NameAttribute};
use crate::domain::ports::ContentStore;
use crate::utils::error::Result;
use serde::Serialize;

/// Stored texts that stand in for content nobody has written yet.
const PLACEHOLDER_PHRASES: &[&str] = &["em preparacao", "indisponivel"];

/// Words that may precede a placeholder phrase, as in "Conteúdo em preparação".
const PLACEHOLDER_PREFIXES: &[&str] = &["conteudo", "interpretacao", "texto"];

/// True when the whole text is a placeholder notice. A real interpretation
/// that merely uses one of the phrases is not a placeholder.
pub fn is_placeholder(text: &str) -> bool {
    let folded = strip_accents(text.trim());
    let notice = folded.trim_end_matches(|c: char| {
        c.is_ascii_punctuation() || c.is_whitespace() || c == '…'
    });
    let notice = PLACEHOLDER_PREFIXES
        .iter()
        .find_map(|prefix| notice.strip_prefix(prefix))
        .map(str::trim_start)
        .unwrap_or(notice);
    PLACEHOLDER_PHRASES.contains(&notice)
}

/// Interpretations for every number of a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapInterpretation {
    pub motivacao: InterpretationLookup,
    pub impressao: InterpretationLookup,
    pub expressao: InterpretationLookup,
    pub destino: InterpretationLookup,
    pub missao: InterpretationLookup,
    pub ciclos_vida: [InterpretationLookup; 3],
    pub desafio_primeiro: InterpretationLookup,
    pub desafio_segundo: InterpretationLookup,
    pub desafio_principal: InterpretationLookup,
    /// Favourable colours for the expressão number.
    pub cores: InterpretationLookup,
    /// Favourable stones for the expressão number.
    pub pedras: InterpretationLookup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ano_pessoal: Option<InterpretationLookup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mes_pessoal: Option<InterpretationLookup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_pessoal: Option<InterpretationLookup>,
}

fn soft_lookup(
    category: &str,
    number: u32,
    result: Result<Option<String>>,
) -> InterpretationLookup {
    match result {
        Ok(Some(text)) => InterpretationLookup::Resolved(text),
        Ok(None) => InterpretationLookup::Missing,
        Err(e) => {
            tracing::warn!(
                "⚠️ Content for {} {} unavailable: {}",
                category,
                number,
                e
            );
            InterpretationLookup::Unavailable(e.user_friendly_message())
        }
    }
}

pub struct ContentResolver<S: ContentStore> {
    store: S,
    topics: TopicTable,
    retry_once: bool,
    cores: NumberCache,
    pedras: NumberCache,
}

impl<S: ContentStore> ContentResolver<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            topics: TopicTable::default(),
            retry_once: true,
            cores: NumberCache::cores(),
            pedras: NumberCache::pedras(),
        }
    }

    pub fn with_topics(mut self, topics: TopicTable) -> Self {
        self.topics = topics;
        self
    }

    pub fn with_retry(mut self, retry_once: bool) -> Self {
        self.retry_once = retry_once;
        self
    }

    async fn fetch(&self, key: &str) -> Result<Option<InterpretationContent>> {
        tracing::debug!("📡 Fetching content for '{}'", key);
        match self.store.get(key).await {
            Err(e) if self.retry_once && e.is_retryable() => {
                tracing::warn!("🔁 Lookup for '{}' failed ({}), retrying once", key, e);
                self.store.get(key).await
            }
            other => other,
        }
    }

    async fn fetch_usable(&self, key: &str) -> Result<Option<String>> {
        let Some(content) = self.fetch(key).await? else {
            return Ok(None);
        };

        let text = content.render();
        if text.is_empty() {
            return Ok(None);
        }
        if is_placeholder(&text) {
            tracing::debug!("📝 Content for '{}' is a placeholder, ignoring it", key);
            return Ok(None);
        }
        Ok(Some(text))
    }

    /// Looks up `primary_key`, then `fallback_key` when the first has nothing usable.
    pub async fn resolve_key(
        &self,
        primary_key: &str,
        fallback_key: Option<&str>,
    ) -> Result<Option<String>> {
        if let Some(text) = self.fetch_usable(primary_key).await? {
            return Ok(Some(text));
        }

        match fallback_key {
            Some(fallback) if fallback != primary_key => {
                tracing::debug!(
                    "↪️ No content for '{}', trying fallback '{}'",
                    primary_key,
                    fallback
                );
                self.fetch_usable(fallback).await
            }
            _ => Ok(None),
        }
    }

    /// Resolves `(category, number)` to display text.
    ///
    /// `fallback` is a second category keyed with the same number. It goes
    /// through the same normalization but not through the synonym table, so
    /// an alias of the primary category still produces a distinct key.
    pub async fn resolve(
        &self,
        category: &str,
        number: u32,
        fallback: Option<&str>,
    ) -> Result<Option<String>> {
        let primary_key = self.topics.key_for(category, number);
        let fallback_key = fallback.map(|f| topic_key(&normalize_category(f), number));
        self.resolve_key(&primary_key, fallback_key.as_deref()).await
    }

    /// Like [`resolve`](Self::resolve) but never fails.
    pub async fn lookup(
        &self,
        category: &str,
        number: u32,
        fallback: Option<&str>,
    ) -> InterpretationLookup {
        soft_lookup(category, number, self.resolve(category, number, fallback).await)
    }

    async fn lookup_personal(
        &self,
        category: &str,
        number: Option<u32>,
    ) -> Option<InterpretationLookup> {
        match number {
            Some(number) => Some(self.lookup(category, number, None).await),
            None => None,
        }
    }

    async fn lookup_cached(&self, cache: &NumberCache, number: u32) -> InterpretationLookup {
        soft_lookup(cache.category(), number, cache.get(self, number).await)
    }

    /// Resolves every number of `mapa`; all lookups run concurrently.
    ///
    /// Personal-cycle entries are `None` when the map has no reference date.
    pub async fn interpret_map(&self, mapa: &MapaNumerologico) -> MapInterpretation {
        let cycles = mapa.ciclos_vida;
        let desafios = mapa.desafios;
        let pessoais = mapa.ciclos_pessoais;

        let (
            (motivacao, impressao, expressao, destino, missao),
            (primeiro, segundo, terceiro),
            (desafio_primeiro, desafio_segundo, desafio_principal),
            (cores, pedras),
            (ano_pessoal, mes_pessoal, dia_pessoal),
        ) = tokio::join!(
            async {
                tokio::join!(
                    self.lookup(NameAttribute::Motivacao.topic(), mapa.motivacao, None),
                    self.lookup(NameAttribute::Impressao.topic(), mapa.impressao, None),
                    self.lookup(NameAttribute::Expressao.topic(), mapa.expressao, None),
                    self.lookup("destino", mapa.destino, None),
                    self.lookup("missao", mapa.missao, Some("destino")),
                )
            },
            async {
                tokio::join!(
                    self.lookup("ciclo_vida", cycles.primeiro, None),
                    self.lookup("ciclo_vida", cycles.segundo, None),
                    self.lookup("ciclo_vida", cycles.terceiro, None),
                )
            },
            async {
                tokio::join!(
                    self.lookup("desafio", desafios.primeiro, None),
                    self.lookup("desafio", desafios.segundo, None),
                    self.lookup("desafio", desafios.principal, None),
                )
            },
            async {
                tokio::join!(
                    self.lookup_cached(&self.cores, mapa.expressao),
                    self.lookup_cached(&self.pedras, mapa.expressao),
                )
            },
            async {
                tokio::join!(
                    self.lookup_personal("ano_pessoal", pessoais.map(|p| p.ano_pessoal)),
                    self.lookup_personal("mes_pessoal", pessoais.map(|p| p.mes_pessoal)),
                    self.lookup_personal("dia_pessoal", pessoais.map(|p| p.dia_pessoal)),
                )
            },
        );

        MapInterpretation {
            motivacao,
            impressao,
            expressao,
            destino,
            missao,
            ciclos_vida: [primeiro, segundo, terceiro],
            desafio_primeiro,
            desafio_segundo,
            desafio_principal,
            cores,
            pedras,
            ano_pessoal,
            mes_pessoal,
            dia_pessoal,
        }
    }
}
