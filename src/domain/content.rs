use serde::{Deserialize, Serialize};

/// Interpretation text as kept by the content store.
///
/// Plain strings and structured records are told apart when the stored
/// JSON is decoded, so nothing downstream has to sniff free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterpretationContent {
    Text(String),
    Structured(StructuredContent),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredContent {
    #[serde(default, alias = "title")]
    pub titulo: Option<String>,
    #[serde(default, alias = "description")]
    pub descricao: Option<String>,
    #[serde(default, alias = "characteristics")]
    pub caracteristicas: Vec<String>,
    #[serde(default, alias = "aspectos_positivos", alias = "positiveAspects")]
    pub aspectos_positivos: Vec<String>,
    #[serde(default, alias = "challenges")]
    pub desafios: Vec<String>,
}

impl StructuredContent {
    /// Renders título, descrição, then each non-empty list under its heading.
    pub fn render(&self) -> String {
        let mut sections = Vec::new();

        if let Some(titulo) = non_blank(self.titulo.as_deref()) {
            sections.push(titulo.to_string());
        }
        if let Some(descricao) = non_blank(self.descricao.as_deref()) {
            sections.push(descricao.to_string());
        }

        let lists = [
            ("Características", &self.caracteristicas),
            ("Aspectos Positivos", &self.aspectos_positivos),
            ("Desafios", &self.desafios),
        ];
        for (heading, items) in lists {
            let items: Vec<&str> = items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .collect();
            if items.is_empty() {
                continue;
            }
            let mut section = format!("{}:", heading);
            for item in items {
                section.push_str("\n- ");
                section.push_str(item);
            }
            sections.push(section);
        }

        sections.join("\n\n")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl InterpretationContent {
    /// Decodes a stored body. `null` is absent content; a string holding a
    /// JSON object is treated as that object.
    pub fn from_stored_value(
        value: serde_json::Value,
    ) -> std::result::Result<Option<Self>, serde_json::Error> {
        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(text) if text.trim_start().starts_with('{') => {
                match serde_json::from_str::<StructuredContent>(&text) {
                    Ok(structured) => Ok(Some(Self::Structured(structured))),
                    Err(_) => Ok(Some(Self::Text(text))),
                }
            }
            serde_json::Value::String(text) => Ok(Some(Self::Text(text))),
            other => serde_json::from_value::<StructuredContent>(other)
                .map(|structured| Some(Self::Structured(structured))),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Structured(structured) => structured.render(),
        }
    }
}

impl From<&str> for InterpretationContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Outcome of resolving a (category, number) pair for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum InterpretationLookup {
    Resolved(String),
    Missing,
    /// The store could not be reached; render a "content unavailable" note.
    Unavailable(String),
}

impl InterpretationLookup {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Resolved(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_and_structured() {
        let plain: InterpretationContent = serde_json::from_str(r#""Texto simples""#).unwrap();
        assert_eq!(plain, InterpretationContent::Text("Texto simples".to_string()));

        let structured: InterpretationContent = serde_json::from_value(serde_json::json!({
            "titulo": "Motivação 1",
            "descricao": "Liderança",
            "aspectosPositivos": ["Iniciativa"]
        }))
        .unwrap();
        match structured {
            InterpretationContent::Structured(s) => {
                assert_eq!(s.titulo.as_deref(), Some("Motivação 1"));
                assert_eq!(s.aspectos_positivos, vec!["Iniciativa".to_string()]);
                assert!(s.caracteristicas.is_empty());
            }
            other => panic!("expected structured content, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_english_aliases() {
        let content: InterpretationContent = serde_json::from_value(serde_json::json!({
            "title": "Destiny 7",
            "challenges": ["Isolation"]
        }))
        .unwrap();
        assert_eq!(content.render(), "Destiny 7\n\nDesafios:\n- Isolation");
    }

    #[test]
    fn test_render_order_and_skips_empty_sections() {
        let content = StructuredContent {
            titulo: Some("Expressão 5".to_string()),
            descricao: Some("Versatilidade".to_string()),
            caracteristicas: vec!["Curiosa".to_string(), "  ".to_string()],
            aspectos_positivos: vec![],
            desafios: vec!["Dispersão".to_string()],
        };
        assert_eq!(
            content.render(),
            "Expressão 5\n\nVersatilidade\n\nCaracterísticas:\n- Curiosa\n\nDesafios:\n- Dispersão"
        );
    }

    #[test]
    fn test_from_stored_value() {
        use serde_json::json;

        assert_eq!(InterpretationContent::from_stored_value(json!(null)).unwrap(), None);
        assert_eq!(
            InterpretationContent::from_stored_value(json!("Texto")).unwrap(),
            Some(InterpretationContent::Text("Texto".to_string()))
        );

        let embedded = json!(r#"{"titulo": "Destino 3", "desafios": ["Dispersão"]}"#);
        match InterpretationContent::from_stored_value(embedded).unwrap() {
            Some(InterpretationContent::Structured(s)) => {
                assert_eq!(s.titulo.as_deref(), Some("Destino 3"));
                assert_eq!(s.desafios.len(), 1);
            }
            other => panic!("expected structured content, got {:?}", other),
        }

        // braces that are not JSON stay plain text
        assert_eq!(
            InterpretationContent::from_stored_value(json!("{nota solta")).unwrap(),
            Some(InterpretationContent::Text("{nota solta".to_string()))
        );
        assert!(InterpretationContent::from_stored_value(json!(42)).is_err());
    }

    #[test]
    fn test_empty_structured_renders_empty() {
        assert_eq!(StructuredContent::default().render(), "");
    }
}
