pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{HttpContentStore, InMemoryContentStore, LocalContentStore};
pub use app::batch::{BatchRunner, BatchSummary};
pub use core::derived::{compatibility_score, map_compatibility, string_vibration, DerivedKind};
pub use core::mapa::{gerar_mapa_com_auditoria, gerar_mapa_numerologico};
pub use core::resolver::{ContentResolver, MapInterpretation};
pub use domain::content::{InterpretationContent, InterpretationLookup, StructuredContent};
pub use domain::model::{AuditLog, AuditStep, MapaNumerologico};
pub use domain::ports::ContentStore;
pub use utils::error::{NumerologiaError, Result};
