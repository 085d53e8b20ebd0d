pub mod cache;
pub mod date;
pub mod derived;
pub mod letters;
pub mod mapa;
pub mod name;
pub mod resolver;
pub mod topics;

pub use crate::domain::content::{InterpretationContent, InterpretationLookup};
pub use crate::domain::model::{AuditLog, MapaNumerologico, NameAttribute};
pub use crate::domain::ports::{ConfigProvider, ContentStore};
pub use crate::utils::error::Result;
