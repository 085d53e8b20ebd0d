// Domain layer: map/audit/content models and the ports the adapters implement.

pub mod content;
pub mod model;
pub mod ports;
