//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod chauffeur;
pub mod client;
pub mod document;
pub mod mission;
pub mod pricing;
pub mod profile;
