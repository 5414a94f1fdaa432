//! Repositorios de acceso a datos
//!
//! Un repositorio por agregado, con queries runtime de sqlx.

pub mod chauffeur_repository;
pub mod client_repository;
pub mod document_repository;
pub mod mission_repository;
pub mod pricing_repository;
pub mod profile_repository;
pub mod stats_repository;
