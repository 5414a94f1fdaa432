//! Controllers de la aplicación
//!
//! La lógica de negocio vive aquí; las rutas solo extraen la request
//! y delegan.

pub mod auth_controller;
pub mod directory_controller;
pub mod document_controller;
pub mod mission_controller;
pub mod pricing_controller;
pub mod stats_controller;
