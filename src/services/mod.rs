//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación:
//! motor de precios, barrera de uploads, geocoding y blob store.

pub mod geocoding_service;
pub mod pricing_service;
pub mod storage_service;
pub mod upload_gate;
