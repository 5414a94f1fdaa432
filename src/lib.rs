//! DK Automotive - backend de convoyage de véhicules
//!
//! API REST para la gestión de misiones de transporte: ciclo de vida con
//! máquina de estados, tarificación por grilla, documentos en blob store
//! y dashboards por rol.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod lifecycle;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
