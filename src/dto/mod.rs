//! DTOs de la API

pub mod common_dto;
pub mod pricing_dto;
pub mod stats_dto;
