//! DTOs de estadísticas y dashboards

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::mission::MissionStatus;

/// Conteo de misiones por estado
#[derive(Debug, Serialize, FromRow)]
pub struct StatusCount {
    pub status: MissionStatus,
    pub count: i64,
}

/// Sumas de facturación cliente sobre misiones completadas
#[derive(Debug, Serialize, FromRow)]
pub struct RevenueSummary {
    pub mission_count: i64,
    pub total_ht: Decimal,
    pub total_ttc: Decimal,
}

/// Buckets de liquidación chauffeur sobre misiones completadas
///
/// paid / unpaid distinguen por chauffeur_paid entre misiones con factura;
/// no_invoice agrupa las misiones completadas sin factura adjunta.
#[derive(Debug, Serialize, FromRow)]
pub struct ChauffeurSettlement {
    pub paid_total: Decimal,
    pub unpaid_total: Decimal,
    pub no_invoice_total: Decimal,
}

/// Dashboard admin completo
#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub missions_by_status: Vec<StatusCount>,
    pub revenue: RevenueSummary,
    pub chauffeur_settlement: ChauffeurSettlement,
}

/// Dashboard cliente: sus propias misiones
#[derive(Debug, Serialize)]
pub struct ClientDashboard {
    pub missions_by_status: Vec<StatusCount>,
    pub revenue: RevenueSummary,
}

/// Dashboard chauffeur: misiones asignadas y montos adeudados
#[derive(Debug, Serialize)]
pub struct ChauffeurDashboard {
    pub missions_by_status: Vec<StatusCount>,
    pub owed_total: Decimal,
    pub paid_total: Decimal,
}
