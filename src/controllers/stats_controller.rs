//! Controller de dashboards
//!
//! Agrega las consultas de solo lectura del repositorio de estadísticas
//! en un dashboard por rol.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::stats_dto::{AdminDashboard, ChauffeurDashboard, ClientDashboard};
use crate::repositories::stats_repository::StatsRepository;
use crate::utils::errors::AppError;

pub struct StatsController {
    stats: StatsRepository,
}

impl StatsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            stats: StatsRepository::new(pool),
        }
    }

    /// Dashboard admin: toda la flota, facturación y liquidación chauffeur
    pub async fn admin_dashboard(&self) -> Result<AdminDashboard, AppError> {
        let missions_by_status = self.stats.missions_by_status(None, None).await?;
        let revenue = self.stats.revenue_summary(None).await?;
        let chauffeur_settlement = self.stats.chauffeur_settlement().await?;

        Ok(AdminDashboard {
            missions_by_status,
            revenue,
            chauffeur_settlement,
        })
    }

    /// Dashboard cliente: sus propias misiones y facturación
    pub async fn client_dashboard(&self, client_id: Uuid) -> Result<ClientDashboard, AppError> {
        let missions_by_status = self.stats.missions_by_status(Some(client_id), None).await?;
        let revenue = self.stats.revenue_summary(Some(client_id)).await?;

        Ok(ClientDashboard {
            missions_by_status,
            revenue,
        })
    }

    /// Dashboard chauffeur: misiones asignadas y montos adeudados/pagados
    pub async fn chauffeur_dashboard(
        &self,
        chauffeur_id: Uuid,
    ) -> Result<ChauffeurDashboard, AppError> {
        let missions_by_status = self
            .stats
            .missions_by_status(None, Some(chauffeur_id))
            .await?;
        let (owed_total, paid_total) = self.stats.chauffeur_totals(chauffeur_id).await?;

        Ok(ChauffeurDashboard {
            missions_by_status,
            owed_total,
            paid_total,
        })
    }
}
