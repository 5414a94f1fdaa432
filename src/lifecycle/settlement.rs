//! Acoplamiento factura/pago del chauffeur
//!
//! El flag `chauffeur_paid` solo puede activarse con una factura adjunta, y
//! borrar la factura resetea el pago en la misma operación. Contraparte pura
//! de los UPDATEs condicionales del repositorio: los controllers validan con
//! estas funciones antes de escribir y la suite las ejercita directamente.

use thiserror::Error;

use crate::models::mission::Mission;
use crate::utils::errors::AppError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("cannot mark as paid without an attached invoice")]
    PaidWithoutInvoice,
}

impl From<SettlementError> for AppError {
    fn from(error: SettlementError) -> Self {
        AppError::Conflict(error.to_string())
    }
}

/// El flag de pago solo puede activarse con factura adjunta; desmarcarlo
/// siempre está permitido
pub fn can_set_paid(paid: bool, invoice: Option<&str>) -> bool {
    !paid || invoice.is_some()
}

/// Marcar o desmarcar el pago sobre la misión en memoria
pub fn apply_paid(mission: &mut Mission, paid: bool) -> Result<(), SettlementError> {
    if !can_set_paid(paid, mission.chauffeur_invoice.as_deref()) {
        return Err(SettlementError::PaidWithoutInvoice);
    }
    mission.chauffeur_paid = paid;
    Ok(())
}

/// Borrar la factura resetea el pago junto con la referencia
pub fn apply_clear_invoice(mission: &mut Mission) {
    mission.chauffeur_invoice = None;
    mission.chauffeur_paid = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_set_paid_requires_invoice() {
        assert!(!can_set_paid(true, None));
        assert!(can_set_paid(true, Some("driver_invoices/abc/facture.pdf")));
    }

    #[test]
    fn test_unsetting_paid_is_always_allowed() {
        assert!(can_set_paid(false, None));
        assert!(can_set_paid(false, Some("driver_invoices/abc/facture.pdf")));
    }
}
