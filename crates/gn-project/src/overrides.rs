//! Per-request changes applied to a loaded document.

use crate::schema::NetworkDoc;
use crate::validate::ValidationError;

/// Replace user demands (m³/min) by user id.
///
/// All ids are checked before anything changes.
pub fn apply_demand_overrides(
    doc: &mut NetworkDoc,
    overrides: &[(String, f64)],
) -> Result<(), ValidationError> {
    for (id, demand) in overrides {
        if !doc.users.iter().any(|u| &u.id == id) {
            return Err(ValidationError::MissingReference {
                id: id.clone(),
                context: "demand override".to_string(),
            });
        }
        if !demand.is_finite() || *demand < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("demand override for '{id}'"),
                value: demand.to_string(),
                reason: "must be non-negative and finite".to_string(),
            });
        }
    }
    for (id, demand) in overrides {
        if let Some(user) = doc.user_mut(id) {
            user.demand_m3_min = *demand;
        }
    }
    Ok(())
}
