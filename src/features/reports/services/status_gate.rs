//! Role gate for report status changes.
//!
//! The same rule applies wherever a status is changed: citizens can
//! never change one, department accounts must be assigned to the
//! report's department, and admins are locked out until a department
//! has moved the report past Pending.

use crate::core::error::AppError;
use crate::features::auth::model::{AccountRole, CurrentUser};
use crate::features::reports::models::ReportStatus;
use crate::features::reports::services::matching::department_matches;

/// Check whether `user` may change the status of a report currently in
/// `current` and routed to `report_department`.
pub fn authorize_status_change(
    user: &CurrentUser,
    report_department: &str,
    current: ReportStatus,
) -> Result<(), AppError> {
    match user.role {
        AccountRole::Citizen => Err(AppError::Forbidden(
            "Citizens cannot update report status".to_string(),
        )),
        AccountRole::Department => {
            if department_matches(&user.name, report_department) {
                Ok(())
            } else {
                Err(AppError::Forbidden(format!(
                    "You can only update reports assigned to {}",
                    report_department
                )))
            }
        }
        AccountRole::Admin => {
            if current == ReportStatus::Pending {
                Err(AppError::Forbidden(
                    "Department must take action before admin can update this issue."
                        .to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{admin_user, citizen_user, department_user};

    #[test]
    fn citizen_is_always_denied() {
        let user = citizen_user();
        for status in [
            ReportStatus::Pending,
            ReportStatus::InProgress,
            ReportStatus::Resolved,
        ] {
            assert!(authorize_status_change(&user, "Health", status).is_err());
        }
    }

    #[test]
    fn matching_department_is_allowed() {
        let user = department_user("Roads Department");
        let result =
            authorize_status_change(&user, "Roads & Infrastructure", ReportStatus::Pending);
        assert!(result.is_ok());
    }

    #[test]
    fn foreign_department_is_denied() {
        let user = department_user("Roads Department");
        let err = authorize_status_change(&user, "Water Supply", ReportStatus::Pending)
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn admin_is_locked_out_while_pending() {
        let user = admin_user();
        let err = authorize_status_change(&user, "Health", ReportStatus::Pending).unwrap_err();
        let AppError::Forbidden(message) = err else {
            panic!("expected authorization error");
        };
        assert_eq!(
            message,
            "Department must take action before admin can update this issue."
        );
    }

    #[test]
    fn admin_may_update_after_department_action() {
        let user = admin_user();
        assert!(authorize_status_change(&user, "Health", ReportStatus::InProgress).is_ok());
        assert!(authorize_status_change(&user, "Health", ReportStatus::Resolved).is_ok());
    }
}
