//! Fuzzy matching between a department account's display name and the
//! department string stored on a report.
//!
//! Department accounts register with names like "Roads Department" while
//! reports carry routed names like "Roads & Infrastructure". The word
//! "department" is noise, so it is stripped before comparing, and the
//! remaining fragment matches when either side contains the other.

/// Strip the word "department" (any case) from an account name and trim
/// the remainder.
pub fn department_fragment(account_name: &str) -> String {
    let lowered = account_name.to_lowercase();
    lowered.replace("department", "").trim().to_string()
}

/// True when the account's name fragment and the report's department
/// name overlap in either direction.
pub fn department_matches(account_name: &str, report_department: &str) -> bool {
    let fragment = department_fragment(account_name);
    if fragment.is_empty() {
        return false;
    }
    let target = report_department.to_lowercase();
    target.contains(&fragment) || fragment.contains(&target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_strips_department_word() {
        assert_eq!(department_fragment("Roads Department"), "roads");
        assert_eq!(department_fragment("DEPARTMENT of Health"), "of health");
        assert_eq!(department_fragment("Sanitation"), "sanitation");
    }

    #[test]
    fn account_fragment_matches_routed_name() {
        assert!(department_matches("Roads Department", "Roads & Infrastructure"));
        assert!(department_matches("Water Supply Department", "Water Supply"));
        assert!(department_matches("Health Department", "Health"));
    }

    #[test]
    fn containment_works_in_both_directions() {
        // Fragment longer than the stored name.
        assert!(department_matches("Electrical Maintenance Department", "Electrical"));
        // Fragment shorter than the stored name.
        assert!(department_matches("Roads Department", "Roads & Infrastructure"));
    }

    #[test]
    fn mismatched_names_do_not_match() {
        assert!(!department_matches("Roads Department", "Water Supply"));
        assert!(!department_matches("Department", "Water Supply"));
    }

    #[test]
    fn empty_fragment_never_matches() {
        assert!(!department_matches("department", "General Department"));
        assert!(!department_matches("  Department  ", "Health"));
    }
}
