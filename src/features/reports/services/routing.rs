//! Keyword routing from a free-form category to a department name.
//!
//! The keyword chain is ordered and first match wins, so a category such
//! as "Water Health Issue" routes to Water Supply even though it also
//! mentions health. When no keyword matches, the category is compared
//! against the live department directory in both directions before
//! falling back to the default department.

use crate::shared::constants::DEFAULT_DEPARTMENT;

/// Ordered keyword rules. Each entry maps a lowercase substring to the
/// department that owns it.
const KEYWORD_RULES: &[(&str, &str)] = &[
    ("road", "Roads & Infrastructure"),
    ("infrastructure", "Roads & Infrastructure"),
    ("water", "Water Supply"),
    ("electric", "Electrical"),
    ("sanit", "Sanitation"),
    ("health", "Health"),
];

/// Resolve the department responsible for a report category.
///
/// `directory` is a snapshot of the department names known at routing
/// time. Matching is case-insensitive throughout.
pub fn route_category(category: &str, directory: &[String]) -> String {
    let needle = category.to_lowercase();

    for (keyword, department) in KEYWORD_RULES {
        if needle.contains(keyword) {
            return (*department).to_string();
        }
    }

    // Directory fallback: either string may contain the other.
    for name in directory {
        let candidate = name.to_lowercase();
        if candidate.contains(&needle) || needle.contains(&candidate) {
            return name.clone();
        }
    }

    DEFAULT_DEPARTMENT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Vec<String> {
        vec![
            "Roads & Infrastructure".to_string(),
            "Water Supply".to_string(),
            "Electrical".to_string(),
            "Sanitation".to_string(),
            "Health".to_string(),
            "Parks & Recreation".to_string(),
        ]
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert_eq!(
            route_category("ROAD damage", &directory()),
            "Roads & Infrastructure"
        );
        assert_eq!(route_category("Water leakage", &directory()), "Water Supply");
    }

    #[test]
    fn earlier_keyword_wins_over_later() {
        // Mentions both water and health; water is checked first.
        assert_eq!(
            route_category("Water Health Issue", &directory()),
            "Water Supply"
        );
    }

    #[test]
    fn sanit_prefix_covers_word_variants() {
        assert_eq!(route_category("sanitary conditions", &directory()), "Sanitation");
        assert_eq!(route_category("Sanitation issue", &directory()), "Sanitation");
    }

    #[test]
    fn directory_match_in_either_direction() {
        // Category contained in a department name.
        assert_eq!(route_category("parks", &directory()), "Parks & Recreation");
        // Department name contained in the category.
        assert_eq!(
            route_category("issue near parks & recreation area", &directory()),
            "Parks & Recreation"
        );
    }

    #[test]
    fn unmatched_category_falls_back_to_default() {
        assert_eq!(route_category("alien invasion", &directory()), DEFAULT_DEPARTMENT);
        assert_eq!(route_category("", &[]), DEFAULT_DEPARTMENT);
    }
}
