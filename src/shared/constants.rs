// =============================================================================
// ROUTING
// =============================================================================

/// Department assigned when no routing rule and no directory entry matches.
/// Routing is total: every report gets a department.
pub const DEFAULT_DEPARTMENT: &str = "General Department";

// =============================================================================
// STORAGE FOLDERS
// =============================================================================

/// Storage folder for citizen-submitted report images
pub const REPORT_IMAGE_FOLDER: &str = "civic_reports";

/// Storage folder for department-attached proof images
pub const PROOF_IMAGE_FOLDER: &str = "department_proofs";

// =============================================================================
// UPLOADS
// =============================================================================

/// Maximum accepted image upload size in bytes (5 MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;
