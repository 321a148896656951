use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a department directory entry.
///
/// Reports reference departments by name only; there is no foreign key,
/// and routing may assign a name with no directory entry.
#[derive(Debug, Clone, FromRow)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
