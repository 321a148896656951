use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::departments::models::Department;

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<Department> for DepartmentDto {
    fn from(d: Department) -> Self {
        Self {
            id: d.id,
            name: d.name,
            email: d.email,
            description: d.description,
            image_url: d.image_url,
        }
    }
}
