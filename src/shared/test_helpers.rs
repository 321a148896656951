#[cfg(test)]
use crate::features::auth::model::{AccountRole, CurrentUser};
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn citizen_user() -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        name: "Test Citizen".to_string(),
        email: "citizen@example.com".to_string(),
        role: AccountRole::Citizen,
    }
}

#[cfg(test)]
pub fn department_user(name: &str) -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: "department@example.com".to_string(),
        role: AccountRole::Department,
    }
}

#[cfg(test)]
pub fn admin_user() -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        name: "Test Admin".to_string(),
        email: "admin@example.com".to_string(),
        role: AccountRole::Admin,
    }
}
