//! User Entity
//!
//! Core user profile entity containing non-sensitive user data.
//! Sensitive credential state lives in the Credentials entity.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::user_name::UserName;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Database-assigned identifier (also the access-token subject)
    pub user_id: UserId,
    /// User name (unique; login handle and reset delivery address)
    pub user_name: UserName,
    /// First name (optional profile field)
    pub first_name: Option<String>,
    /// Last name (optional profile field)
    pub last_name: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Set profile name fields
    pub fn set_name(&mut self, first: Option<String>, last: Option<String>) {
        self.first_name = first;
        self.last_name = last;
        self.updated_at = Utc::now();
    }
}
