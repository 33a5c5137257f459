//! User domain models and parameters.
//!
//! Provides the domain model for registered users and the parameter type used to create
//! an account. Password hashes never leave the data and auth layers.

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::model::user::{UserDto, UserSummaryDto};

/// Registered user identified by numeric ID and unique email.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Database ID of the user.
    pub id: i32,
    /// Unique login email.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// The password hash is dropped here; use `UserRepository::find_credentials_by_email`
    /// when it is needed for verification.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `User` - The converted user domain model
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            created_at: entity.created_at,
        }
    }

    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
        }
    }

    /// Converts the user to the summary nested inside subscription responses.
    pub fn into_summary_dto(self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

/// Parameters for registering a new account.
#[derive(Debug)]
pub struct RegisterUserParam {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
}

/// Parameters for inserting a user row once the password has been hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}
