//! Email and password authentication.
//!
//! Passwords are hashed with argon2 on tokio's blocking pool so hashing never stalls the
//! async workers. The session side of login lives in the controller and `AuthSession`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::{DatabaseConnection, SqlErr};
use secrecy::{ExposeSecret, SecretString};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParam, RegisterUserParam, User},
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new account.
    ///
    /// The email is trimmed before storage; names are trimmed and may be empty.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::BadRequest)` - Blank email or password, or an email without `@`
    /// - `Err(AuthError::EmailTaken)` - An account with the email exists
    /// - `Err(AppError::InternalError)` - Hashing failed
    pub async fn register(&self, param: RegisterUserParam) -> Result<User, AppError> {
        let email = param.email.trim().to_string();

        if email.is_empty() || !email.contains('@') {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }
        if param.password.expose_secret().trim().is_empty() {
            return Err(AppError::BadRequest("Password must not be blank".to_string()));
        }

        let repo = UserRepository::new(self.db);

        if repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken(email).into());
        }

        let password_hash = hash_password(param.password).await?;

        let user = repo
            .create(CreateUserParam {
                email: email.clone(),
                password_hash,
                first_name: param.first_name.trim().to_string(),
                last_name: param.last_name.trim().to_string(),
            })
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AuthError::EmailTaken(email).into(),
                _ => AppError::from(e),
            })?;

        tracing::info!(user_id = user.id, "Registered new user");

        Ok(user)
    }

    /// Checks an email and password pair.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials are valid
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AppError::InternalError)` - Verification could not run
    pub async fn login(&self, email: &str, password: SecretString) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        let Some((user, password_hash)) = repo.find_credentials_by_email(email.trim()).await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }
}

async fn hash_password(password: SecretString) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))?
}

async fn verify_password(password: SecretString, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&password_hash).map_err(|e| {
            AppError::InternalError(format!("Stored password hash is invalid: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Password verification task failed: {}", e)))?
}

