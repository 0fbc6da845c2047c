//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and mail delivery implementations
//! - `presentation/` - HTTP handlers, DTOs, router, bearer-token guard
//!
//! ## Features
//! - User registration/login with username + password
//! - Stateless bearer tokens (HS256) with a config-injected secret
//! - Password reset via single-use, time-limited, hashed tokens
//! - Authenticated password change and profile management
//!
//! ## Security Model
//! - Passwords and reset tokens hashed with Argon2id (NIST SP 800-63B)
//! - Raw reset tokens are delivered out-of-band and never persisted
//! - Reset requests never reveal whether a username exists
//! - Reset failures collapse to one generic message (no oracle)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::mailer::{HttpResetMailer, LoggingResetMailer};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::CurrentUser;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
