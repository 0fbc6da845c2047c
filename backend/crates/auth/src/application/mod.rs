//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
pub mod profile;
pub mod request_reset;
pub mod reset_password;
pub mod sign_in;
pub mod sign_up;
pub mod verify_reset;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AuthConfig;
pub use profile::{DeleteAccountUseCase, UpdateProfileInput, UpdateProfileUseCase};
pub use request_reset::{RequestResetInput, RequestResetUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use verify_reset::VerifyResetUseCase;
