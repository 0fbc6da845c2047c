//! Blog (Posts & Comments) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities and repository traits
//! - `application/` - Use cases, including the ownership cascade
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Authorization Model
//! - Posts are mutable only by their author
//! - Comments are mutable by their author or, when authorship lapsed or
//!   mismatches, by the owner of the parent post
//! - Mutating routes sit behind the bearer-token guard from the auth
//!   crate; reads are public

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::blog_router;
