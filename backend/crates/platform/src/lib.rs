//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random material, Base64)
//! - One-way secret hashing (Argon2id, NIST SP 800-63B compliant),
//!   shared by passwords and password-reset tokens
//! - Signed access tokens (HS256)

pub mod crypto;
pub mod password;
pub mod token;
