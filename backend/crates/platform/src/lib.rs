//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, Base64url helpers)
//! - Cookie management
//! - Common header handling components

pub mod cookie;
pub mod crypto;
