//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Account management lives in a separate service; this server only verifies
//! the tokens it issues and trusts `sub` as the owning user id.

pub mod jwt;
