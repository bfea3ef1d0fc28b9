//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Conversions into the `striker-core` domain types
//! - `Deserialize` DTOs for inserts where the API accepts them

pub mod character;
pub mod training;
