//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Reads and
//! standalone writes accept `&PgPool`; methods that take part in the
//! training engine's read-modify-write transaction accept `&mut PgConnection`
//! so callers can pass `&mut *tx`.

pub mod character_repo;
pub mod training_list_repo;
pub mod training_log_repo;

pub use character_repo::CharacterRepo;
pub use training_list_repo::TrainingListRepo;
pub use training_log_repo::TrainingLogRepo;
