//! Transactional training lifecycle.
//!
//! Wraps the pure state machine in `striker_core::training` with row
//! locking and persistence. Handlers call into here; nothing in this module
//! knows about HTTP.

pub mod training;
