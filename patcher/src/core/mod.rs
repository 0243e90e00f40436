//! Pure transform logic: no I/O, deterministic for a given document snapshot.

pub mod anchor;
pub mod error;
pub mod guard;
pub mod report;
pub mod splice;
pub mod step;
