//! # Domain Models
//!
//! Pure types shared by every modulith crate: symbols, namespaces and configuration.
//! Keep it lean: no I/O, no graph logic, just data and simple helpers.

pub mod config;
mod error;
pub mod namespace;
pub mod symbol;

pub use crate::error::{DomainError, DomainErrorExt};
