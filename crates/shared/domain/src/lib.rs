//! # Domain Models
//!
//! This crate contains pure configuration types with a single dependency (`serde`).
//! Keep it lean: no I/O, randomness, or heavy logic, just data and simple helpers.

pub mod config;
pub mod crumb;
