//! Common library for the attendance backend
//!
//! This crate provides the functionality shared across the attendance
//! services: PostgreSQL connectivity and the database error taxonomy.

pub mod database;
pub mod error;
