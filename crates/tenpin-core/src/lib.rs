//! Tenpin core: shared domain abstractions.
//!
//! This crate defines the traits and types the scoring context and its
//! storage and transport shells depend on. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod repository;
