//! # Engine Module
//!
//! Turns a declarative [`config::MatrixConfig`] into a populated matrix.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Backend choice, layout, dimension and
//!   sparse capacity, validated through a builder
//! - **Construction** ([`factory`]) - Creates the configured backend and wraps
//!   it in a [`factory::MatrixStore`] so sparse-only calls stay reachable
//! - **Assembly** ([`assembly`]) - Accumulates `(row, column, value)`
//!   contributions and optionally seals the result
//! - **Error Handling** ([`error`]) - [`error::EngineError`] wraps every lower
//!   level failure

pub mod assembly;
pub mod config;
pub mod error;
pub mod factory;
