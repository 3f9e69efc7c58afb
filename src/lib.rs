//! Retirement projections for a single user.
//!
//! [`core`] holds the validated profile and the closed-form projection model.
//! Everything else fetches raw records ([`source`]), wires configuration
//! ([`config`], [`cli`]) and presents results ([`report`], [`api`]).

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod report;
pub mod source;
