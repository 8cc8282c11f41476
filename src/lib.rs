//! Pokedex CLI Library
//!
//! The response cache, PokeAPI client, command parsing and session state used
//! by the `pokedex` binary, exposed for integration tests.

pub mod api;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod session;
