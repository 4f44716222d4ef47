//! # crediario (THE BINARY)
//!
//! Library surface of the Crediário console, split out so integration
//! tests can exercise configuration, clients and rendering without
//! spawning the binary.

pub mod cep;
pub mod cli;
pub mod client;
pub mod config;
pub mod intake;
