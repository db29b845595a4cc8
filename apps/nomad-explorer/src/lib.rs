//! # nomad-explorer
//!
//! Client, web page and CLI for looking up materials in the NOMAD database.
//!
//! Each submission issues at most two sequential requests (entry search,
//! then archive) and renders the result through `nomad-core`.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod lookup;
