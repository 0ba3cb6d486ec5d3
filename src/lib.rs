//! Bazaar: agent marketplace client
//!
//! Searches marketplace agents and manages the local agent identities used for
//! authenticated marketplace calls.

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod marketplace;
pub mod search;
