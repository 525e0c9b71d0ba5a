//! dmdd-gui - administration console for dmdd-core
//!
//! Serves a JSON API and server-rendered HTML pages for libraries, library items
//! and system users. Every operation is proxied to the dmdd-core backend over HTTP;
//! nothing is stored locally.

pub mod backend;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
