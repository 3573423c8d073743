//! University office portal: authentication service and the client-side
//! session library that talks to it.

pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
