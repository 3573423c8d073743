//! Client-side session handling: token storage tiers, the API wrapper and
//! the session gate that decides whether a protected view may render.

pub mod api;
pub mod gate;
pub mod session;
