//! Request-scoped helpers for authentication and session state.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
