//! Authentication state for the Frank Energie API.
//!
//! The service issues a JWT auth token and a refresh token on `Login`. The
//! auth token is sent as `Authorization: Bearer <token>`; `RenewToken`
//! exchanges the pair for a fresh one.
//!
//! - [`Authentication`]: the token pair, with a local expiry check

mod authentication;

pub use authentication::Authentication;
