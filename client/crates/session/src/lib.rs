//! Client Session
//!
//! Persists the token pair returned by sign-in and rebuilds the signed-in
//! identity from it.
//!
//! - `store` - key-value storage contract and in-memory implementation
//! - `claims` - unverified decoding of the access token's identity claims
//! - `provider` - authentication state with change notification

pub mod claims;
pub mod error;
pub mod provider;
pub mod store;

pub use claims::{SessionClaims, decode};
pub use error::{DecodeError, SessionError, SessionResult};
pub use provider::{AuthenticationState, SessionProvider, UserSession};
pub use store::{MemorySessionStore, SESSION_KEY, SessionStore};
