//! Credentials supplied by the cache owner and the redacting secret wrapper used for tokens.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;
