//! Data source adapter for the remote user directory.
//!
//! The plugin consumes exactly one read-only REST endpoint: a GET returning
//! a JSON array of users. The HTTP transfer itself is performed by the
//! Zellij host (`web_request`), which later delivers a `WebRequestResult`
//! event; this module owns what happens on both sides of that boundary:
//!
//! - [`request`]: request-identity bookkeeping, so a slow stale response can
//!   never overwrite the result of a newer fetch
//! - [`response`]: classification of the host's response into the fetch
//!   error taxonomy and decoding of the payload
//!
//! There is no retry, caching or pagination in the adapter; the retry
//! affordance in the UI simply issues a fresh fetch.

pub mod request;
pub mod response;

pub use request::{RequestGuard, REQUEST_ID_CONTEXT_KEY};
pub use response::{parse_users, FetchError};

/// Default users-collection endpoint, overridable via plugin configuration.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";
