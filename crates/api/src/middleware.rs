/// Password hashing, session tokens and the request extractors built on them
pub mod auth;
/// Mapping of domain errors to HTTP responses
pub mod error_handling;
