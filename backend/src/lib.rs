//! Image upload backend: issues presigned URLs for direct bucket transfers

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]
#![allow(clippy::missing_errors_doc)]

/// Collision-avoiding object key generation
pub mod keys;

/// HTTP routes
pub mod routes;

/// HTTP server
pub mod server;

/// Configuration and API error types
pub mod types;

/// Presigned URL issuing
pub mod url_issuer;
