//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation (and generation for tooling
//!   and tests; production tokens come from the identity service).

pub mod jwt;
