//! Purpose: Library crate behind the `keycase` CLI and its integration tests.
//! Exports: `core` (normalizer, field specs, resolver, errors), `api` (decoder, schema).
//! Role: Key normalization and field resolution for JSON decoding.
//! Invariants: `core` is pure and synchronous; it performs no I/O and no logging.
//! Invariants: Payload parsing is reached only through the internal `json` boundary.
pub mod api;
pub mod core;
pub(crate) mod json;
