//! Purpose: Define the stable public Rust API boundary for keycase.
//! Exports: Core types and operations needed by the CLI and library users.
//! Role: Public, additive-only surface over the pure core plus decode/schema helpers.
//! Invariants: Parsing internals stay private; callers see `Error` values only.

mod decoder;
mod schema;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::field::{FieldSpec, KeySource};
pub use crate::core::normalize::{KeyStrategy, convert_from_snake_case};
pub use crate::core::resolve::{MatchKind, Resolution, ResolvedField, resolve, resolve_with};
pub use decoder::Decoder;
pub use schema::{Schema, parse_field_arg};
