//! Purpose: Internal JSON parsing boundary for payloads and schema files.
//! Exports: `parse` module with decode helpers used by the API layer.
//! Role: Single seam for parser details so callsites avoid ad hoc decode logic.
//! Invariants: Payload decoding goes through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
