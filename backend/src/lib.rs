//! Resident-record management engine for a residential-care console.
//!
//! The crate exposes the domain core behind the Residents screen: a record
//! store driven through an injected repository port, uniqueness constraints
//! on national id and phone number, sequential resident-code generation,
//! a pure filtered query view, and the modal workflow state machine.

pub mod domain;
pub mod outbound;
pub mod test_support;
