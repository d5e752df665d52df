//! Resource ownership state and access decisions.
//!
//! This crate holds the only real state in the system: the [`ResourceRegistry`]
//! of seat/room slots and the pure [`decide`] function that classifies a card
//! scan against it. Everything around it (readers, actuators, displays) is
//! hardware plumbing behind traits in other crates.

pub mod decision;
pub mod registry;

pub use decision::{Outcome, apply, decide};
pub use registry::{AuthorizationList, Resource, ResourceRegistry};
