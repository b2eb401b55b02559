//! Backing Store Module
//!
//! Implementations of the source-of-truth collaborator.

mod simulated;

pub use simulated::SimulatedBackingStore;
