//! Canonical node/edge model for the diagram engine.
//!
//! # Responsibility
//! - Define the graph value types shared by every engine component.
//! - Keep the serde wire shape stable for the outline-exchange boundary.
//!
//! # Invariants
//! - Node and edge ids are opaque strings; the engine only compares them.
//! - Derived fields (`branch_key`, `branch_color`, `hidden`, `child_count`)
//!   are recomputed by the engine, never trusted from input.

pub mod color;
pub mod edge;
pub mod node;
