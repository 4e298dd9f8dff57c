//! Serialized form of the intermediate relation-graph file (spec §6).
//!
//! The wire shape is a root element with four relation groups (`depends`,
//! `association`, `aggregation`, `inheritance`), each holding `relation`
//! leaves with `ci`/`cj` attributes, plus an optional `manifest` subtree of
//! `activity` entries. Attribute orientation is convention, not structure —
//! get it wrong and the graph round-trips but means something else. See
//! [`crate::core::graph::RelationGraph`]'s field docs for the canonical
//! orientation each group must follow.

mod model;
mod reader;
mod writer;

pub use reader::{read_module_file, read_module_str};
pub use writer::{write_module_file, write_module_str};
