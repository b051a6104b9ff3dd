//! Minimum spanning trees of weighted undirected graphs, built by merging
//! partial trees kept in a round-robin list

#![deny(
    clippy::disallowed_methods,
    clippy::suspicious,
    clippy::style,
    clippy::clone_on_ref_ptr,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_panics_doc)]

pub mod fragment;
pub mod graph;
pub mod heap;
pub mod list;
pub mod mst;
pub mod union_find;

pub use graph::{Arc, Graph, GraphBuilder, ParseError, VertexId, Weight};
pub use list::{ListError, PartialTreeList};
pub use mst::{MstError, execute, initialize, minimum_spanning_tree};
