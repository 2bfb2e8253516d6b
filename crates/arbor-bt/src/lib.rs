//! Behavior tree compiler and evaluation engine.
//!
//! A tree is authored as XML, read into [`NodeSpec`] descriptions, compiled once into an owned
//! [`Node`] tree and then ticked against an [`arbor_core::Agent`] once per decision cycle.
//!
//! A compiled tree is not reentrant: the round-robin cursor of [`Alternate`] is mutated in place,
//! so each agent should tick its own tree instance.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod coerce;
pub mod compiler;
pub mod config;
pub mod document;
pub mod driver;
pub mod error;
pub mod nodes;
pub mod spec;
pub mod tree;

pub use bt::{BtNode, BtStatus, TickContext};
pub use coerce::coerce_attributes;
pub use compiler::Compiler;
pub use config::CompilerConfig;
pub use document::parse_document;
pub use driver::{load_tree, load_tree_with, parse_tree};
pub use error::{Arity, CompileError, CompileResult, TickError};
pub use nodes::{Action, ActionOutcome, Alternate, Condition, Loop, Node, Parallel, Selector, Sequence};
pub use spec::{Category, NodeSpec};
pub use tree::BehaviorTree;
