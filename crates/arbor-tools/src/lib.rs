//! Diagnostic channel for behavior tree evaluation.
//!
//! This crate is intentionally small. Hosts decide where diagnostics end up: the default sink
//! forwards them to `tracing`, tests usually collect them with [`VecSink`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticSink, NullSink, TracingSink, VecSink};
