//! Agent capability contract and typed attribute values.
//!
//! The behavior tree never owns the agent it drives. It only resolves capabilities by name and
//! invokes them with keyword arguments bound at compile time.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod kwargs;
pub mod value;

pub use agent::{Agent, Capability, CapabilityFailure, CapabilityResult, CapabilityTable};
pub use kwargs::Kwargs;
pub use value::{ParseValueError, Value, ValueType};
