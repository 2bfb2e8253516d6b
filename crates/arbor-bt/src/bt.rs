use arbor_core::Agent;
use arbor_tools::{Diagnostic, DiagnosticSink};

use crate::TickError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BtStatus {
    Success,
    Failure,
}

impl BtStatus {
    pub fn is_success(self) -> bool {
        self == BtStatus::Success
    }
}

impl From<bool> for BtStatus {
    fn from(value: bool) -> Self {
        if value {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }
}

/// Per-tick state threaded through every node.
pub struct TickContext<'a> {
    pub tick: u64,
    diagnostics: &'a mut dyn DiagnosticSink,
}

impl<'a> TickContext<'a> {
    pub fn new(tick: u64, diagnostics: &'a mut dyn DiagnosticSink) -> Self {
        Self { tick, diagnostics }
    }

    pub fn report(&mut self, capability: &str, message: impl Into<String>) {
        self.diagnostics
            .report(Diagnostic::new(self.tick, capability, message));
    }
}

pub trait BtNode {
    fn tick<A: Agent>(
        &mut self,
        ctx: &mut TickContext<'_>,
        agent: &mut A,
    ) -> Result<BtStatus, TickError>;
}
