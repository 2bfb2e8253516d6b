use std::path::Path;

use arbor_core::Agent;
use arbor_tools::{DiagnosticSink, TracingSink};

use crate::bt::{BtNode, BtStatus, TickContext};
use crate::{driver, CompileResult, Compiler, CompilerConfig, Node, NodeSpec, TickError};

/// A compiled tree ready to be ticked, one instance per agent.
#[derive(Debug)]
pub struct BehaviorTree {
    root: Node,
    ticks: u64,
    last: Option<BtStatus>,
}

impl BehaviorTree {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            ticks: 0,
            last: None,
        }
    }

    pub fn compile(spec: &NodeSpec, config: &CompilerConfig) -> CompileResult<Self> {
        Compiler::new(config).compile(spec).map(Self::new)
    }

    pub fn from_xml(xml: &str, config: &CompilerConfig) -> CompileResult<Self> {
        driver::parse_tree(xml, config).map(Self::new)
    }

    pub fn load(path: &Path) -> CompileResult<Self> {
        driver::load_tree(path).map(Self::new)
    }

    pub fn load_with(path: &Path, config: &CompilerConfig) -> CompileResult<Self> {
        driver::load_tree_with(path, config).map(Self::new)
    }

    /// Tick once, reporting absorbed action failures through `tracing`.
    pub fn tick<A: Agent>(&mut self, agent: &mut A) -> Result<BtStatus, TickError> {
        self.tick_with(agent, &mut TracingSink)
    }

    /// Tick once, reporting absorbed action failures to `diagnostics`.
    ///
    /// A tick that fails with a [`TickError`] still counts as a tick and clears `last_status`.
    pub fn tick_with<A: Agent>(
        &mut self,
        agent: &mut A,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<BtStatus, TickError> {
        let mut ctx = TickContext::new(self.ticks, diagnostics);
        self.ticks = self.ticks.saturating_add(1);

        let result = self.root.tick(&mut ctx, agent);
        self.last = result.as_ref().ok().copied();
        if let Err(err) = &result {
            tracing::debug!(tick = ctx.tick, error = %err, "tick aborted");
        }
        result
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Number of ticks started so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_status(&self) -> Option<BtStatus> {
        self.last
    }
}
