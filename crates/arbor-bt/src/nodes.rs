use arbor_core::{Agent, CapabilityFailure, Kwargs};
#[cfg(feature = "serialize")]
use serde::Serialize;

use crate::bt::{BtNode, BtStatus, TickContext};
use crate::{Category, TickError};

/// Tries children in order until one succeeds.
#[derive(Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Selector {
    children: Vec<Node>,
}

impl Selector {
    pub(crate) fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

impl BtNode for Selector {
    fn tick<A: Agent>(
        &mut self,
        ctx: &mut TickContext<'_>,
        agent: &mut A,
    ) -> Result<BtStatus, TickError> {
        for child in self.children.iter_mut() {
            if child.tick(ctx, agent)?.is_success() {
                return Ok(BtStatus::Success);
            }
        }
        Ok(BtStatus::Failure)
    }
}

/// Runs children in order until one fails.
#[derive(Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Sequence {
    children: Vec<Node>,
}

impl Sequence {
    pub(crate) fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

impl BtNode for Sequence {
    fn tick<A: Agent>(
        &mut self,
        ctx: &mut TickContext<'_>,
        agent: &mut A,
    ) -> Result<BtStatus, TickError> {
        for child in self.children.iter_mut() {
            if !child.tick(ctx, agent)?.is_success() {
                return Ok(BtStatus::Failure);
            }
        }
        Ok(BtStatus::Success)
    }
}

/// Runs every child once per tick and succeeds if any of them did.
#[derive(Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Parallel {
    children: Vec<Node>,
}

impl Parallel {
    pub(crate) fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

impl BtNode for Parallel {
    fn tick<A: Agent>(
        &mut self,
        ctx: &mut TickContext<'_>,
        agent: &mut A,
    ) -> Result<BtStatus, TickError> {
        let mut any = false;
        for child in self.children.iter_mut() {
            // No short-circuit: every child's side effects happen each tick.
            any |= child.tick(ctx, agent)?.is_success();
        }
        Ok(any.into())
    }
}

/// Runs exactly one child per tick, round-robin.
///
/// The cursor belongs to the node and survives across ticks; it only starts over when the tree is
/// compiled again.
#[derive(Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Alternate {
    children: Vec<Node>,
    cursor: usize,
}

impl Alternate {
    /// `children` must be non-empty; the compiler enforces it.
    pub(crate) fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            cursor: 0,
        }
    }

    /// Index of the child the next tick will run.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl BtNode for Alternate {
    fn tick<A: Agent>(
        &mut self,
        ctx: &mut TickContext<'_>,
        agent: &mut A,
    ) -> Result<BtStatus, TickError> {
        let index = self.cursor;
        // Advance before running so a child that aborts the tick does not pin the cursor.
        self.cursor = (index + 1) % self.children.len();
        self.children[index].tick(ctx, agent)
    }
}

/// Runs its child up to `count` times within one tick, stopping at the first failure.
#[derive(Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Loop {
    count: u32,
    child: Box<Node>,
}

impl Loop {
    pub(crate) fn new(count: u32, child: Node) -> Self {
        Self {
            count,
            child: Box::new(child),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl BtNode for Loop {
    fn tick<A: Agent>(
        &mut self,
        ctx: &mut TickContext<'_>,
        agent: &mut A,
    ) -> Result<BtStatus, TickError> {
        for _ in 0..self.count {
            if !self.child.tick(ctx, agent)?.is_success() {
                return Ok(BtStatus::Failure);
            }
        }
        Ok(BtStatus::Success)
    }
}

/// Probes an agent capability. Every failure propagates.
#[derive(Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Condition {
    capability: String,
    kwargs: Kwargs,
    path: String,
}

impl Condition {
    pub(crate) fn new(capability: String, kwargs: Kwargs, path: String) -> Self {
        Self {
            capability,
            kwargs,
            path,
        }
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }

    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    /// Where the node sits in the document, e.g. `Sequence/1:Attack`.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl BtNode for Condition {
    fn tick<A: Agent>(
        &mut self,
        _ctx: &mut TickContext<'_>,
        agent: &mut A,
    ) -> Result<BtStatus, TickError> {
        let capability = resolve(agent, &self.capability, &self.path)?;
        let result = capability
            .invoke(agent, &self.kwargs)
            .map_err(|source| TickError::CapabilityFailed {
                capability: self.capability.clone(),
                path: self.path.clone(),
                source,
            })?;
        tracing::trace!(capability = %self.capability, result, "condition");
        Ok(result.into())
    }
}

/// Result of running an action capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Success,
    Failure,
    /// The capability failed while executing; the node reports it and counts as failed.
    Absorbed(CapabilityFailure),
}

impl ActionOutcome {
    pub fn status(&self) -> BtStatus {
        match self {
            ActionOutcome::Success => BtStatus::Success,
            ActionOutcome::Failure | ActionOutcome::Absorbed(_) => BtStatus::Failure,
        }
    }
}

/// Performs an agent capability. Failures raised while the capability runs are absorbed; a
/// missing capability is not.
#[derive(Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Action {
    capability: String,
    kwargs: Kwargs,
    path: String,
}

impl Action {
    pub(crate) fn new(capability: String, kwargs: Kwargs, path: String) -> Self {
        Self {
            capability,
            kwargs,
            path,
        }
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }

    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    /// Where the node sits in the document, e.g. `Sequence/1:Attack`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run the capability without reporting anything.
    pub fn run<A: Agent>(&self, agent: &mut A) -> Result<ActionOutcome, TickError> {
        let capability = resolve(agent, &self.capability, &self.path)?;
        Ok(match capability.invoke(agent, &self.kwargs) {
            Ok(true) => ActionOutcome::Success,
            Ok(false) => ActionOutcome::Failure,
            Err(failure) => ActionOutcome::Absorbed(failure),
        })
    }
}

impl BtNode for Action {
    fn tick<A: Agent>(
        &mut self,
        ctx: &mut TickContext<'_>,
        agent: &mut A,
    ) -> Result<BtStatus, TickError> {
        let outcome = self.run(agent)?;
        tracing::trace!(capability = %self.capability, outcome = ?outcome, "action");
        if let ActionOutcome::Absorbed(failure) = &outcome {
            ctx.report(&self.capability, failure.message.clone());
        }
        Ok(outcome.status())
    }
}

fn resolve<A: Agent>(
    agent: &A,
    name: &str,
    path: &str,
) -> Result<arbor_core::Capability<A>, TickError> {
    agent
        .capability(name)
        .ok_or_else(|| TickError::MissingCapability {
            capability: name.to_string(),
            path: path.to_string(),
        })
}

/// A compiled node. The tree owns its nodes outright; children never point back up.
#[derive(Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[cfg_attr(feature = "serialize", serde(tag = "type"))]
pub enum Node {
    Selector(Selector),
    Sequence(Sequence),
    Parallel(Parallel),
    Alternate(Alternate),
    Loop(Loop),
    Condition(Condition),
    Action(Action),
}

impl Node {
    pub fn category(&self) -> Category {
        match self {
            Node::Selector(_) | Node::Sequence(_) | Node::Parallel(_) | Node::Alternate(_) => {
                Category::Composite
            }
            Node::Loop(_) => Category::Decorator,
            Node::Condition(_) => Category::Condition,
            Node::Action(_) => Category::Action,
        }
    }

    /// Composite/decorator kind, or the bound capability name for leaves.
    pub fn kind(&self) -> &str {
        match self {
            Node::Selector(_) => "Selector",
            Node::Sequence(_) => "Sequence",
            Node::Parallel(_) => "Parallel",
            Node::Alternate(_) => "Alternate",
            Node::Loop(_) => "Loop",
            Node::Condition(c) => c.capability(),
            Node::Action(a) => a.capability(),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Selector(n) => &n.children,
            Node::Sequence(n) => &n.children,
            Node::Parallel(n) => &n.children,
            Node::Alternate(n) => &n.children,
            Node::Loop(n) => std::slice::from_ref(&*n.child),
            Node::Condition(_) | Node::Action(_) => &[],
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }
}

impl BtNode for Node {
    fn tick<A: Agent>(
        &mut self,
        ctx: &mut TickContext<'_>,
        agent: &mut A,
    ) -> Result<BtStatus, TickError> {
        match self {
            Node::Selector(n) => n.tick(ctx, agent),
            Node::Sequence(n) => n.tick(ctx, agent),
            Node::Parallel(n) => n.tick(ctx, agent),
            Node::Alternate(n) => n.tick(ctx, agent),
            Node::Loop(n) => n.tick(ctx, agent),
            Node::Condition(n) => n.tick(ctx, agent),
            Node::Action(n) => n.tick(ctx, agent),
        }
    }
}
