use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::Kwargs;

/// Failure raised by a capability during its own execution.
///
/// This is distinct from the capability not existing at all: a missing capability is a lookup
/// failure and is always fatal to the tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CapabilityFailure {
    pub message: String,
}

impl CapabilityFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type CapabilityResult = Result<bool, CapabilityFailure>;

type CapabilityFn<A> = dyn Fn(&mut A, &Kwargs) -> CapabilityResult + Send + Sync;

/// A named operation an agent exposes to the tree.
///
/// Capabilities are cheap to clone, so resolving one does not keep the agent borrowed while it
/// runs against `&mut A`.
pub struct Capability<A: ?Sized> {
    f: Arc<CapabilityFn<A>>,
}

impl<A: ?Sized> Capability<A> {
    pub fn new(f: impl Fn(&mut A, &Kwargs) -> CapabilityResult + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Wrap a capability that cannot fail.
    pub fn infallible(f: impl Fn(&mut A, &Kwargs) -> bool + Send + Sync + 'static) -> Self {
        Self::new(move |agent, kwargs| Ok(f(agent, kwargs)))
    }

    pub fn invoke(&self, agent: &mut A, kwargs: &Kwargs) -> CapabilityResult {
        (self.f)(agent, kwargs)
    }
}

impl<A: ?Sized> Clone for Capability<A> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<A: ?Sized> fmt::Debug for Capability<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability").finish_non_exhaustive()
    }
}

/// The capability provider a behavior tree is ticked against.
///
/// Names are matched exactly; the compiler has already applied any case normalization.
pub trait Agent {
    fn capability(&self, name: &str) -> Option<Capability<Self>>;
}

/// Name -> capability registry that agents can embed and delegate [`Agent::capability`] to.
pub struct CapabilityTable<A: ?Sized> {
    entries: BTreeMap<String, Capability<A>>,
}

impl<A: ?Sized> CapabilityTable<A> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, capability: Capability<A>) {
        self.entries.insert(name.into(), capability);
    }

    pub fn with(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&mut A, &Kwargs) -> CapabilityResult + Send + Sync + 'static,
    ) -> Self {
        self.register(name, Capability::new(f));
        self
    }

    pub fn get(&self, name: &str) -> Option<Capability<A>> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A: ?Sized> Default for CapabilityTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> Clone for CapabilityTable<A> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<A: ?Sized> fmt::Debug for CapabilityTable<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
