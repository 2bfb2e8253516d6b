#![allow(dead_code)]

use std::collections::BTreeMap;

use arbor_bt::{BehaviorTree, BtStatus, CompilerConfig, NodeSpec, TickError};
use arbor_core::{Agent, Capability, CapabilityFailure, CapabilityResult, Kwargs};
use arbor_tools::VecSink;

#[derive(Debug, Clone)]
pub enum Reply {
    Ok(bool),
    Fail(&'static str),
}

/// Agent whose capabilities replay scripted replies (cycled) and record every invocation.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<String>,
    pub kwargs: Vec<Kwargs>,
    replies: BTreeMap<String, Vec<Reply>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replies(mut self, name: &str, replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty(), "at least one reply per capability");
        self.replies.insert(name.to_string(), replies);
        self
    }

    pub fn always(self, name: &str, result: bool) -> Self {
        self.replies(name, vec![Reply::Ok(result)])
    }

    pub fn failing(self, name: &str, message: &'static str) -> Self {
        self.replies(name, vec![Reply::Fail(message)])
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == name).count()
    }

    fn respond(&mut self, name: &str, kwargs: &Kwargs) -> CapabilityResult {
        let n = self.count(name);
        self.calls.push(name.to_string());
        self.kwargs.push(kwargs.clone());
        let replies = &self.replies[name];
        match &replies[n % replies.len()] {
            Reply::Ok(result) => Ok(*result),
            Reply::Fail(message) => Err(CapabilityFailure::new(*message)),
        }
    }
}

impl Agent for Recorder {
    fn capability(&self, name: &str) -> Option<Capability<Self>> {
        if !self.replies.contains_key(name) {
            return None;
        }
        let name = name.to_string();
        Some(Capability::new(move |agent: &mut Recorder, kwargs| {
            agent.respond(&name, kwargs)
        }))
    }
}

pub fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("c{i}")).collect()
}

pub fn compile(spec: &NodeSpec) -> BehaviorTree {
    BehaviorTree::compile(spec, &CompilerConfig::default()).expect("tree compiles")
}

pub fn tick(tree: &mut BehaviorTree, agent: &mut Recorder) -> (Result<BtStatus, TickError>, VecSink) {
    let mut sink = VecSink::new();
    let result = tree.tick_with(agent, &mut sink);
    (result, sink)
}
