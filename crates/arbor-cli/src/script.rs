//! A stand-in agent whose capabilities replay results from a YAML script.
//!
//! ```yaml
//! capabilities:
//!   hastarget: true            # constant result
//!   targetinrange: [false, true]   # cycled, one entry per invocation
//!   attack:
//!     fail: weapon jammed      # every invocation fails
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use arbor_core::{Agent, Capability, CapabilityFailure, CapabilityResult, Kwargs};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CapabilityScript {
    Constant(bool),
    Cycle(Vec<bool>),
    Detailed {
        #[serde(default)]
        results: Vec<bool>,
        #[serde(default)]
        fail: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    capabilities: BTreeMap<String, CapabilityScript>,
}

#[derive(Debug, Clone)]
struct Behavior {
    results: Vec<bool>,
    fail: Option<String>,
}

impl From<CapabilityScript> for Behavior {
    fn from(script: CapabilityScript) -> Self {
        match script {
            CapabilityScript::Constant(result) => Self {
                results: vec![result],
                fail: None,
            },
            CapabilityScript::Cycle(results) => Self {
                results,
                fail: None,
            },
            CapabilityScript::Detailed { results, fail } => Self { results, fail },
        }
    }
}

#[derive(Debug, Default)]
pub struct ScriptedAgent {
    behaviors: BTreeMap<String, Behavior>,
    invocations: BTreeMap<String, usize>,
}

impl ScriptedAgent {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read agent script from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse agent script from {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: ScriptFile = serde_yaml::from_str(content)?;
        Ok(Self {
            behaviors: file
                .capabilities
                .into_iter()
                .map(|(name, script)| (name, script.into()))
                .collect(),
            invocations: BTreeMap::new(),
        })
    }

    pub fn invocation_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.invocations.iter().map(|(name, n)| (name.as_str(), *n))
    }

    fn invoke(&mut self, name: &str, kwargs: &Kwargs) -> CapabilityResult {
        let n = self.invocations.entry(name.to_string()).or_insert(0);
        let index = *n;
        *n += 1;

        let Some(behavior) = self.behaviors.get(name) else {
            return Err(CapabilityFailure::new(format!("no script for `{name}`")));
        };
        tracing::info!(capability = name, kwargs = ?kwargs, invocation = index, "invoke");

        if let Some(message) = &behavior.fail {
            return Err(CapabilityFailure::new(message.clone()));
        }
        if behavior.results.is_empty() {
            return Ok(true);
        }
        Ok(behavior.results[index % behavior.results.len()])
    }
}

impl Agent for ScriptedAgent {
    fn capability(&self, name: &str) -> Option<Capability<Self>> {
        if !self.behaviors.contains_key(name) {
            return None;
        }
        let name = name.to_string();
        Some(Capability::new(move |agent: &mut ScriptedAgent, kwargs| {
            agent.invoke(&name, kwargs)
        }))
    }
}
