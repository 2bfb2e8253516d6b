use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Node category, as named by the middle segment of a qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Category {
    Composite,
    Decorator,
    Condition,
    Action,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Composite,
        Category::Decorator,
        Category::Condition,
        Category::Action,
    ];

    /// The qualifier segment, e.g. `Composites`.
    pub fn segment(self) -> &'static str {
        match self {
            Category::Composite => "Composites",
            Category::Decorator => "Decorators",
            Category::Condition => "Conditions",
            Category::Action => "Actions",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.segment() == segment)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Composite => "composite",
            Category::Decorator => "decorator",
            Category::Condition => "condition",
            Category::Action => "action",
        })
    }
}

/// Declarative description of one node, before compilation.
///
/// `category` is kept as raw text so an unknown category is reported by the compiler, with a
/// node path, rather than by whoever produced the description. `attributes` holds raw values and
/// their type tags side by side (`Range` next to `_RangeType`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct NodeSpec {
    pub namespace: String,
    pub category: String,
    pub kind: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(category: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            namespace: "BT".to_string(),
            category: category.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn composite(kind: impl Into<String>) -> Self {
        Self::new(Category::Composite.segment(), kind)
    }

    pub fn decorator(kind: impl Into<String>) -> Self {
        Self::new(Category::Decorator.segment(), kind)
    }

    /// A `Loop` decorator with its repeat count and child.
    pub fn repeat(count: u32, child: NodeSpec) -> Self {
        Self::decorator("Loop")
            .attr("Count", count.to_string())
            .child(child)
    }

    pub fn condition(kind: impl Into<String>) -> Self {
        Self::new(Category::Condition.segment(), kind)
    }

    pub fn action(kind: impl Into<String>) -> Self {
        Self::new(Category::Action.segment(), kind)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add an attribute together with its `_{name}Type` tag.
    pub fn typed_attr(
        self,
        name: impl Into<String>,
        value: impl Into<String>,
        type_tag: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let tag_name = format!("_{name}Type");
        self.attr(name, value).attr(tag_name, type_tag)
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }

    /// `Namespace.Category.Kind`.
    pub fn qualifier(&self) -> String {
        format!("{}.{}.{}", self.namespace, self.category, self.kind)
    }
}
