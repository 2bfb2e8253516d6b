use crate::coerce::coerce_attributes;
use crate::nodes::{Action, Alternate, Condition, Loop, Node, Parallel, Selector, Sequence};
use crate::{Arity, Category, CompileError, CompileResult, CompilerConfig, NodeSpec};

/// Compiles node descriptions into executable nodes.
///
/// Compilation is a single top-down recursive pass. Children are compiled before their parent is
/// constructed, so ticking never re-enters the compiler.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    config: &'a CompilerConfig,
}

impl<'a> Compiler<'a> {
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self { config }
    }

    pub fn compile(&self, spec: &NodeSpec) -> CompileResult<Node> {
        self.compile_at(spec, spec.kind.clone())
    }

    fn compile_at(&self, spec: &NodeSpec, path: String) -> CompileResult<Node> {
        let Some(category) = Category::from_segment(&spec.category) else {
            return Err(CompileError::UnknownNodeCategory {
                category: spec.category.clone(),
                path,
            });
        };

        let node = match category {
            Category::Composite => self.composite(spec, &path)?,
            Category::Decorator => self.decorator(spec, &path)?,
            Category::Condition => {
                expect_children(spec, &path, Arity::Exactly(0))?;
                let kwargs = coerce_attributes(spec, self.config, &path)?;
                Node::Condition(Condition::new(
                    self.config.capability_name(&spec.kind),
                    kwargs,
                    path.clone(),
                ))
            }
            Category::Action => {
                expect_children(spec, &path, Arity::Exactly(0))?;
                let kwargs = coerce_attributes(spec, self.config, &path)?;
                Node::Action(Action::new(
                    self.config.capability_name(&spec.kind),
                    kwargs,
                    path.clone(),
                ))
            }
        };

        tracing::debug!(path = %path, category = %category, "compiled node");
        Ok(node)
    }

    fn composite(&self, spec: &NodeSpec, path: &str) -> CompileResult<Node> {
        let make: fn(Vec<Node>) -> Node = match spec.kind.as_str() {
            "Selector" => |c| Node::Selector(Selector::new(c)),
            "Sequence" => |c| Node::Sequence(Sequence::new(c)),
            "Parallel" => |c| Node::Parallel(Parallel::new(c)),
            "Alternate" => |c| Node::Alternate(Alternate::new(c)),
            _ => return Err(unknown_kind(Category::Composite, spec, path)),
        };

        expect_children(spec, path, Arity::AtLeast(1))?;
        let children = self.children(spec, path)?;
        Ok(make(children))
    }

    fn decorator(&self, spec: &NodeSpec, path: &str) -> CompileResult<Node> {
        match spec.kind.as_str() {
            "Loop" => {
                expect_children(spec, path, Arity::Exactly(1))?;
                let count = self.loop_count(spec, path)?;
                let child = self
                    .children(spec, path)?
                    .pop()
                    .ok_or_else(|| structure_error(spec, path, Arity::Exactly(1)))?;
                Ok(Node::Loop(Loop::new(count, child)))
            }
            _ => Err(unknown_kind(Category::Decorator, spec, path)),
        }
    }

    fn children(&self, spec: &NodeSpec, path: &str) -> CompileResult<Vec<Node>> {
        spec.children
            .iter()
            .enumerate()
            .map(|(i, child)| self.compile_at(child, format!("{path}/{i}:{}", child.kind)))
            .collect()
    }

    fn loop_count(&self, spec: &NodeSpec, path: &str) -> CompileResult<u32> {
        let attribute = &self.config.loop_count_attribute;
        let Some(raw) = spec.attributes.get(attribute) else {
            return Err(CompileError::MissingAttribute {
                attribute: attribute.clone(),
                path: path.to_string(),
            });
        };

        raw.trim()
            .parse::<u32>()
            .map_err(|e| CompileError::InvalidAttribute {
                attribute: attribute.clone(),
                value: raw.clone(),
                reason: format!("expected a non-negative integer ({e})"),
                path: path.to_string(),
            })
    }
}

fn expect_children(spec: &NodeSpec, path: &str, expected: Arity) -> CompileResult<()> {
    let found = spec.children.len();
    let ok = match expected {
        Arity::AtLeast(n) => found >= n,
        Arity::Exactly(n) => found == n,
    };
    if ok {
        Ok(())
    } else {
        Err(structure_error(spec, path, expected))
    }
}

fn structure_error(spec: &NodeSpec, path: &str, expected: Arity) -> CompileError {
    CompileError::Structure {
        kind: spec.kind.clone(),
        path: path.to_string(),
        expected,
        found: spec.children.len(),
    }
}

fn unknown_kind(category: Category, spec: &NodeSpec, path: &str) -> CompileError {
    CompileError::UnknownNodeKind {
        category,
        kind: spec.kind.clone(),
        path: path.to_string(),
    }
}
