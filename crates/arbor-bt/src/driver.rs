//! Entry points from a document to a compiled root node.

use std::path::Path;

use crate::{parse_document, CompileError, CompileResult, Compiler, CompilerConfig, Node};

/// Load and compile the tree at `path` with the default configuration.
pub fn load_tree(path: &Path) -> CompileResult<Node> {
    load_tree_with(path, &CompilerConfig::default())
}

pub fn load_tree_with(path: &Path, config: &CompilerConfig) -> CompileResult<Node> {
    let xml = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root = parse_tree(&xml, config)?;
    tracing::info!(
        path = %path.display(),
        nodes = root.node_count(),
        "Loaded behavior tree"
    );
    Ok(root)
}

/// Compile a tree from document text.
pub fn parse_tree(xml: &str, config: &CompilerConfig) -> CompileResult<Node> {
    let spec = parse_document(xml, config)?;
    Compiler::new(config).compile(&spec)
}
