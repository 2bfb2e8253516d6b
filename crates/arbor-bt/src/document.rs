//! Reads XML tree documents into node descriptions.
//!
//! Expected layout:
//!
//! ```xml
//! <Document>
//!   <BehaviorTree>
//!     <Nodes>
//!       <Node Class="BT.Composites.Sequence">
//!         <Children>
//!           <Node Class="BT.Conditions.HasTarget"/>
//!           <Node Class="BT.Actions.Attack" Damage="3" _DamageType="int"/>
//!         </Children>
//!       </Node>
//!     </Nodes>
//!   </BehaviorTree>
//! </Document>
//! ```
//!
//! Element names are not significant. A node is any element carrying the qualifier attribute; an
//! element without it is a container and is looked through once. The `<Nodes>` wrapper around the
//! top-level node is optional, as is the `<Children>` wrapper around child nodes.

use std::collections::BTreeMap;

use roxmltree::{Document, Node as XmlNode};

use crate::{CompileError, CompileResult, CompilerConfig, NodeSpec};

/// Parse a whole document and return the description of its top-level node.
pub fn parse_document(xml: &str, config: &CompilerConfig) -> CompileResult<NodeSpec> {
    let doc = Document::parse(xml)
        .map_err(|e| CompileError::MalformedDocument(format!("invalid XML: {e}")))?;

    let container = single_element(doc.root_element(), "document root")?;
    let top = single_element(container, "tree container")?;
    let top = if is_node(top, config) {
        top
    } else {
        let inner = single_element(top, "node list")?;
        if !is_node(inner, config) {
            return Err(not_a_node(inner, config));
        }
        inner
    };

    read_node(top, config)
}

fn read_node(el: XmlNode<'_, '_>, config: &CompilerConfig) -> CompileResult<NodeSpec> {
    let qualifier = el
        .attribute(config.qualifier_attribute.as_str())
        .ok_or_else(|| not_a_node(el, config))?;
    let (namespace, category, kind) = split_qualifier(qualifier).ok_or_else(|| {
        CompileError::MalformedDocument(format!(
            "qualifier {qualifier:?} on line {} is not `Namespace.Category.Kind`",
            line_of(el)
        ))
    })?;

    let attributes: BTreeMap<String, String> = el
        .attributes()
        .filter(|a| a.name() != config.qualifier_attribute)
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();

    let mut children = Vec::new();
    for child in elements(el) {
        if is_node(child, config) {
            children.push(read_node(child, config)?);
            continue;
        }
        for nested in elements(child) {
            if !is_node(nested, config) {
                return Err(not_a_node(nested, config));
            }
            children.push(read_node(nested, config)?);
        }
    }

    Ok(NodeSpec {
        namespace: namespace.to_string(),
        category: category.to_string(),
        kind: kind.to_string(),
        attributes,
        children,
    })
}

fn split_qualifier(qualifier: &str) -> Option<(&str, &str, &str)> {
    let mut parts = qualifier.split('.');
    let namespace = parts.next()?;
    let category = parts.next()?;
    let kind = parts.next()?;
    if parts.next().is_some() || [namespace, category, kind].iter().any(|p| p.is_empty()) {
        return None;
    }
    Some((namespace, category, kind))
}

fn elements<'a, 'input>(
    node: XmlNode<'a, 'input>,
) -> impl Iterator<Item = XmlNode<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn is_node(el: XmlNode<'_, '_>, config: &CompilerConfig) -> bool {
    el.has_attribute(config.qualifier_attribute.as_str())
}

fn single_element<'a, 'input>(
    node: XmlNode<'a, 'input>,
    what: &str,
) -> CompileResult<XmlNode<'a, 'input>> {
    let mut it = elements(node);
    match (it.next(), it.next()) {
        (Some(el), None) => Ok(el),
        (None, _) => Err(CompileError::MalformedDocument(format!(
            "{what} <{}> on line {} has no child element",
            node.tag_name().name(),
            line_of(node)
        ))),
        (Some(_), Some(_)) => Err(CompileError::MalformedDocument(format!(
            "{what} <{}> on line {} has more than one child element",
            node.tag_name().name(),
            line_of(node)
        ))),
    }
}

fn not_a_node(el: XmlNode<'_, '_>, config: &CompilerConfig) -> CompileError {
    CompileError::MalformedDocument(format!(
        "element <{}> on line {} has no `{}` attribute",
        el.tag_name().name(),
        line_of(el),
        config.qualifier_attribute
    ))
}

fn line_of(node: XmlNode<'_, '_>) -> u32 {
    node.document().text_pos_at(node.range().start).row
}
