use arbor_core::Kwargs;

use crate::{CompileError, CompileResult, CompilerConfig, NodeSpec};

/// Turn a leaf's declared `(value, type tag)` attribute pairs into keyword arguments.
///
/// The qualifier and every attribute starting with the metadata prefix are skipped. Each remaining
/// attribute `Name` needs a `_NameType` tag naming `int`, `float` or `string`; the keyword is
/// `name` lower-cased.
pub fn coerce_attributes(
    spec: &NodeSpec,
    config: &CompilerConfig,
    path: &str,
) -> CompileResult<Kwargs> {
    let mut kwargs = Kwargs::new();

    for (name, raw) in &spec.attributes {
        if config.is_metadata(name) {
            continue;
        }

        let tag_name = config.type_tag_name(name);
        let Some(tag) = spec.attributes.get(&tag_name) else {
            return Err(CompileError::MissingTypeTag {
                attribute: name.clone(),
                tag: tag_name,
                path: path.to_string(),
            });
        };

        let Some(ty) = config.value_type(tag) else {
            return Err(CompileError::UnknownAttributeType {
                attribute: name.clone(),
                type_name: tag.clone(),
                path: path.to_string(),
            });
        };

        let value = ty.parse(raw).map_err(|e| CompileError::InvalidAttribute {
            attribute: name.clone(),
            value: raw.clone(),
            reason: e.to_string(),
            path: path.to_string(),
        })?;

        if kwargs.insert(name.to_lowercase(), value).is_some() {
            return Err(CompileError::InvalidAttribute {
                attribute: name.clone(),
                value: raw.clone(),
                reason: "keyword already bound by another attribute differing only in case"
                    .to_string(),
                path: path.to_string(),
            });
        }
    }

    Ok(kwargs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::Value;

    fn coerce(spec: &NodeSpec) -> CompileResult<Kwargs> {
        coerce_attributes(spec, &CompilerConfig::default(), "test")
    }

    fn coerce_legacy(spec: &NodeSpec) -> CompileResult<Kwargs> {
        let config = CompilerConfig {
            legacy_type_tags: true,
            ..CompilerConfig::default()
        };
        coerce_attributes(spec, &config, "test")
    }

    #[test]
    fn int_float_and_string_attributes() {
        let spec = NodeSpec::action("MoveTo")
            .typed_attr("Steps", "3", "int")
            .typed_attr("Speed", "2.5", "float")
            .typed_attr("Label", "北へ", "string");

        let kwargs = coerce(&spec).unwrap();
        assert_eq!(kwargs.get("steps"), Some(&Value::Int(3)));
        assert_eq!(kwargs.get("speed"), Some(&Value::Float(2.5)));
        assert_eq!(kwargs.get("label"), Some(&Value::Str("北へ".to_string())));
        assert_eq!(kwargs.len(), 3);
    }

    #[test]
    fn metadata_attributes_are_not_keywords() {
        let spec = NodeSpec::condition("Ready")
            .attr("Class", "BT.Conditions.Ready")
            .attr("_Comment", "ignored");
        assert!(coerce(&spec).unwrap().is_empty());
    }

    #[test]
    fn missing_type_tag() {
        let spec = NodeSpec::action("Wait").attr("Seconds", "1");
        let err = coerce(&spec).unwrap_err();
        assert!(matches!(
            err,
            CompileError::MissingTypeTag { ref attribute, ref tag, .. }
                if attribute == "Seconds" && tag == "_SecondsType"
        ));
    }

    #[test]
    fn unknown_type_tag() {
        let spec = NodeSpec::action("Wait").typed_attr("Seconds", "1", "bool");
        let err = coerce(&spec).unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnknownAttributeType { ref type_name, .. } if type_name == "bool"
        ));
    }

    #[test]
    fn str_tag_needs_legacy_type_tags() {
        let spec = NodeSpec::action("Say").typed_attr("Text", "hi", "str");
        assert!(matches!(
            coerce(&spec).unwrap_err(),
            CompileError::UnknownAttributeType { ref type_name, .. } if type_name == "str"
        ));

        let kwargs = coerce_legacy(&spec).unwrap();
        assert_eq!(kwargs.str("text"), Some("hi"));
    }

    #[test]
    fn legacy_type_tags_leave_other_tags_alone() {
        let spec = NodeSpec::action("Wait").typed_attr("Seconds", "1", "String");
        assert!(matches!(
            coerce_legacy(&spec).unwrap_err(),
            CompileError::UnknownAttributeType { .. }
        ));
    }

    #[test]
    fn unparsable_value() {
        let spec = NodeSpec::action("Wait").typed_attr("Seconds", "soon", "float");
        assert!(matches!(
            coerce(&spec).unwrap_err(),
            CompileError::InvalidAttribute { .. }
        ));
    }

    #[test]
    fn keywords_colliding_after_lowercasing() {
        let spec = NodeSpec::action("Wait")
            .typed_attr("Range", "1", "int")
            .typed_attr("RANGE", "2", "int");
        assert!(matches!(
            coerce(&spec).unwrap_err(),
            CompileError::InvalidAttribute { .. }
        ));
    }
}
