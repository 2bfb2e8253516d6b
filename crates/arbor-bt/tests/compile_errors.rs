use arbor_bt::{Arity, Category, CompileError, Compiler, CompilerConfig, NodeSpec};

fn compile(spec: &NodeSpec) -> Result<arbor_bt::Node, CompileError> {
    Compiler::new(&CompilerConfig::default()).compile(spec)
}

#[test]
fn unknown_category() {
    let spec = NodeSpec::composite("Sequence").child(NodeSpec::new("Services", "Ping"));
    let err = compile(&spec).unwrap_err();
    match err {
        CompileError::UnknownNodeCategory { category, path } => {
            assert_eq!(category, "Services");
            assert_eq!(path, "Sequence/0:Ping");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_kind_per_category() {
    let err = compile(&NodeSpec::composite("RandomSelector").child(NodeSpec::action("Idle")))
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnknownNodeKind { category: Category::Composite, ref kind, .. }
            if kind == "RandomSelector"
    ));

    let err = compile(&NodeSpec::decorator("Inverter").child(NodeSpec::action("Idle")))
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnknownNodeKind { category: Category::Decorator, .. }
    ));
    assert_eq!(err.to_string(), "unknown decorator kind `Inverter` at Inverter");
}

#[test]
fn composite_without_children() {
    let err = compile(&NodeSpec::composite("Selector")).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Structure { expected: Arity::AtLeast(1), found: 0, .. }
    ));
}

#[test]
fn loop_needs_exactly_one_child() {
    let none = NodeSpec::decorator("Loop").attr("Count", "2");
    let two = NodeSpec::decorator("Loop")
        .attr("Count", "2")
        .children([NodeSpec::action("A"), NodeSpec::action("B")]);

    for spec in [none, two] {
        let err = compile(&spec).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Structure { expected: Arity::Exactly(1), .. }
        ));
    }
}

#[test]
fn leaves_cannot_have_children() {
    let spec = NodeSpec::condition("Ready").child(NodeSpec::action("Go"));
    assert!(matches!(
        compile(&spec).unwrap_err(),
        CompileError::Structure { expected: Arity::Exactly(0), found: 1, .. }
    ));
}

#[test]
fn loop_count_must_be_a_non_negative_integer() {
    let missing = NodeSpec::decorator("Loop").child(NodeSpec::action("A"));
    assert!(matches!(
        compile(&missing).unwrap_err(),
        CompileError::MissingAttribute { ref attribute, .. } if attribute == "Count"
    ));

    for bad in ["-1", "two", "1.5", ""] {
        let spec = NodeSpec::decorator("Loop")
            .attr("Count", bad)
            .child(NodeSpec::action("A"));
        assert!(
            matches!(compile(&spec).unwrap_err(), CompileError::InvalidAttribute { .. }),
            "count {bad:?} should be rejected"
        );
    }
}

#[test]
fn loop_count_may_carry_a_type_tag() {
    let spec = NodeSpec::decorator("Loop")
        .typed_attr("Count", "4", "int")
        .child(NodeSpec::action("A"));
    let node = compile(&spec).unwrap();
    let arbor_bt::Node::Loop(lp) = &node else {
        panic!("expected a Loop");
    };
    assert_eq!(lp.count(), 4);
}

#[test]
fn coercion_errors_carry_the_node_path() {
    let spec = NodeSpec::composite("Sequence").children([
        NodeSpec::condition("Ok"),
        NodeSpec::repeat(
            2,
            NodeSpec::action("Attack").typed_attr("Damage", "3", "double"),
        ),
    ]);
    let err = compile(&spec).unwrap_err();
    match err {
        CompileError::UnknownAttributeType {
            attribute,
            type_name,
            path,
        } => {
            assert_eq!(attribute, "Damage");
            assert_eq!(type_name, "double");
            assert_eq!(path, "Sequence/1:Loop/0:Attack");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_type_tag_fails_compilation() {
    let spec = NodeSpec::action("Wait").attr("Seconds", "3");
    assert!(matches!(
        compile(&spec).unwrap_err(),
        CompileError::MissingTypeTag { .. }
    ));
}
