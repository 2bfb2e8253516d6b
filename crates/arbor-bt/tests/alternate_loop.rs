mod common;

use arbor_bt::{BtStatus, Node, NodeSpec};
use common::{compile, names, tick, Recorder, Reply};
use proptest::prelude::*;

fn alternate_over(outcomes: &[bool]) -> (NodeSpec, Recorder) {
    let names = names(outcomes.len());
    let spec = NodeSpec::composite("Alternate").children(names.iter().map(NodeSpec::action));
    let agent = names
        .iter()
        .zip(outcomes)
        .fold(Recorder::new(), |agent, (name, ok)| agent.always(name, *ok));
    (spec, agent)
}

proptest! {
    #[test]
    fn alternate_cycles_through_children(outcomes in prop::collection::vec(any::<bool>(), 1..6)) {
        let (spec, mut agent) = alternate_over(&outcomes);
        let mut tree = compile(&spec);
        let n = outcomes.len();

        for round in 0..2 {
            for (i, ok) in outcomes.iter().enumerate() {
                let (result, _) = tick(&mut tree, &mut agent);
                prop_assert_eq!(result, Ok(BtStatus::from(*ok)));
                prop_assert_eq!(agent.calls.len(), round * n + i + 1);
            }
        }

        let expected: Vec<String> = names(n).into_iter().cycle().take(2 * n).collect();
        prop_assert_eq!(agent.calls, expected);
    }

    #[test]
    fn loop_runs_child_count_times(count in 0u32..12) {
        let spec = NodeSpec::repeat(count, NodeSpec::action("Step"));
        let mut agent = Recorder::new().always("step", true);
        let mut tree = compile(&spec);

        prop_assert_eq!(tick(&mut tree, &mut agent).0, Ok(BtStatus::Success));
        prop_assert_eq!(agent.count("step"), count as usize);
    }

    #[test]
    fn loop_stops_at_first_failure((count, fail_at) in (1u32..12).prop_flat_map(|k| (Just(k), 1..=k))) {
        let mut replies = vec![Reply::Ok(true); fail_at as usize - 1];
        replies.push(Reply::Ok(false));
        let spec = NodeSpec::repeat(count, NodeSpec::action("Step"));
        let mut agent = Recorder::new().replies("step", replies);
        let mut tree = compile(&spec);

        prop_assert_eq!(tick(&mut tree, &mut agent).0, Ok(BtStatus::Failure));
        prop_assert_eq!(agent.count("step"), fail_at as usize);
    }
}

#[test]
fn alternate_cursor_is_owned_by_the_node() {
    let (spec, mut agent) = alternate_over(&[true, true, true]);
    let mut first = compile(&spec);
    let mut second = compile(&spec);

    tick(&mut first, &mut agent);
    tick(&mut first, &mut agent);
    // A fresh tree starts from the first child regardless of what the agent has seen.
    tick(&mut second, &mut agent);

    assert_eq!(agent.calls, vec!["c0", "c1", "c0"]);
    let Node::Alternate(alt) = first.root() else {
        panic!("root should be an Alternate");
    };
    assert_eq!(alt.cursor(), 2);
}

#[test]
fn alternate_advances_even_when_the_tick_aborts() {
    let spec = NodeSpec::composite("Alternate")
        .children([NodeSpec::condition("Broken"), NodeSpec::condition("Fine")]);
    let mut agent = Recorder::new()
        .failing("broken", "sensor offline")
        .always("fine", true);
    let mut tree = compile(&spec);

    assert!(tick(&mut tree, &mut agent).0.is_err());
    assert_eq!(tick(&mut tree, &mut agent).0, Ok(BtStatus::Success));
    assert_eq!(tree.last_status(), Some(BtStatus::Success));
}

#[test]
fn zero_count_loop_succeeds_without_invoking_child() {
    let spec = NodeSpec::repeat(0, NodeSpec::condition("Missing"));
    // The capability does not even exist: it must never be looked up.
    let mut agent = Recorder::new();
    let mut tree = compile(&spec);

    assert_eq!(tick(&mut tree, &mut agent).0, Ok(BtStatus::Success));
    assert!(agent.calls.is_empty());
}

#[test]
fn loop_inside_sequence_repeats_within_one_tick() {
    let spec = NodeSpec::composite("Sequence").children([
        NodeSpec::condition("Armed"),
        NodeSpec::repeat(3, NodeSpec::action("Fire")),
    ]);
    let mut agent = Recorder::new().always("armed", true).always("fire", true);
    let mut tree = compile(&spec);

    assert_eq!(tick(&mut tree, &mut agent).0, Ok(BtStatus::Success));
    assert_eq!(agent.calls, vec!["armed", "fire", "fire", "fire"]);
    assert_eq!(tree.ticks(), 1);
}
