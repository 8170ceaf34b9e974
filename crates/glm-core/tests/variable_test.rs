use glm_core::{BuildVariable, DEFAULT_IGNORED_VARS, effective_blocklist, filter_ignored};
use proptest::prelude::*;

fn vars(pairs: &[(&str, &str)]) -> Vec<BuildVariable> {
    pairs.iter().map(|(k, v)| BuildVariable::new(*k, *v)).collect()
}

fn list(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| (*k).to_owned()).collect()
}

#[test]
fn filter_drops_blocked_keys() {
    let input = vars(&[("FOO", "bar"), ("CONN", "x")]);
    let out = filter_ignored(input, &list(&["CONN"]));

    assert_eq!(out, vars(&[("FOO", "bar")]));
}

#[test]
fn filter_preserves_order_of_survivors() {
    let input = vars(&[("C", "3"), ("A", "1"), ("X", "-"), ("B", "2")]);
    let out = filter_ignored(input, &list(&["X"]));

    let keys: Vec<&str> = out.iter().map(|v| v.key.as_str()).collect();
    assert_eq!(keys, ["C", "A", "B"]);
}

#[test]
fn duplicate_blocklist_entries_are_harmless() {
    let input = vars(&[("FOO", "bar"), ("CONN", "x")]);
    let once = filter_ignored(input.clone(), &list(&["CONN"]));
    let twice = filter_ignored(input, &list(&["CONN", "CONN"]));

    assert_eq!(once, twice);
}

#[test]
fn unmatched_blocklist_entries_are_ignored() {
    let input = vars(&[("FOO", "bar")]);
    let out = filter_ignored(input.clone(), &list(&["NOT_THERE"]));

    assert_eq!(out, input);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(filter_ignored(Vec::new(), &list(&["CONN"])).is_empty());
}

#[test]
fn credentials_are_always_blocked() {
    let input = vars(&[
        ("GITLAB_PRIVATE_TOKEN", "glpat"),
        ("MARATHON_HOST", "http://m"),
        ("APP_NAME", "web"),
    ]);
    let out = filter_ignored(input, &effective_blocklist(&[]));

    assert_eq!(out, vars(&[("APP_NAME", "web")]));
    assert_eq!(DEFAULT_IGNORED_VARS.len(), 4);
}

proptest! {
    #[test]
    fn filter_keeps_exactly_the_unblocked(
        keys in prop::collection::vec("[A-E]{1,2}", 0..20),
        blocked in prop::collection::vec("[A-E]{1,2}", 0..5),
    ) {
        let input: Vec<BuildVariable> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| BuildVariable::new(k.clone(), i.to_string()))
            .collect();

        let expected: Vec<BuildVariable> = input
            .iter()
            .filter(|v| !blocked.contains(&v.key))
            .cloned()
            .collect();
        let removed = input.iter().filter(|v| blocked.contains(&v.key)).count();

        let out = filter_ignored(input.clone(), &blocked);

        prop_assert_eq!(out.len(), input.len() - removed);
        prop_assert_eq!(out, expected);
    }
}
