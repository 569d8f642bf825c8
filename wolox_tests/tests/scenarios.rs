//! Every built-in scenario passes.

#[test]
fn all_scenarios_pass() {
    let failures: Vec<String> = wolox_tests::scenarios()
        .into_iter()
        .filter_map(|s| (s.run)().err().map(|e| format!("{}: {e}", s.id)))
        .collect();
    assert!(failures.is_empty(), "failed scenarios: {failures:#?}");
}
