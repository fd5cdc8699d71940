use std::collections::HashMap;

use test_case::test_case;

use crate::config::SchedulerConfig;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = SchedulerConfig::default();
    assert_eq!(config.max_passes, 32);
    assert!(config.collect_garbage);
    assert!(!config.dump_graphs);
    assert_eq!(SchedulerConfig::builder().build(), config);
}

#[test]
fn test_builder_overrides() {
    let config = SchedulerConfig::builder().max_passes(4).collect_garbage(false).dump_graphs(true).build();
    assert_eq!(config, SchedulerConfig { max_passes: 4, collect_garbage: false, dump_graphs: true });
}

#[test]
fn test_from_empty_environment() {
    assert_eq!(SchedulerConfig::from_lookup(lookup(&[])), SchedulerConfig::default());
}

#[test_case("8", 8 ; "number")]
#[test_case("lots", 32 ; "garbage falls back")]
#[test_case("-1", 32 ; "negative falls back")]
fn test_max_passes_from_environment(raw: &str, expected: usize) {
    let config = SchedulerConfig::from_lookup(lookup(&[("GRAFT_MAX_PASSES", raw)]));
    assert_eq!(config.max_passes, expected);
}

#[test]
fn test_flags_from_environment() {
    let config = SchedulerConfig::from_lookup(lookup(&[("GRAFT_NO_GC", "1"), ("GRAFT_DUMP_GRAPHS", "")]));
    assert!(!config.collect_garbage);
    assert!(config.dump_graphs);
}
