use reporter_core::{Phase, ProgressSnapshot, StageKey};

fn key(index: u8) -> StageKey {
    StageKey::new(index).unwrap()
}

#[test]
fn parses_sparse_progress_objects() {
    let snapshot: ProgressSnapshot = serde_json::from_str(r#"{"p0": 50, "p3": 12.5}"#).unwrap();

    assert_eq!(snapshot.get(key(0)), Some(50.0));
    assert_eq!(snapshot.get(key(3)), Some(12.5));
    assert_eq!(snapshot.get(key(1)), None);
}

#[test]
fn empty_object_means_no_update_this_tick() {
    let snapshot: ProgressSnapshot = serde_json::from_str("{}").unwrap();

    assert!(snapshot.is_empty());
}

#[test]
fn unknown_and_non_numeric_fields_are_dropped() {
    let snapshot: ProgressSnapshot =
        serde_json::from_str(r#"{"p2": 40, "p99": 10, "note": "warming up", "phase": null}"#)
            .unwrap();

    assert_eq!(snapshot.iter().collect::<Vec<_>>(), vec![(key(2), 40.0)]);
}

#[test]
fn stage_keys_round_trip_their_wire_spelling() {
    for index in 0..16 {
        let key = key(index);
        assert_eq!(key.to_string().parse::<StageKey>().unwrap(), key);
    }

    assert!("p16".parse::<StageKey>().is_err());
    assert!("p07".parse::<StageKey>().is_err());
    assert!("q5".parse::<StageKey>().is_err());
    assert!("p".parse::<StageKey>().is_err());
}

#[test]
fn phases_partition_the_stage_keys() {
    let dict_keys: Vec<_> = Phase::Dictionaries.stages().iter().map(|s| s.key).collect();
    let report_keys: Vec<_> = Phase::Reports.stages().iter().map(|s| s.key).collect();

    assert_eq!(dict_keys, (0..=5).map(key).collect::<Vec<_>>());
    assert_eq!(report_keys, (6..=15).map(key).collect::<Vec<_>>());
    assert_eq!(Phase::Dictionaries.terminal_key(), key(5));
    assert_eq!(Phase::Reports.terminal_key(), key(15));
    assert!(Phase::Dictionaries.owns(key(5)));
    assert!(!Phase::Dictionaries.owns(key(6)));
}
