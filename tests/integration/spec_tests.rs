use benchlog_core::results::{merge_results, parse_results};
use benchlog_core::{
    decode, encode, Commit, CoreError, DuplicatePolicy, Extra, Identity, Run, RunBuilder,
    Snapshot,
};
use benchlog_store::{HistoryStore, StoreConfig, StoreError};

const PUBLISHED: &str = include_str!("fixtures/data.js");

fn make_test_store(policy: DuplicatePolicy) -> (tempfile::TempDir, HistoryStore) {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = StoreConfig::new("https://github.com/StanfordVL/OmniGibson");
    config.duplicates = policy;
    config.lock_backoff_ms = 1;
    let store = HistoryStore::init(&tmp.path().join("benchmark"), config).unwrap();
    (tmp, store)
}

fn commit(id: &str) -> Commit {
    Commit {
        author: Identity::new("StanfordVL").with_username("StanfordVL"),
        committer: Identity::new("StanfordVL").with_username("StanfordVL"),
        distinct: None,
        id: id.to_string(),
        message: "Profiling".to_string(),
        timestamp: "2023-04-12T17:22:44Z".to_string(),
        tree_id: None,
        url: format!("https://github.com/StanfordVL/OmniGibson/commit/{id}"),
    }
}

fn fps_run(id: &str, date: u64, fps: f64) -> Run {
    let benches = parse_results(&format!(
        r#"[{{"name": "Total step fps (Rs_int)", "unit": "fps", "value": {fps}}}]"#
    ))
    .unwrap();
    RunBuilder::new(commit(id), "biggerIsBetter")
        .date(date)
        .benches(benches)
        .build()
        .unwrap()
}

// === Test 1: Published history loads and exports unchanged ===
#[test]
fn test_published_history_roundtrip() {
    let snapshot = decode(PUBLISHED).unwrap();
    assert_eq!(snapshot.repo_url, "https://github.com/StanfordVL/OmniGibson");
    assert_eq!(snapshot.last_update, 1681329644775);

    let runs = snapshot.suite("Benchmark").unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].benches.len(), 5);
    assert_eq!(runs[0].tool.as_str(), "customBiggerIsBetter");

    assert_eq!(encode(&snapshot).unwrap(), PUBLISHED.trim_end());
}

// === Test 2: Appending to an empty store ===
#[test]
fn test_append_to_empty_store() {
    let (_tmp, store) = make_test_store(DuplicatePolicy::Skip);
    let snapshot = store.append("Benchmark", fps_run("a", 100, 35.6)).unwrap();

    assert_eq!(snapshot.suite("Benchmark").unwrap().len(), 1);
    assert_eq!(snapshot.last_update, 100);
    assert_eq!(store.load().unwrap(), snapshot);
}

// === Test 3: Second run lands after the first ===
#[test]
fn test_second_append_preserves_order() {
    let (_tmp, store) = make_test_store(DuplicatePolicy::Skip);
    store.append("Benchmark", fps_run("a", 100, 35.6)).unwrap();
    let snapshot = store.append("Benchmark", fps_run("b", 200, 36.1)).unwrap();

    let dates: Vec<u64> = snapshot
        .suite("Benchmark")
        .unwrap()
        .iter()
        .map(|r| r.date)
        .collect();
    assert_eq!(dates, vec![100, 200]);
    assert_eq!(snapshot.last_update, 200);
}

// === Test 4: A run without a date is rejected and nothing changes ===
#[test]
fn test_missing_date_rejected() {
    let (_tmp, store) = make_test_store(DuplicatePolicy::Skip);
    store.append("Benchmark", fps_run("a", 100, 35.6)).unwrap();
    let before = std::fs::read_to_string(store.data_file()).unwrap();

    let mut value = serde_json::to_value(fps_run("b", 200, 1.0)).unwrap();
    value.as_object_mut().unwrap().remove("date");
    assert!(matches!(Run::from_value(value), Err(CoreError::InvalidRun(_))));

    let missing = RunBuilder::new(commit("b"), "biggerIsBetter").build();
    assert!(matches!(missing, Err(CoreError::InvalidRun(_))));

    let snapshot = store.load().unwrap();
    assert_eq!(snapshot.suite("Benchmark").unwrap().len(), 1);
    assert_eq!(snapshot.last_update, 100);
    assert_eq!(std::fs::read_to_string(store.data_file()).unwrap(), before);
}

// === Test 5: Appending onto the published history keeps it as a prefix ===
#[test]
fn test_append_onto_published_history() {
    let (_tmp, store) = make_test_store(DuplicatePolicy::Reject);
    std::fs::write(store.data_file(), PUBLISHED).unwrap();
    let before = store.load().unwrap();

    let after = store
        .append("Benchmark", fps_run("e1f2", 1681400000000, 37.2))
        .unwrap();
    store
        .append("Nightly", fps_run("e1f2", 1681400000001, 12.0))
        .unwrap();

    let old = before.suite("Benchmark").unwrap();
    let new = after.suite("Benchmark").unwrap();
    assert_eq!(&new[..old.len()], old);
    assert_eq!(new.len(), old.len() + 1);

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.suite("Benchmark").unwrap(), new);
    assert_eq!(reloaded.last_update, 1681400000001);
    assert_eq!(
        reloaded.entries.names().collect::<Vec<_>>(),
        vec!["Benchmark", "Nightly"]
    );
}

// === Test 6: Export is stable across load cycles ===
#[test]
fn test_export_load_export_stable() {
    let (_tmp, store) = make_test_store(DuplicatePolicy::Append);
    for (i, fps) in [35.66254185092182, 72855.72346708355, 754.0].iter().enumerate() {
        store
            .append("Benchmark", fps_run(&format!("c{i}"), 100 + i as u64, *fps))
            .unwrap();
    }
    let first = store.export().unwrap();
    let second = encode(&decode(&first).unwrap()).unwrap();
    assert_eq!(first, second);
}

// === Test 7: Duplicate submissions follow the configured policy ===
#[test]
fn test_duplicate_policies() {
    let (_tmp, skip) = make_test_store(DuplicatePolicy::Skip);
    skip.append("Benchmark", fps_run("a", 100, 1.0)).unwrap();
    let snapshot = skip.append("Benchmark", fps_run("a", 100, 1.0)).unwrap();
    assert_eq!(snapshot.suite("Benchmark").unwrap().len(), 1);

    let (_tmp, reject) = make_test_store(DuplicatePolicy::Reject);
    reject.append("Benchmark", fps_run("a", 100, 1.0)).unwrap();
    let err = reject
        .append("Benchmark", fps_run("a", 100, 1.0))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Core(CoreError::DuplicateRun { ref suite, .. }) if suite == "Benchmark"
    ));

    let (_tmp, append) = make_test_store(DuplicatePolicy::Append);
    append.append("Benchmark", fps_run("a", 100, 1.0)).unwrap();
    let snapshot = append.append("Benchmark", fps_run("a", 100, 1.0)).unwrap();
    assert_eq!(snapshot.suite("Benchmark").unwrap().len(), 2);
}

// === Test 8: Result files accumulate into one run ===
#[test]
fn test_result_files_become_a_run() {
    let scene = r#"[{"name": "Rs_int, flatcache on", "unit": "fps", "value": 211.98904752097184, "extra": ["Physics step time", "Physics step time"]}]"#;
    let empty = r#"[{"name": "Empty scene", "unit": "fps", "value": 754, "extra": "Total frame time"}]"#;

    let merged = merge_results(None, &parse_results(scene).unwrap()).unwrap();
    let merged = merge_results(Some(&merged), &parse_results(empty).unwrap()).unwrap();
    let benches = parse_results(&merged).unwrap();

    let (_tmp, store) = make_test_store(DuplicatePolicy::Skip);
    let run = RunBuilder::new(commit("abc"), "customBiggerIsBetter")
        .date(1681329644173)
        .benches(benches)
        .build()
        .unwrap();
    store.append("Benchmark", run).unwrap();

    let text = store.export().unwrap();
    assert!(text.contains("\"value\": 754,"));
    assert!(text.contains("\"extra\": \"Total frame time\""));
    assert!(text.contains("\"extra\": [\n              \"Physics step time\","));

    let reloaded = store.load().unwrap();
    let stored = &reloaded.suite("Benchmark").unwrap()[0].benches;
    assert!(matches!(stored[0].extra, Some(Extra::List(_))));
    assert!(matches!(stored[1].extra, Some(Extra::Text(_))));
}

// === Test 9: Corrupt persisted state is surfaced, never replaced ===
#[test]
fn test_corrupt_state_not_overwritten() {
    let (_tmp, store) = make_test_store(DuplicatePolicy::Skip);
    let truncated = &PUBLISHED[..PUBLISHED.len() / 2];
    std::fs::write(store.data_file(), truncated).unwrap();

    assert!(matches!(
        store.load(),
        Err(StoreError::Core(CoreError::CorruptState { .. }))
    ));
    assert!(store.append("Benchmark", fps_run("a", 100, 1.0)).is_err());
    assert_eq!(std::fs::read_to_string(store.data_file()).unwrap(), truncated);
}

// === Test 10: Writers from several threads never lose runs ===
#[test]
fn test_concurrent_writers() {
    let (_tmp, store) = make_test_store(DuplicatePolicy::Reject);
    let dir = store.dir().to_path_buf();
    std::thread::scope(|s| {
        for t in 0..3u64 {
            let dir = dir.clone();
            s.spawn(move || {
                let writer = HistoryStore::open(&dir).unwrap();
                for i in 0..4u64 {
                    // one shared suite, so dates must stay non-decreasing
                    // across writers; retry with a fresh date on conflict
                    loop {
                        let date = std::time::SystemTime::now()
                            .duration_since(std::time::UNIX_EPOCH)
                            .unwrap()
                            .as_nanos() as u64;
                        match writer.append("Benchmark", fps_run(&format!("{t}-{i}"), date, 1.0)) {
                            Ok(_) => break,
                            Err(StoreError::LockContention(_)) => continue,
                            Err(StoreError::Core(CoreError::InvalidRun(_))) => continue,
                            Err(e) => panic!("append failed: {e}"),
                        }
                    }
                }
            });
        }
    });

    let snapshot: Snapshot = store.load().unwrap();
    let runs = snapshot.suite("Benchmark").unwrap();
    assert_eq!(runs.len(), 12);
    assert!(runs.windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!(snapshot.last_update, runs.last().unwrap().date);
}

// === Test 11: Re-running an older CI job after a newer one landed ===
#[test]
fn test_rerun_of_older_job_is_skipped() {
    let (_tmp, store) = make_test_store(DuplicatePolicy::Skip);
    store.append("Benchmark", fps_run("a", 100, 35.6)).unwrap();
    store.append("Benchmark", fps_run("b", 200, 36.1)).unwrap();
    let before = std::fs::read_to_string(store.data_file()).unwrap();

    let snapshot = store.append("Benchmark", fps_run("a", 100, 35.6)).unwrap();
    assert_eq!(snapshot.suite("Benchmark").unwrap().len(), 2);
    assert_eq!(snapshot.last_update, 200);
    assert_eq!(std::fs::read_to_string(store.data_file()).unwrap(), before);
}
