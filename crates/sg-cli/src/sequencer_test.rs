use super::*;
use sg_core::MigrationId;
use sg_db::MemoryStore;
use std::io;
use std::sync::Mutex;

/// Launcher that records invocations instead of replacing the process.
#[derive(Default)]
struct MockLauncher {
    launched: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

impl MockLauncher {
    fn failing() -> Self {
        Self {
            launched: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn launch_count(&self) -> usize {
        self.launched.lock().unwrap().len()
    }
}

impl Launcher for MockLauncher {
    fn launch(&self, command: &[String]) -> io::Result<Handover> {
        self.launched.lock().unwrap().push(command.to_vec());
        if self.fail {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such executable"))
        } else {
            Ok(Handover)
        }
    }
}

fn fast_policy() -> WaitPolicy {
    WaitPolicy {
        interval: Duration::from_millis(1),
        max_attempts: Some(10),
        max_wait: None,
    }
}

fn units(ids: &[&str]) -> Vec<MigrationUnit> {
    ids.iter()
        .map(|id| {
            MigrationUnit::new(
                MigrationId::new(*id),
                format!("{id}.sql").into(),
                format!("-- body of {id}"),
            )
        })
        .collect()
}

fn argv() -> Vec<String> {
    vec!["app".to_string(), "serve".to_string()]
}

#[tokio::test]
async fn test_full_sequence_reaches_handoff() {
    let store = MemoryStore::new().unreachable_for(3);
    let units = units(&["001_a", "002_b"]);
    let launcher = MockLauncher::default();

    let mut sequencer = Sequencer::new(&store, &units, fast_policy());
    let handover = sequencer.run(&launcher, &argv()).await.unwrap();

    assert_eq!(handover, Handover);
    assert_eq!(store.probe_count(), 4);
    assert_eq!(store.applied_ids(), vec!["001_a", "002_b"]);
    assert_eq!(launcher.launch_count(), 1);
    assert_eq!(sequencer.phase(), Phase::HandingOff);
}

#[tokio::test]
async fn test_failing_migration_prevents_handoff() {
    let store = MemoryStore::new().failing_unit(MigrationId::new("002_b"));
    let units = units(&["001_a", "002_b", "003_c"]);
    let launcher = MockLauncher::default();

    let mut sequencer = Sequencer::new(&store, &units, fast_policy());
    let err = sequencer.run(&launcher, &argv()).await.unwrap_err();

    assert!(matches!(err, SequenceError::Migration(_)));
    assert_eq!(launcher.launch_count(), 0);
    assert_eq!(store.applied_ids(), vec!["001_a"]);
    assert_eq!(sequencer.phase(), Phase::Failed);
}

#[tokio::test]
async fn test_wait_timeout_prevents_migration_and_handoff() {
    let store = MemoryStore::new().unreachable_for(u64::MAX);
    let units = units(&["001_a"]);
    let launcher = MockLauncher::default();

    let policy = WaitPolicy {
        interval: Duration::from_millis(1),
        max_attempts: Some(3),
        max_wait: None,
    };
    let mut sequencer = Sequencer::new(&store, &units, policy);
    let err = sequencer.run(&launcher, &argv()).await.unwrap_err();

    assert!(matches!(err, SequenceError::WaitTimeout { .. }));
    assert!(!store.ledger_created());
    assert_eq!(launcher.launch_count(), 0);
    assert_eq!(sequencer.phase(), Phase::Failed);
}

#[tokio::test]
async fn test_empty_migration_set_goes_straight_to_handoff() {
    let store = MemoryStore::new();
    let launcher = MockLauncher::default();

    let mut sequencer = Sequencer::new(&store, &[], fast_policy());
    sequencer.run(&launcher, &argv()).await.unwrap();

    assert!(store.applied_ids().is_empty());
    assert_eq!(launcher.launch_count(), 1);
}

#[tokio::test]
async fn test_handoff_failure_is_fatal() {
    let store = MemoryStore::new();
    let launcher = MockLauncher::failing();

    let mut sequencer = Sequencer::new(&store, &[], fast_policy());
    let err = sequencer.run(&launcher, &argv()).await.unwrap_err();

    match err {
        SequenceError::Handoff { command, .. } => assert_eq!(command, "app serve"),
        other => panic!("expected Handoff, got {other:?}"),
    }
    assert_eq!(sequencer.phase(), Phase::Failed);
}

#[tokio::test]
async fn test_rerun_after_success_applies_nothing_new() {
    let store = MemoryStore::new();
    let units = units(&["001_a"]);
    let launcher = MockLauncher::default();

    let mut first = Sequencer::new(&store, &units, fast_policy());
    first.run(&launcher, &argv()).await.unwrap();

    let mut second = Sequencer::new(&store, &units, fast_policy());
    second.wait().await.unwrap();
    let applied = second.migrate().await.unwrap();

    assert_eq!(applied, 0);
    assert_eq!(store.applied_ids(), vec!["001_a"]);
}
