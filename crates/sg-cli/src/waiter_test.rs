use super::*;
use sg_db::MemoryStore;

fn fast_policy(max_attempts: Option<u64>) -> WaitPolicy {
    WaitPolicy {
        interval: Duration::from_millis(1),
        max_attempts,
        max_wait: None,
    }
}

#[tokio::test]
async fn test_ready_on_first_attempt() {
    let store = MemoryStore::new();
    let attempts = wait_until_ready(&store, &fast_policy(None)).await.unwrap();
    assert_eq!(attempts, 1);
    assert_eq!(store.probe_count(), 1);
}

#[tokio::test]
async fn test_three_failures_then_ready_makes_four_probes() {
    let store = MemoryStore::new().unreachable_for(3);
    let attempts = wait_until_ready(&store, &fast_policy(None)).await.unwrap();
    assert_eq!(attempts, 4);
    assert_eq!(store.probe_count(), 4);
}

#[tokio::test]
async fn test_bound_exceeded_is_fatal() {
    let store = MemoryStore::new().unreachable_for(u64::MAX);
    let err = wait_until_ready(&store, &fast_policy(Some(5)))
        .await
        .unwrap_err();

    match err {
        SequenceError::WaitTimeout { attempts, .. } => assert_eq!(attempts, 5),
        other => panic!("expected WaitTimeout, got {other:?}"),
    }
    assert_eq!(store.probe_count(), 5);
}

#[tokio::test]
async fn test_success_on_last_allowed_attempt() {
    let store = MemoryStore::new().unreachable_for(4);
    let attempts = wait_until_ready(&store, &fast_policy(Some(5)))
        .await
        .unwrap();
    assert_eq!(attempts, 5);
}

#[tokio::test]
async fn test_max_wait_bound() {
    let store = MemoryStore::new().unreachable_for(u64::MAX);
    let policy = WaitPolicy {
        interval: Duration::from_millis(5),
        max_attempts: None,
        max_wait: Some(Duration::from_millis(1)),
    };

    let err = wait_until_ready(&store, &policy).await.unwrap_err();
    assert!(matches!(err, SequenceError::WaitTimeout { .. }));
}

#[test]
fn test_log_throttle() {
    // Every attempt for the first ten, then every tenth.
    assert!(should_log(1));
    assert!(should_log(10));
    assert!(!should_log(11));
    assert!(!should_log(19));
    assert!(should_log(20));
    assert!(should_log(100));
    assert!(!should_log(101));
}
