//! Concurrent writers against one shared accessor.

use std::collections::HashSet;
use std::sync::Arc;

use stickers::{CancellationToken, DataAccessor, InMemoryDataAccessor};

use crate::support::Named;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_get_distinct_ids() {
    let acc = Arc::new(InMemoryDataAccessor::new());
    let cancel = CancellationToken::new();

    let mut handles = Vec::new();
    for i in 0..200 {
        let acc = acc.clone();
        let cancel = cancel.clone();
        handles.push(tokio::spawn(async move {
            acc.add(Named::new(&format!("n{}", i)), &cancel).await.unwrap()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }
    let expected: HashSet<i32> = (1..=200).collect();
    assert_eq!(ids, expected);
    assert_eq!(acc.count::<Named>(&cancel).await.unwrap(), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_add_unless_admits_one() {
    let acc = Arc::new(InMemoryDataAccessor::new());
    let cancel = CancellationToken::new();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let acc = acc.clone();
        let cancel = cancel.clone();
        handles.push(tokio::spawn(async move {
            acc.add_unless(Named::new("unique"), |n: &Named| n.name == "unique", &cancel)
                .await
                .unwrap()
        }));
    }

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 1);
    assert_eq!(acc.count::<Named>(&cancel).await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn clones_share_the_store() {
    let acc = InMemoryDataAccessor::new();
    let clone = acc.clone();
    let cancel = CancellationToken::new();

    let id = acc.add(Named::new("shared"), &cancel).await.unwrap();
    let seen = clone.get_by_id::<Named>(id, &cancel).await.unwrap();
    assert_eq!(seen.map(|n| n.name), Some("shared".to_string()));
}
