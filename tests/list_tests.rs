//! GenericList Tests
//!
//! Tests verify:
//! - FIFO push / shift and length accounting
//! - First / last / contains on populated and empty lists
//! - Single and all-match deletion
//! - Clear, destroy and clone independence
//! - Cursor walking, equality and stale detection
//! - Concurrent readers and writers

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use craftd_core::list::GenericList;
use craftd_core::{Config, CoreError};

fn list_of<T: Clone>(values: &[T]) -> GenericList<T> {
    let list = GenericList::new();
    for v in values {
        list.push(v.clone()).unwrap();
    }
    list
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_list_is_empty() {
    let list: GenericList<u32> = GenericList::new();
    assert_eq!(list.len(), 0);
    assert!(list.is_empty());
    assert_eq!(list.begin(), list.end());
}

#[test]
fn test_push_shift_is_fifo() {
    common::init_tracing();
    let list = GenericList::new();

    for i in 0..100u32 {
        list.push(i).unwrap();
    }
    for i in 0..100u32 {
        assert_eq!(list.shift(), Some(i));
    }
    assert_eq!(list.shift(), None);
}

#[test]
fn test_length_after_push_and_shift() {
    let list = GenericList::new();
    for i in 0..10u32 {
        list.push(i).unwrap();
    }
    for _ in 0..4 {
        list.shift();
    }
    assert_eq!(list.len(), 6);
}

#[test]
fn test_push_chains() {
    let list = GenericList::new();
    list.push(1).unwrap().push(2).unwrap().push(3).unwrap();
    assert_eq!(list.snapshot(), vec![1, 2, 3]);
}

#[test]
fn test_first_and_last() {
    let list = list_of(&["a", "b", "c"]);
    assert_eq!(list.first(), Some("a"));
    assert_eq!(list.last(), Some("c"));

    list.shift();
    list.push("d").unwrap();
    assert_eq!(list.first(), Some("b"));
    assert_eq!(list.last(), Some("d"));
}

#[test]
fn test_empty_list_returns_none() {
    let list: GenericList<u8> = GenericList::new();
    assert_eq!(list.first(), None);
    assert_eq!(list.last(), None);
    assert_eq!(list.shift(), None);
    assert_eq!(list.delete(&1), None);
    assert_eq!(list.delete_all(&1), None);
    assert!(list.clear().is_empty());
}

#[test]
fn test_with_config_reserves_capacity() {
    let config = Config::builder().list_capacity(64).build();
    let list: GenericList<u64> = GenericList::with_config(&config).unwrap();
    assert!(list.is_empty());
    list.push(7).unwrap();
    assert!(list.contains(&7));
    assert!(!list.contains(&8));
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_first_match_only() {
    let list = list_of(&['a', 'b', 'a', 'c']);
    assert_eq!(list.delete(&'a'), Some('a'));
    assert_eq!(list.snapshot(), vec!['b', 'a', 'c']);
}

#[test]
fn test_delete_all_removes_every_match() {
    let list = list_of(&['a', 'b', 'a', 'c']);
    assert_eq!(list.delete_all(&'a'), Some('a'));
    assert_eq!(list.snapshot(), vec!['b', 'c']);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_delete_missing_value() {
    let list = list_of(&[1, 2, 3]);
    assert_eq!(list.delete(&9), None);
    assert_eq!(list.delete_all(&9), None);
    assert_eq!(list.len(), 3);
}

#[test]
fn test_delete_tail_then_push() {
    let list = list_of(&[1, 2, 3]);
    assert_eq!(list.delete(&3), Some(3));
    assert_eq!(list.last(), Some(2));

    list.push(4).unwrap();
    assert_eq!(list.snapshot(), vec![1, 2, 4]);
}

#[test]
fn test_delete_all_returns_last_removed() {
    // Equal under PartialEq but distinguishable by payload
    #[derive(Debug, Clone)]
    struct Tagged(u32, &'static str);
    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    let list = list_of(&[Tagged(1, "first"), Tagged(2, "x"), Tagged(1, "second")]);
    let removed = list.delete_all(&Tagged(1, "")).unwrap();
    assert_eq!(removed.1, "second");
    assert_eq!(list.len(), 1);
}

// =============================================================================
// Clear / Destroy / Clone Tests
// =============================================================================

#[test]
fn test_clear_reports_each_distinct_element_once() {
    let list = list_of(&[5, 6, 5, 7, 6]);
    assert_eq!(list.clear(), vec![5, 6, 7]);
    assert!(list.is_empty());

    list.push(1).unwrap();
    assert_eq!(list.snapshot(), vec![1]);
}

#[test]
fn test_destroy_returns_removed_elements() {
    let shared = Arc::new(String::from("player"));
    let list = GenericList::new();
    list.push(Arc::clone(&shared)).unwrap();
    list.push(Arc::clone(&shared)).unwrap();

    let removed = list.destroy();
    assert_eq!(removed.len(), 1);
    assert!(Arc::ptr_eq(&removed[0], &shared));

    drop(removed);
    assert_eq!(Arc::strong_count(&shared), 1);
}

#[test]
fn test_clone_is_independent() {
    let original = list_of(&[1, 2, 3]);
    let cloned = original.try_clone().unwrap();

    assert_eq!(cloned.snapshot(), original.snapshot());
    assert_eq!(cloned.len(), original.len());
    assert_ne!(cloned.id(), original.id());

    original.push(4).unwrap();
    cloned.shift();

    assert_eq!(original.snapshot(), vec![1, 2, 3, 4]);
    assert_eq!(cloned.snapshot(), vec![2, 3]);
}

// =============================================================================
// Cursor Tests
// =============================================================================

#[test]
fn test_cursor_iteration() {
    let list = list_of(&[10, 20, 30]);

    let mut values = Vec::new();
    let mut it = list.begin();
    while it != list.end() {
        values.push(list.value(it).unwrap());
        it = list.next(it).unwrap();
    }

    assert_eq!(values, vec![10, 20, 30]);
}

#[test]
fn test_cursor_equality() {
    let list = list_of(&[1, 2]);
    assert_eq!(list.begin(), list.begin());
    assert_ne!(list.begin(), list.next(list.begin()).unwrap());
    assert!(list.end().is_end());

    let other = list_of(&[1, 2]);
    assert_ne!(list.end(), other.end());
}

#[test]
fn test_cursor_errors() {
    let list = list_of(&[1, 2]);
    let other = list_of(&[1]);

    assert_eq!(list.next(list.end()), Err(CoreError::CursorAtEnd));
    assert_eq!(list.value(other.begin()), Err(CoreError::ForeignCursor));

    let first = list.begin();
    list.delete(&1);
    assert_eq!(list.value(first), Err(CoreError::StaleCursor));

    // Reused slot is not mistaken for the removed node
    list.push(3).unwrap();
    assert_eq!(list.value(first), Err(CoreError::StaleCursor));
}

#[test]
fn test_snapshot_iter_unaffected_by_mutation() {
    let list = list_of(&[1, 2, 3]);
    let iter = list.iter();
    list.clear();
    assert_eq!(iter.collect::<Vec<_>>(), vec![1, 2, 3]);
}

// =============================================================================
// Iteration Lock Tests
// =============================================================================

#[test]
fn test_stop_without_release_keeps_writers_blocked() {
    let list = list_of(&[1u32]);
    let pushed = AtomicBool::new(false);

    crossbeam::thread::scope(|s| {
        let guard = list.start_iterating();

        s.spawn(|_| {
            list.push(2).unwrap();
            pushed.store(true, Ordering::SeqCst);
        });

        let guard = guard.stop(false).expect("guard handed back");
        thread::sleep(Duration::from_millis(50));
        assert!(!pushed.load(Ordering::SeqCst));
        assert_eq!(list.len(), 1);

        assert!(guard.stop(true).is_none());
        while !pushed.load(Ordering::SeqCst) {
            thread::yield_now();
        }
        assert_eq!(list.snapshot(), vec![1, 2]);
    })
    .unwrap();
}

#[test]
fn test_iteration_lock_blocks_other_writers() {
    common::init_tracing();
    let list = list_of(&[1u32]);
    let pushed = AtomicBool::new(false);

    crossbeam::thread::scope(|s| {
        let guard = list.start_iterating();

        s.spawn(|_| {
            list.push(2).unwrap();
            pushed.store(true, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(50));
        assert!(!pushed.load(Ordering::SeqCst));
        assert_eq!(list.len(), 1);

        assert!(guard.stop(true).is_none());
    })
    .unwrap();

    assert!(pushed.load(Ordering::SeqCst));
    assert_eq!(list.snapshot(), vec![1, 2]);
}

// =============================================================================
// Concurrent Access Tests
// =============================================================================

#[test]
fn test_concurrent_reads() {
    let list = Arc::new(list_of(&[1, 2, 3]));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let list = Arc::clone(&list);
            thread::spawn(move || {
                for _ in 0..200 {
                    assert_eq!(list.len(), 3);
                    assert_eq!(list.first(), Some(1));
                    assert_eq!(list.last(), Some(3));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_readers_never_see_torn_state() {
    const TOTAL: u32 = 2000;
    let list: GenericList<u32> = GenericList::new();

    crossbeam::thread::scope(|s| {
        s.spawn(|_| {
            for i in 0..TOTAL {
                list.push(i).unwrap();
            }
        });

        for _ in 0..4 {
            s.spawn(|_| {
                let mut last_len = 0;
                while last_len < TOTAL as usize {
                    let snapshot = list.snapshot();
                    assert!(snapshot.len() >= last_len);
                    assert!(snapshot.iter().copied().eq(0..snapshot.len() as u32));
                    last_len = snapshot.len();
                }
            });
        }
    })
    .unwrap();

    assert_eq!(list.len(), TOTAL as usize);
}

#[test]
fn test_concurrent_writers() {
    let list = Arc::new(GenericList::new());

    let handles: Vec<_> = (0..10)
        .map(|t| {
            let list = Arc::clone(&list);
            thread::spawn(move || {
                for j in 0..100 {
                    list.push(t * 1000 + j).unwrap();
                }
                for _ in 0..50 {
                    assert!(list.shift().is_some());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(list.len(), 500);
}
