//! Tests for store failures during queue operations
//!
//! Uses `MemoryStore` fault injection to fail individual store calls and
//! checks that cursors stay at the last fully committed state.

#[cfg(test)]
mod tests {
    use crate::queue::api::{PersistentQueue, QueueError, QueueOptions};
    use crate::queue::codec::{encode_position, READ_CURSOR_KEY, WRITE_CURSOR_KEY};
    use crate::queue::tests::helpers::*;
    use crate::store::{FaultOp, MemoryStore, Store, StoreError};

    #[test]
    fn test_open_propagates_store_error() {
        let store = MemoryStore::new();
        store.fail_once(FaultOp::Get, WRITE_CURSOR_KEY.to_vec());

        match PersistentQueue::with_store(store, QueueOptions::default()) {
            Err(QueueError::Store { operation, source }) => {
                assert_eq!(operation, "open");
                assert!(matches!(source, StoreError::Injected { .. }));
            }
            other => panic!("expected store error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_failed_data_write_leaves_queue_untouched() {
        let (queue, store) = unbounded_queue();
        store.fail_once(FaultOp::Put, encode_position(0).to_vec());

        let err = queue.push(b"lost").unwrap_err();
        assert!(matches!(err, QueueError::Store { operation: "push", .. }));
        assert_eq!(queue.positions(), (0, 0));
        assert!(store.is_empty());

        // The queue keeps working after the failure
        queue.push(b"kept").unwrap();
        assert_eq!(queue.pop().unwrap(), b"kept".to_vec());
    }

    #[test]
    fn test_failed_cursor_write_orphans_record_until_next_push() {
        let (queue, store) = unbounded_queue();
        store.fail_once(FaultOp::Put, WRITE_CURSOR_KEY.to_vec());

        assert!(queue.push(b"orphan").is_err());
        assert_eq!(queue.positions(), (0, 0), "cursor must not advance");
        assert!(queue.is_empty());
        // The data key reached the store but is outside the queue
        assert!(store.contains_key(&encode_position(0)));
        assert!(!store.contains_key(WRITE_CURSOR_KEY));

        // A later push reuses the position and overwrites the orphan
        assert_eq!(queue.push(b"real").unwrap(), 0);
        assert_eq!(queue.pop().unwrap(), b"real".to_vec());

        println!("✓ Orphaned record is superseded by the next successful push");
    }

    #[test]
    fn test_orphan_is_invisible_after_reopen() {
        let store = MemoryStore::new();
        {
            let queue = PersistentQueue::with_store(store.clone(), QueueOptions::default()).unwrap();
            queue.push(b"committed").unwrap();
            store.fail_once(FaultOp::Put, WRITE_CURSOR_KEY.to_vec());
            assert!(queue.push(b"orphan").is_err());
        }

        let reopened = PersistentQueue::with_store(store, QueueOptions::default()).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.pop().unwrap(), b"committed".to_vec());
        assert!(matches!(reopened.try_pop(), Err(QueueError::Empty)));
    }

    #[test]
    fn test_failed_read_leaves_record_in_place() {
        let (queue, store) = unbounded_queue();
        queue.push(b"precious").unwrap();
        store.fail_once(FaultOp::Get, encode_position(0).to_vec());

        assert!(matches!(
            queue.pop(),
            Err(QueueError::Store { operation: "pop", .. })
        ));
        assert_eq!(queue.positions(), (0, 1));
        assert_eq!(queue.pop().unwrap(), b"precious".to_vec());
    }

    #[test]
    fn test_failed_delete_leaves_record_in_place() {
        let (queue, store) = unbounded_queue();
        queue.push(b"retry me").unwrap();
        store.fail_once(FaultOp::Delete, encode_position(0).to_vec());

        assert!(queue.pop().is_err());
        assert_eq!(queue.positions(), (0, 1));
        assert!(store.contains_key(&encode_position(0)));
        assert_eq!(queue.pop().unwrap(), b"retry me".to_vec());
    }

    #[test]
    fn test_failed_read_cursor_write_after_delete() {
        let (queue, store) = unbounded_queue();
        queue.push(b"first").unwrap();
        queue.push(b"second").unwrap();
        store.fail_once(FaultOp::Put, READ_CURSOR_KEY.to_vec());

        // The record is gone but the cursor stays put
        assert!(queue.pop().is_err());
        assert_eq!(queue.positions(), (0, 2));

        // The retry reports the hole once and steps over it
        assert!(matches!(
            queue.pop(),
            Err(QueueError::MissingRecord { position: 0 })
        ));
        assert_eq!(queue.positions(), (1, 2));
        assert_eq!(store.get(READ_CURSOR_KEY).unwrap(), Some(encode_position(1).to_vec()));

        assert_eq!(queue.pop().unwrap(), b"second".to_vec());
        assert!(queue.is_empty());
        println!("✓ Pop makes progress after a torn delete");
    }

    #[test]
    fn test_failed_ack_keeps_record_for_retry() {
        let (queue, store) = unbounded_queue();
        queue.push(b"job").unwrap();
        assert_eq!(queue.last().unwrap(), b"job".to_vec());

        store.fail_once(FaultOp::Delete, encode_position(0).to_vec());
        assert!(matches!(
            queue.delete_last(),
            Err(QueueError::Store { operation: "delete_last", .. })
        ));
        assert_eq!(queue.last().unwrap(), b"job".to_vec());
        queue.delete_last().unwrap();
        assert!(queue.is_empty());
    }
}
