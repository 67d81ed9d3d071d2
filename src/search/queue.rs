//! Bounded blocking task queue
//!
//! A fixed-capacity ring buffer shared between one producer and a pool of
//! consumers. The producer blocks while the buffer is full and consumers
//! block while it is empty; once the producer calls
//! [`mark_complete`](BoundedQueue::mark_complete), consumers drain whatever
//! is left and then observe the queue as closed.
//!
//! # Correctness Invariants
//!
//! - `count` equals pushes minus pops and never exceeds `capacity`
//! - `production_complete` goes false to true once and never reverts
//! - every pushed item is popped by exactly one consumer
//! - `mark_complete` wakes every blocked consumer, so none can sleep through
//!   the end of production
//!
//! All state lives behind one mutex with two condition variables (room
//! available, item available). Every wait re-checks its predicate in a loop.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Lifetime counters for a queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Items ever pushed.
    pub pushed: u64,
    /// Items ever popped.
    pub popped: u64,
    /// Times a producer had to wait on a full buffer.
    pub producer_waits: u64,
    /// Times a consumer had to wait on an empty buffer.
    pub consumer_waits: u64,
}

#[derive(Debug)]
struct State<T> {
    slots: Vec<Option<T>>,
    read: usize,
    write: usize,
    count: usize,
    production_complete: bool,
    stats: QueueStats,
}

/// Fixed-capacity blocking FIFO with a production-complete flag.
///
/// Safe to share across threads via `Arc<BoundedQueue<T>>`. Exactly one
/// thread should push; any number may pop.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    capacity: usize,
    state: Mutex<State<T>>,
    /// Signalled when a slot is freed.
    not_full: Condvar,
    /// Signalled when an item arrives or production completes.
    not_empty: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Create an empty queue holding at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "BoundedQueue capacity must be > 0");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            capacity,
            state: Mutex::new(State {
                slots,
                read: 0,
                write: 0,
                count: 0,
                production_complete: false,
                stats: QueueStats::default(),
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Lock state with poison recovery.
    ///
    /// Nothing that can panic runs while the lock is held, so a poisoned
    /// guard still protects consistent state.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an item, blocking while the queue is full.
    pub fn push(&self, item: T) {
        let mut state = self.lock();

        if state.count == self.capacity {
            state.stats.producer_waits += 1;
        }
        while state.count == self.capacity {
            state = self
                .not_full
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        debug_assert!(
            !state.production_complete,
            "push after production was marked complete"
        );

        let write = state.write;
        state.slots[write] = Some(item);
        state.write = (write + 1) % self.capacity;
        state.count += 1;
        state.stats.pushed += 1;

        self.not_empty.notify_one();
    }

    /// Remove the oldest item, blocking while the queue is empty and
    /// production is still running.
    ///
    /// Returns `None` once the queue is both empty and complete; every later
    /// call returns `None` immediately.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.lock();

        if state.count == 0 && !state.production_complete {
            state.stats.consumer_waits += 1;
        }
        while state.count == 0 && !state.production_complete {
            state = self
                .not_empty
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if state.count == 0 {
            return None;
        }

        let read = state.read;
        let item = state.slots[read].take();
        state.read = (read + 1) % self.capacity;
        state.count -= 1;
        state.stats.popped += 1;

        self.not_full.notify_one();
        debug_assert!(item.is_some(), "occupied slot was empty");
        item
    }

    /// Signal that no more items will be pushed and wake every waiting
    /// consumer.
    ///
    /// Returns `true` if this call set the flag, `false` if it was already
    /// set.
    pub fn mark_complete(&self) -> bool {
        let mut state = self.lock();
        let first = !state.production_complete;
        state.production_complete = true;
        self.not_empty.notify_all();
        first
    }

    /// Maximum number of buffered items.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items currently buffered.
    ///
    /// A snapshot; may be stale by the time it is used.
    pub fn len(&self) -> usize {
        self.lock().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`mark_complete`](Self::mark_complete) has been called.
    pub fn is_complete(&self) -> bool {
        self.lock().production_complete
    }

    pub fn stats(&self) -> QueueStats {
        self.lock().stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_order() {
        let q = BoundedQueue::new(4);
        q.push(1);
        q.push(2);
        q.push(3);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        q.push(4);
        q.push(5);
        q.push(6);
        assert_eq!(q.pop(), Some(3));
        assert_eq!(q.pop(), Some(4));
        assert_eq!(q.pop(), Some(5));
        assert_eq!(q.pop(), Some(6));
        assert!(q.is_empty());
    }

    #[test]
    fn test_fill_to_capacity_does_not_block() {
        let q = BoundedQueue::new(8);
        for i in 0..8 {
            q.push(i);
        }
        assert_eq!(q.len(), q.capacity());
        assert_eq!(q.stats().producer_waits, 0);
    }

    #[test]
    fn test_push_blocks_when_full_until_pop() {
        let q = Arc::new(BoundedQueue::new(2));
        q.push(1);
        q.push(2);

        let (done_tx, done_rx) = mpsc::channel();
        let producer = {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                q.push(3);
                done_tx.send(()).unwrap();
            })
        };

        // The third push must still be waiting for room
        assert!(done_rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert_eq!(q.len(), 2);

        assert_eq!(q.pop(), Some(1));
        done_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("push should complete once a slot is freed");
        producer.join().unwrap();

        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(3));
        assert_eq!(q.stats().producer_waits, 1);
    }

    #[test]
    fn test_pop_blocks_until_push() {
        let q = Arc::new(BoundedQueue::new(1));
        let consumer = {
            let q = Arc::clone(&q);
            thread::spawn(move || q.pop())
        };

        thread::sleep(Duration::from_millis(20));
        q.push(42);

        assert_eq!(consumer.join().unwrap(), Some(42));
    }

    #[test]
    fn test_pop_on_complete_empty_queue_is_closed_repeatedly() {
        let q: BoundedQueue<u32> = BoundedQueue::new(3);
        assert!(q.mark_complete());
        for _ in 0..5 {
            assert_eq!(q.pop(), None);
        }
        assert_eq!(q.stats().consumer_waits, 0);
    }

    #[test]
    fn test_complete_queue_drains_before_closing() {
        let q = BoundedQueue::new(4);
        q.push("a");
        q.push("b");
        q.mark_complete();

        assert_eq!(q.pop(), Some("a"));
        assert_eq!(q.pop(), Some("b"));
        assert_eq!(q.pop(), None);
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_mark_complete_is_idempotent() {
        let q: BoundedQueue<u8> = BoundedQueue::new(1);
        assert!(!q.is_complete());
        assert!(q.mark_complete());
        assert!(!q.mark_complete());
        assert!(q.is_complete());
    }

    #[test]
    fn test_mark_complete_wakes_all_blocked_consumers() {
        let q: Arc<BoundedQueue<u32>> = Arc::new(BoundedQueue::new(4));
        let consumers: Vec<_> = (0..6)
            .map(|_| {
                let q = Arc::clone(&q);
                thread::spawn(move || q.pop())
            })
            .collect();

        // Give every consumer time to block on the empty queue
        thread::sleep(Duration::from_millis(50));
        q.mark_complete();

        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), None);
        }
    }

    #[test]
    fn test_exactly_once_delivery_across_consumers() {
        const ITEMS: u32 = 2_000;
        let q = Arc::new(BoundedQueue::new(3));

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Some(item) = q.pop() {
                        seen.push(item);
                    }
                    seen
                })
            })
            .collect();

        for i in 0..ITEMS {
            q.push(i);
        }
        q.mark_complete();

        let mut all = HashSet::new();
        let mut total = 0;
        for consumer in consumers {
            let seen = consumer.join().unwrap();
            // Each consumer sees its share in enqueue order
            assert!(seen.windows(2).all(|w| w[0] < w[1]));
            total += seen.len();
            all.extend(seen);
        }

        assert_eq!(total, ITEMS as usize);
        assert_eq!(all.len(), ITEMS as usize);
        let stats = q.stats();
        assert_eq!(stats.pushed, ITEMS as u64);
        assert_eq!(stats.popped, ITEMS as u64);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn test_zero_capacity_rejected() {
        let _q: BoundedQueue<u8> = BoundedQueue::new(0);
    }
}
