//! Bounded remote event queue
//!
//! The hand-off between the remote listener thread and the tick loop. The
//! listener pushes, the device drains everything once per tick.

use crate::machine::RemoteEvent;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Queue shared between the listener thread and the device loop
pub type SharedQueue = Arc<Mutex<EventQueue>>;

/// FIFO of remote events with a fixed capacity
#[derive(Debug, Clone)]
pub struct EventQueue {
    events: VecDeque<RemoteEvent>,
    capacity: usize,
    /// Events rejected because the queue was full
    dropped: usize,
}

impl EventQueue {
    /// Create a queue holding at most `capacity` events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        EventQueue {
            events: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Wrap a new queue for sharing across threads
    pub fn shared(capacity: usize) -> SharedQueue {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    /// Append an event; returns false (and drops it) when full
    pub fn push(&mut self, event: RemoteEvent) -> bool {
        if self.events.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.events.push_back(event);
        true
    }

    /// Take every queued event in arrival order
    pub fn drain(&mut self) -> Vec<RemoteEvent> {
        self.events.drain(..).collect()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Maximum number of queued events
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events dropped because the queue was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_keeps_arrival_order() {
        let mut queue = EventQueue::new(4);
        queue.push(RemoteEvent::Start);
        queue.push(RemoteEvent::Pause);
        queue.push(RemoteEvent::ResetShot);

        assert_eq!(
            queue.drain(),
            vec![
                RemoteEvent::Start,
                RemoteEvent::Pause,
                RemoteEvent::ResetShot
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_queue_drops_newest() {
        let mut queue = EventQueue::new(2);
        assert!(queue.push(RemoteEvent::Start));
        assert!(queue.push(RemoteEvent::Pause));
        assert!(!queue.push(RemoteEvent::ResetFrame));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.drain(), vec![RemoteEvent::Start, RemoteEvent::Pause]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut queue = EventQueue::new(0);
        assert_eq!(queue.capacity(), 1);
        assert!(queue.push(RemoteEvent::Toggle));
    }

    #[test]
    fn test_shared_queue_across_threads() {
        let queue = EventQueue::shared(8);
        let producer = Arc::clone(&queue);
        std::thread::spawn(move || {
            producer.lock().push(RemoteEvent::Toggle);
        })
        .join()
        .unwrap();

        assert_eq!(queue.lock().drain(), vec![RemoteEvent::Toggle]);
    }
}
