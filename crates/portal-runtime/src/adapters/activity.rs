//! Recent-activity feed fed by store events.

use std::collections::VecDeque;

use parking_lot::Mutex;
use shared_types::{EventPublisher, PortalEvent, PublishError};
use tracing::debug;

/// Keeps the newest `capacity` events; older ones fall off the back.
#[derive(Debug)]
pub struct ActivityFeed {
    capacity: usize,
    events: Mutex<VecDeque<PortalEvent>>,
}

impl ActivityFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Up to `limit` events, newest first.
    pub fn recent(&self, limit: usize) -> Vec<PortalEvent> {
        self.events.lock().iter().take(limit).cloned().collect()
    }
}

impl EventPublisher for ActivityFeed {
    fn publish(&self, event: PortalEvent) -> Result<(), PublishError> {
        debug!("[activity] {:?} {}", event.kind, event.subject_id);
        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_back();
        }
        events.push_front(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::EventKind;

    fn event(n: u64) -> PortalEvent {
        PortalEvent {
            kind: EventKind::ApplicationSubmitted,
            subject_id: format!("GI{:03}", n),
            message: String::new(),
            actor: "udupi@association.com".into(),
            timestamp: n,
        }
    }

    #[test]
    fn test_newest_first() {
        let feed = ActivityFeed::new(10);
        for n in 1..=3 {
            feed.publish(event(n)).unwrap();
        }
        let ids: Vec<_> = feed.recent(10).into_iter().map(|e| e.timestamp).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_bounded() {
        let feed = ActivityFeed::new(2);
        for n in 1..=5 {
            feed.publish(event(n)).unwrap();
        }
        assert_eq!(feed.len(), 2);
        let ids: Vec<_> = feed.recent(10).into_iter().map(|e| e.timestamp).collect();
        assert_eq!(ids, vec![5, 4]);
    }

    #[test]
    fn test_limit() {
        let feed = ActivityFeed::new(10);
        for n in 1..=5 {
            feed.publish(event(n)).unwrap();
        }
        assert_eq!(feed.recent(2).len(), 2);
        assert!(feed.recent(0).is_empty());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let feed = ActivityFeed::new(0);
        feed.publish(event(1)).unwrap();
        assert_eq!(feed.capacity(), 1);
        assert_eq!(feed.len(), 1);
    }
}
