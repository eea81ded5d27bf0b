//! Process-local change bus backed by `std::sync::mpsc` channels.

use std::sync::{Mutex, MutexGuard, PoisonError, mpsc};

use thiserror::Error;

use crate::bus::{EventBus, Subscription};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryBusError {
    /// The bus was closed; nothing is delivered any more.
    #[error("event bus closed")]
    Closed,
}

/// Broadcast bus for a single process.
///
/// Each subscriber gets its own unbounded channel. Subscribers whose receiver was
/// dropped are pruned on the next publish. `close` drops every sender, so blocked
/// `recv` calls return and worker loops can exit.
#[derive(Debug)]
pub struct InMemoryEventBus<M> {
    // `None` once closed.
    subscribers: Mutex<Option<Vec<mpsc::Sender<M>>>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live subscribers as of the last publish. Zero once closed.
    pub fn subscriber_count(&self) -> usize {
        self.senders().as_ref().map_or(0, Vec::len)
    }

    pub fn is_closed(&self) -> bool {
        self.senders().is_none()
    }

    /// Stops delivery and disconnects every subscriber. Idempotent.
    pub fn close(&self) {
        let dropped = self.senders().take();
        tracing::debug!(
            subscribers = dropped.as_ref().map_or(0, Vec::len),
            "event bus closed"
        );
    }

    // A panic while holding the lock cannot leave the sender list half-updated.
    fn senders(&self) -> MutexGuard<'_, Option<Vec<mpsc::Sender<M>>>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Some(Vec::new())),
        }
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut guard = self.senders();
        let subs = guard.as_mut().ok_or(InMemoryBusError::Closed)?;
        subs.retain(|tx| tx.send(message.clone()).is_ok());
        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();
        // After close the sender is dropped here and the subscription starts disconnected.
        if let Some(subs) = self.senders().as_mut() {
            subs.push(tx);
        }
        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_receives_each_message() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(7).unwrap();
        bus.publish(8).unwrap();

        assert_eq!(a.drain(), vec![7, 8]);
        assert_eq!(b.drain(), vec![7, 8]);
    }

    #[test]
    fn late_subscriber_misses_earlier_messages() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        bus.publish(1).unwrap();
        let late = bus.subscribe();
        bus.publish(2).unwrap();
        assert_eq!(late.drain(), vec![2]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let keep = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(1).unwrap();
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.drain(), vec![1]);
    }

    #[test]
    fn close_disconnects_subscribers_and_rejects_publish() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let sub = bus.subscribe();
        bus.publish(1).unwrap();

        bus.close();
        bus.close();

        assert!(bus.is_closed());
        assert_eq!(bus.publish(2), Err(InMemoryBusError::Closed));
        assert_eq!(sub.recv(), Ok(1));
        assert!(sub.recv().is_err());
        assert!(bus.subscribe().recv().is_err());
    }
}
