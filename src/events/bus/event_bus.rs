// src/events/bus/event_bus.rs
//
// Synchronous event bus used for store change notifications.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers execute immediately in subscription order
// 2. Observable - recent emissions are kept in a bounded log
// 3. Type-safe - events are strongly typed
// 4. Re-entrant - handlers run with no bus lock held, so they may subscribe

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased event handler function
type EventHandler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Number of most recent emissions kept in the event log
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Central coordination point for planner events.
///
/// Consumers that need to react to store changes subscribe here instead of
/// reaching into the store.
pub struct EventBus {
    /// Map from event TypeId to list of handlers
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,

    /// Most recent emissions, oldest first (for debugging)
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
}

/// A logged event for debugging and tracing
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(VecDeque::with_capacity(EVENT_LOG_CAPACITY))),
        }
    }

    /// Subscribe to a specific event type.
    ///
    /// Handlers are executed in the order they are subscribed.
    ///
    /// ```ignore
    /// bus.subscribe::<ReminderAdded, _>(|event| {
    ///     println!("Reminder added for {}", event.reminder.media_name);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();

        let wrapped: EventHandler = Arc::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        handlers.entry(type_id).or_default().push(wrapped);
    }

    /// Emit an event to every subscriber of its type.
    ///
    /// A panicking handler is caught and logged; the remaining handlers
    /// still run. Handlers subscribed during delivery see the next emission.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let type_id = TypeId::of::<E>();

        // Snapshot, then release the lock before any handler runs
        let event_handlers: Vec<EventHandler> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
            .unwrap_or_default();
        let handler_count = event_handlers.len();

        let log_entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count,
        };

        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            log_entry.event_type,
            log_entry.event_id,
            log_entry.handler_count
        );

        {
            let mut event_log = self.event_log.write().unwrap_or_else(PoisonError::into_inner);
            if event_log.len() == EVENT_LOG_CAPACITY {
                event_log.pop_front();
            }
            event_log.push_back(log_entry);
        }

        for (idx, handler) in event_handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&event as &dyn Any);
            }));

            if let Err(e) = result {
                log::error!(
                    "Handler {} for {} panicked: {:?}",
                    idx,
                    event.event_type(),
                    e
                );
            }
        }
    }

    /// Recent emissions, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear_event_log(&self) {
        self.event_log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Drop every subscription (used on context shutdown)
    pub fn clear_subscribers(&self) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let type_id = TypeId::of::<E>();
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        handlers.get(&type_id).map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Clones share the same subscriptions and log
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            event_log: Arc::clone(&self.event_log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MediaType, Reminder};
    use crate::events::types::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn added() -> ReminderAdded {
        ReminderAdded::new(Reminder::new(Utc::now(), MediaType::Video, "clip1.mp4"))
    }

    #[test]
    fn test_subscribe_and_emit() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        bus.subscribe::<ReminderAdded, _>(move |_event| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(added());

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multiple_handlers_execute_in_order() {
        let bus = EventBus::new();
        let sequence = Arc::new(RwLock::new(Vec::new()));

        for n in 1..=3 {
            let seq = Arc::clone(&sequence);
            bus.subscribe::<PendingDateChanged, _>(move |_| {
                seq.write().unwrap().push(n);
            });
        }

        bus.emit(PendingDateChanged::new(Utc::now()));

        assert_eq!(*sequence.read().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_event_log_records_emissions() {
        let bus = EventBus::new();

        bus.emit(added());
        bus.emit(RemindersRestored::new(0, false));

        let log = bus.get_event_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event_type, "ReminderAdded");
        assert_eq!(log[1].event_type, "RemindersRestored");

        bus.clear_event_log();
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_event_log_keeps_only_recent_emissions() {
        let bus = EventBus::new();

        for _ in 0..(EVENT_LOG_CAPACITY * 4) {
            bus.emit(added());
        }
        let last = PendingDateChanged::new(Utc::now());
        let last_id = last.event_id.to_string();
        bus.emit(last);

        let log = bus.get_event_log();
        assert_eq!(log.len(), EVENT_LOG_CAPACITY);
        assert_eq!(log[EVENT_LOG_CAPACITY - 1].event_id, last_id);
    }

    #[test]
    fn test_handler_can_subscribe_during_emit() {
        let bus = EventBus::new();
        let inner = bus.clone();
        let removed = Arc::new(AtomicUsize::new(0));
        let removed_clone = Arc::clone(&removed);

        bus.subscribe::<ReminderAdded, _>(move |_| {
            let counter = Arc::clone(&removed_clone);
            inner.subscribe::<ReminderRemoved, _>(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        });

        bus.emit(added());
        assert_eq!(bus.subscriber_count::<ReminderRemoved>(), 1);

        let reminder = Reminder::new(Utc::now(), MediaType::Audio, "a.mp3");
        bus.emit(ReminderRemoved::new(&reminder));
        assert_eq!(removed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscriber_count() {
        let bus = EventBus::new();

        assert_eq!(bus.subscriber_count::<ReminderAdded>(), 0);

        bus.subscribe::<ReminderAdded, _>(|_| {});
        bus.subscribe::<ReminderAdded, _>(|_| {});
        assert_eq!(bus.subscriber_count::<ReminderAdded>(), 2);
        assert_eq!(bus.subscriber_count::<ReminderRemoved>(), 0);

        bus.clear_subscribers();
        assert_eq!(bus.subscriber_count::<ReminderAdded>(), 0);
    }

    #[test]
    fn test_handler_panic_doesnt_break_bus() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe::<ReminderAdded, _>(|_| {
            panic!("Intentional panic");
        });

        let counter_clone = Arc::clone(&counter);
        bus.subscribe::<ReminderAdded, _>(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(added());

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
