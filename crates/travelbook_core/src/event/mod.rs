//! Change notification channel.
//!
//! # Responsibility
//! - Broadcast payload-less "something changed" signals between screens.
//! - Hand out scoped subscriptions that deregister themselves on drop.
//!
//! # Invariants
//! - `publish` is synchronous and reaches every live subscriber of the topic.
//! - Handlers run without the channel lock held, so a handler may publish,
//!   subscribe or drop subscriptions.
//! - A dropped `Subscription` is never invoked again.

use log::debug;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Fixed notification topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Topic {
    /// A new place was persisted.
    PlaceAdded,
}

impl Topic {
    /// Stable topic name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlaceAdded => "place_added",
        }
    }
}

type Handler = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct ChannelState {
    next_id: u64,
    subscribers: BTreeMap<Topic, BTreeMap<u64, Handler>>,
}

static GLOBAL_CHANNEL: Lazy<ChangeChannel> = Lazy::new(ChangeChannel::new);

/// Shared handle to a publish/subscribe channel.
///
/// Cloning is cheap; all clones address the same subscriber table.
#[derive(Clone, Default)]
pub struct ChangeChannel {
    state: Arc<Mutex<ChannelState>>,
}

impl ChangeChannel {
    /// Creates an isolated channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide channel.
    pub fn global() -> Self {
        GLOBAL_CHANNEL.clone()
    }

    /// Registers `handler` for `topic` until the returned handle is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(
        &self,
        topic: Topic,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> Subscription {
        let mut state = lock_state(&self.state);
        let id = state.next_id;
        state.next_id += 1;
        state
            .subscribers
            .entry(topic)
            .or_default()
            .insert(id, Arc::new(handler));
        debug!(
            "event=channel_subscribe module=event topic={} subscription_id={id}",
            topic.as_str()
        );

        Subscription {
            state: Arc::downgrade(&self.state),
            topic,
            id,
        }
    }

    /// Delivers `topic` to every current subscriber and returns the count.
    pub fn publish(&self, topic: Topic) -> usize {
        let handlers: Vec<Handler> = lock_state(&self.state)
            .subscribers
            .get(&topic)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default();

        debug!(
            "event=channel_publish module=event topic={} subscribers={}",
            topic.as_str(),
            handlers.len()
        );
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    /// Number of live subscriptions for `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        lock_state(&self.state)
            .subscribers
            .get(&topic)
            .map_or(0, BTreeMap::len)
    }
}

/// Scoped registration on a [`ChangeChannel`].
pub struct Subscription {
    state: Weak<Mutex<ChannelState>>,
    topic: Topic,
    id: u64,
}

impl Subscription {
    pub fn topic(&self) -> Topic {
        self.topic
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut state = lock_state(&state);
        if let Some(entries) = state.subscribers.get_mut(&self.topic) {
            entries.remove(&self.id);
            if entries.is_empty() {
                state.subscribers.remove(&self.topic);
            }
        }
        debug!(
            "event=channel_unsubscribe module=event topic={} subscription_id={}",
            self.topic.as_str(),
            self.id
        );
    }
}

// Handlers never run under the lock, so a poisoned table is still consistent.
fn lock_state(state: &Mutex<ChannelState>) -> MutexGuard<'_, ChannelState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
