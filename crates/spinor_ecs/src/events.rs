//! Change notifications for world mutations.
//!
//! The reactive layer is a plain publish/subscribe fan-out: listeners
//! register for component add/remove events (optionally filtered to one
//! component type), query watchers re-run a type-set query after any
//! structural mutation, and both return a [`SubscriptionId`] token for
//! later unsubscription. Listeners run in registration order; a panicking
//! listener is isolated so it cannot break the mutation in progress or
//! starve other listeners.

use crate::component::ComponentTypeId;
use crate::entity::Entity;
use crate::world::World;

/// A structural change in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    /// A component was added (or overwritten) on an entity.
    ComponentAdded {
        entity: Entity,
        type_id: ComponentTypeId,
    },
    /// A component is about to be removed from an entity. Emitted before
    /// deletion, so listeners can still read the final state.
    ComponentRemoved {
        entity: Entity,
        type_id: ComponentTypeId,
    },
}

impl WorldEvent {
    /// The entity the event concerns.
    #[must_use]
    pub const fn entity(self) -> Entity {
        match self {
            Self::ComponentAdded { entity, .. } | Self::ComponentRemoved { entity, .. } => entity,
        }
    }

    /// The component type the event concerns.
    #[must_use]
    pub const fn type_id(self) -> ComponentTypeId {
        match self {
            Self::ComponentAdded { type_id, .. } | Self::ComponentRemoved { type_id, .. } => {
                type_id
            }
        }
    }

    /// The event's kind, for listener matching.
    #[must_use]
    pub const fn kind(self) -> EventKind {
        match self {
            Self::ComponentAdded { .. } => EventKind::ComponentAdded,
            Self::ComponentRemoved { .. } => EventKind::ComponentRemoved,
        }
    }
}

/// The kinds of event a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ComponentAdded,
    ComponentRemoved,
}

/// Token returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) type EventCallback = Box<dyn FnMut(&World, &WorldEvent) + Send>;
pub(crate) type WatchCallback = Box<dyn FnMut(&[Entity]) + Send>;

pub(crate) struct ListenerEntry {
    pub id: SubscriptionId,
    pub kind: EventKind,
    /// `None` listens to the event kind for every component type.
    pub type_filter: Option<ComponentTypeId>,
    pub callback: EventCallback,
}

impl ListenerEntry {
    pub fn matches(&self, event: &WorldEvent) -> bool {
        self.kind == event.kind()
            && self
                .type_filter
                .is_none_or(|filter| filter == event.type_id())
    }
}

pub(crate) struct WatcherEntry {
    pub id: SubscriptionId,
    /// Sorted, deduplicated required type set.
    pub types: Vec<ComponentTypeId>,
    pub callback: WatchCallback,
}

/// Registration state for listeners and watchers. Owned by the world;
/// dispatch lives in `world.rs` because it needs `&World` access.
#[derive(Default)]
pub(crate) struct EventHub {
    next_id: u64,
    pub listeners: Vec<ListenerEntry>,
    pub watchers: Vec<WatcherEntry>,
}

impl EventHub {
    pub fn next_subscription_id(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    /// Drop the subscription with the given token, listener or watcher.
    /// Returns `true` if something was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len() + self.watchers.len();
        self.listeners.retain(|entry| entry.id != id);
        self.watchers.retain(|entry| entry.id != id);
        before != self.listeners.len() + self.watchers.len()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
        self.watchers.clear();
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listeners.len())
            .field("watchers", &self.watchers.len())
            .finish()
    }
}
