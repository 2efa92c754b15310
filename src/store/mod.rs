//! In-memory lyric registry split across logical submodules. The store is the
//! single owner of every `Lyric`; screens borrow records through lookups and
//! learn about mutations through subscriptions instead of holding copies.

mod events;
mod seed;

use log::{info, warn};

use crate::models::Lyric;

pub use events::{StoreEvent, SubscriptionId};
pub use seed::seed_lyrics;

use events::Subscribers;

/// Ordered collection of lyrics with change notification.
#[derive(Default)]
pub struct LyricStore {
    lyrics: Vec<Lyric>,
    subscribers: Subscribers,
}

impl LyricStore {
    /// An empty store. Mostly useful in tests; the app starts from `seeded`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the example record, the state the app starts in.
    pub fn seeded() -> Self {
        Self {
            lyrics: seed_lyrics(),
            subscribers: Subscribers::default(),
        }
    }

    /// Read access to the whole collection in insertion order.
    pub fn lyrics(&self) -> &[Lyric] {
        &self.lyrics
    }

    /// Number of records, duplicates included.
    pub fn len(&self) -> usize {
        self.lyrics.len()
    }

    /// True once every record has been removed. The home screen switches to
    /// its empty-state message off this.
    pub fn is_empty(&self) -> bool {
        self.lyrics.is_empty()
    }

    /// Append a lyric to the end of the collection. Ids are not checked for
    /// uniqueness; a duplicate is kept and only logged, and lookups keep
    /// returning the earlier record.
    pub fn add_lyric(&mut self, lyric: Lyric) {
        if self.get_lyric_by_id(&lyric.id).is_some() {
            warn!("adding lyric with duplicate id '{}'", lyric.id);
        }
        info!("added lyric '{}' ({})", lyric.id, lyric.display_title());
        let event = StoreEvent::Added {
            id: lyric.id.clone(),
        };
        self.lyrics.push(lyric);
        self.subscribers.notify(&event);
    }

    /// Delete the first lyric whose id matches. Missing ids are a silent
    /// no-op and do not notify subscribers.
    pub fn remove_lyric(&mut self, id: &str) {
        let Some(index) = self.lyrics.iter().position(|lyric| lyric.id == id) else {
            return;
        };
        let removed = self.lyrics.remove(index);
        info!("removed lyric '{}' ({})", removed.id, removed.display_title());
        self.subscribers.notify(&StoreEvent::Removed { id: removed.id });
    }

    /// First lyric with the given id, in collection order.
    pub fn get_lyric_by_id(&self, id: &str) -> Option<&Lyric> {
        self.lyrics.iter().find(|lyric| lyric.id == id)
    }

    /// Suggest an id for a new record: one past the largest numeric id, so
    /// imports never collide with existing entries. Ids too large for `u128`
    /// are ignored; if the largest one is `u128::MAX` the lowest free number
    /// is used instead.
    pub fn next_id(&self) -> String {
        let taken: Vec<u128> = self
            .lyrics
            .iter()
            .filter_map(|lyric| lyric.id.parse::<u128>().ok())
            .collect();
        let max = taken.iter().copied().max().unwrap_or(0);
        let next = max
            .checked_add(1)
            .or_else(|| (1..u128::MAX).find(|n| !taken.contains(n)))
            .unwrap_or(0);
        next.to_string()
    }

    /// Register a listener that runs after every successful mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.subscribers.add(Box::new(listener))
    }

    /// Detach a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Listeners currently attached. `App::into_store` leaves this back at
    /// whatever it was before the app subscribed.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
