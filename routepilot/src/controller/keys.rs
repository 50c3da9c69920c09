//! Keyboard handling.
//!
//! Only two keys are consumed: Escape (close the confirmation modal) and
//! Space (pause/resume). Raw key codes are normalized to the semantic
//! [`Key`] enum; everything else is dropped at the boundary.
//!
//! Registration is scoped: a [`KeySubscription`] receives key presses only
//! while it is alive and deregisters itself when dropped, so repeated
//! mount/unmount cycles of a view cannot leak listeners.

use tokio::sync::broadcast;
use tracing::trace;

/// Raw code for the Escape key.
pub const KEY_CODE_ESCAPE: u32 = 27;
/// Raw code for the Space key.
pub const KEY_CODE_SPACE: u32 = 32;

/// Capacity of the key press channel; presses beyond this while a
/// subscriber lags are dropped, which is acceptable for UI keys.
const KEY_CHANNEL_CAPACITY: usize = 16;

/// A semantic key the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Closes the confirmation modal when open.
    Escape,
    /// Pauses a running trip, resumes a paused one.
    Space,
}

impl Key {
    /// Map a raw key code to a semantic key, if it is one we consume.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            KEY_CODE_ESCAPE => Some(Key::Escape),
            KEY_CODE_SPACE => Some(Key::Space),
            _ => None,
        }
    }
}

/// Process-wide key press source.
///
/// The embedding layer forwards raw key-up codes via [`KeyBus::press`];
/// controller loops subscribe for the scope of their lifetime.
#[derive(Debug, Clone)]
pub struct KeyBus {
    tx: broadcast::Sender<u32>,
}

impl Default for KeyBus {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBus {
    /// Create an empty bus with no subscribers.
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(KEY_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish a raw key code to all live subscriptions.
    pub fn press(&self, code: u32) {
        // No subscribers is fine; presses are simply dropped.
        let _ = self.tx.send(code);
    }

    /// Register a scoped subscription. Dropping it deregisters.
    pub fn subscribe(&self) -> KeySubscription {
        KeySubscription {
            rx: self.tx.subscribe(),
        }
    }
}

/// A scoped key press subscription.
pub struct KeySubscription {
    rx: broadcast::Receiver<u32>,
}

impl KeySubscription {
    /// Wait for the next semantic key, skipping codes we do not consume.
    ///
    /// Returns `None` once the bus is gone.
    pub async fn next_key(&mut self) -> Option<Key> {
        loop {
            match self.rx.recv().await {
                Ok(code) => match Key::from_code(code) {
                    Some(key) => return Some(key),
                    None => trace!(code, "ignoring unmapped key code"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    trace!(skipped, "key subscription lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_and_space_map_to_keys() {
        assert_eq!(Key::from_code(KEY_CODE_ESCAPE), Some(Key::Escape));
        assert_eq!(Key::from_code(KEY_CODE_SPACE), Some(Key::Space));
    }

    #[test]
    fn test_other_codes_are_ignored() {
        assert_eq!(Key::from_code(13), None);
        assert_eq!(Key::from_code(65), None);
    }

    #[tokio::test]
    async fn test_subscription_receives_semantic_keys_only() {
        let bus = KeyBus::new();
        let mut sub = bus.subscribe();

        bus.press(65); // dropped
        bus.press(KEY_CODE_SPACE);

        assert_eq!(sub.next_key().await, Some(Key::Space));
    }

    #[tokio::test]
    async fn test_dropped_subscription_deregisters() {
        let bus = KeyBus::new();
        let sub = bus.subscribe();
        assert_eq!(bus.tx.receiver_count(), 1);

        drop(sub);
        assert_eq!(bus.tx.receiver_count(), 0);
    }

    #[tokio::test]
    async fn test_next_key_ends_when_bus_dropped() {
        let bus = KeyBus::new();
        let mut sub = bus.subscribe();
        drop(bus);
        assert_eq!(sub.next_key().await, None);
    }
}
