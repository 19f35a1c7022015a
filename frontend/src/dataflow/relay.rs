//! Event streaming Relay
//!
//! A Relay is the sending half of an unbounded channel. UI callbacks and
//! browser subscriptions send into it; an Actor owns the receiving stream.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
#[cfg(debug_assertions)]
use std::sync::{Arc, OnceLock};

/// Type-safe event relay.
///
/// Relays follow the `{source}_{event}_relay` naming pattern, e.g.
/// `viewport_changed_relay` or `card_intersected_relay`.
///
/// ```rust
/// let (card_intersected_relay, mut card_intersected_stream) = relay::<u32>();
/// card_intersected_relay.send(3);
/// while let Some(entry_id) = card_intersected_stream.next().await {
///     zoon::println!("Card {} entered the viewport", entry_id);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
    #[cfg(debug_assertions)]
    emit_location: Arc<OnceLock<&'static std::panic::Location<'static>>>,
}

#[derive(Debug, Clone)]
pub enum RelayError {
    /// The receiving stream has been dropped
    ChannelClosed,
    /// Relay sent from more than one code location (debug builds only)
    #[cfg(debug_assertions)]
    MultipleEmitters {
        previous: &'static std::panic::Location<'static>,
        current: &'static std::panic::Location<'static>,
    },
}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                emit_location: Arc::new(OnceLock::new()),
            },
            receiver,
        )
    }

    /// Every relay has exactly one emitting call site.
    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = std::panic::Location::caller();
        match self.emit_location.set(caller) {
            Ok(()) => Ok(()),
            Err(previous) if previous == caller => Ok(()),
            Err(previous) => Err(RelayError::MultipleEmitters {
                previous,
                current: caller,
            }),
        }
    }

    /// Send an event. Dropped silently when nobody listens anymore.
    #[track_caller]
    pub fn send(&self, value: T) {
        #[cfg(debug_assertions)]
        if let Err(error) = self.check_single_source() {
            panic!("{:?}", error);
        }

        let _ = self.sender.unbounded_send(value);
    }

    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

impl<T> Default for Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Disconnected relay; every event is discarded.
    fn default() -> Self {
        let (relay, _receiver) = Self::new();
        relay
    }
}

pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_relay_delivers_in_order() {
        let (card_intersected_relay, mut stream) = relay::<u32>();

        for entry_id in [3, 1, 3] {
            card_intersected_relay.send(entry_id);
        }

        assert_eq!(stream.next().await, Some(3));
        assert_eq!(stream.next().await, Some(1));
        assert_eq!(stream.next().await, Some(3));
    }

    #[tokio::test]
    async fn test_relay_try_send_after_receiver_dropped() {
        let (relay, mut receiver) = Relay::new();
        // One call site, so the debug single-source check stays quiet
        let emit = |value: &str| relay.try_send(value.to_string());

        assert!(emit("scroll").is_ok());
        assert_eq!(receiver.next().await, Some("scroll".to_string()));

        drop(receiver);

        assert!(matches!(emit("resize"), Err(RelayError::ChannelClosed)));
    }

    #[tokio::test]
    async fn test_default_relay_discards_events() {
        let relay = Relay::<f64>::default();
        assert!(matches!(relay.try_send(0.5), Err(RelayError::ChannelClosed)));
    }
}
