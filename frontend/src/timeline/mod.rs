//! Scroll-synchronized career timeline
//!
//! Data flows one way: viewport events -> [`ViewportScrollTracker`] ->
//! [`SegmentProgressMapper`] -> card and trunk views, with the
//! [`RevealObserver`] feeding the append-only visibility set on the side.

pub mod career_tree;
pub mod progress_mapper;
pub mod reveal_observer;
pub mod scroll_tracker;
pub mod segments;

use crate::dataflow::{Actor, relay};
use futures::{Stream, StreamExt};
use progress_mapper::SegmentProgressMapper;
use reveal_observer::{RevealObserver, emit_reveal};
use scroll_tracker::ViewportScrollTracker;
use shared::{CardSide, RevealPose, TimelineEntry, TimelineSettings, VisibilitySet};
use std::fmt::Debug;
use std::rc::Rc;
use std::sync::Arc;
use zoon::*;

/// Adds `key` to the set. Returns `false`, without notifying signals, when it
/// was already revealed.
pub fn record_reveal<K: Ord>(state: &Mutable<VisibilitySet<K>>, key: K) -> bool {
    if state.lock_ref().is_revealed(&key) {
        return false;
    }
    state.lock_mut().reveal(key)
}

/// Processor of every visibility actor: drains reveal events until the relay
/// is dropped.
pub async fn collect_reveals<K, S>(
    state: Mutable<VisibilitySet<K>>,
    mut reveals: S,
    label: &'static str,
) where
    K: Ord + Copy + Debug,
    S: Stream<Item = K> + Unpin,
{
    while let Some(key) = reveals.next().await {
        if record_reveal(&state, key) {
            debug_log!(crate::DEBUG_REVEAL, "{} {:?} revealed", label, key);
        }
    }
}

/// View-state of one mounted career timeline.
#[derive(Clone)]
pub struct CareerTimeline {
    entries: Arc<Vec<TimelineEntry>>,
    tracker: ViewportScrollTracker,
    mapper: SegmentProgressMapper,
    visible: Actor<VisibilitySet<u32>>,
    observer: Option<Rc<RevealObserver>>,
}

impl CareerTimeline {
    pub fn new(entries: Vec<TimelineEntry>, settings: &TimelineSettings) -> Self {
        let tracker = ViewportScrollTracker::new(settings.reading_line);
        let mapper =
            SegmentProgressMapper::new(tracker.progress_signal(), entries.len(), settings.clone());

        let (card_intersected_relay, card_intersected_stream) = relay::<u32>();

        let visible = Actor::new(VisibilitySet::new(), move |state| {
            collect_reveals(state, card_intersected_stream, "Entry")
        });

        let observer = match RevealObserver::new(
            settings.reveal_threshold,
            &settings.card_root_margin(),
            card_intersected_relay.clone(),
        ) {
            Ok(observer) => Some(Rc::new(observer)),
            Err(error) => {
                zoon::eprintln!("{}; revealing every entry up front", error);
                for entry in &entries {
                    emit_reveal(&card_intersected_relay, entry.id);
                }
                None
            }
        };

        Self {
            entries: Arc::new(entries),
            tracker,
            mapper,
            visible,
            observer,
        }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn tracker(&self) -> &ViewportScrollTracker {
        &self.tracker
    }

    pub fn mapper(&self) -> &SegmentProgressMapper {
        &self.mapper
    }

    pub fn observe(&self, element: &web_sys::Element) {
        if let Some(observer) = &self.observer {
            observer.observe(element);
        }
    }

    pub fn card_pose_signal(
        &self,
        entry_id: u32,
        side: CardSide,
    ) -> impl Signal<Item = RevealPose> + use<> {
        self.visible
            .signal_ref(move |visible| RevealPose::for_card(side, visible.is_revealed(&entry_id)))
    }

    /// Called once the timeline container is in the DOM.
    pub fn mount(&self, container: web_sys::Element) {
        self.tracker.bind(container);
    }

    /// Called when the container leaves the DOM; releases every subscription.
    pub fn unmount(&self) {
        self.tracker.release();
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_reveal_leaves_the_set_untouched() {
        let state = Mutable::new(VisibilitySet::new());

        assert!(record_reveal(&state, 3_u32));
        assert!(!record_reveal(&state, 3));
        assert!(record_reveal(&state, 5));
        assert_eq!(state.lock_ref().len(), 2);
    }

    #[tokio::test]
    async fn reveal_loop_keeps_every_entry_once() {
        let (card_intersected_relay, card_intersected_stream) = relay::<u32>();
        let state = Mutable::new(VisibilitySet::new());

        for entry_id in [3, 3, 5] {
            emit_reveal(&card_intersected_relay, entry_id);
        }
        drop(card_intersected_relay);
        collect_reveals(state.clone(), card_intersected_stream, "Entry").await;

        let revealed: Vec<u32> = state.lock_ref().iter().copied().collect();
        assert_eq!(revealed, [3, 5]);
    }
}
