//! Maps scroll progress to per-entry branch fills and the flame tier
//!
//! The frame is derived from the progress signal on every change. Trunk,
//! branches and tier all read the same frame, so they cannot drift apart.

use crate::dataflow::Actor;
use futures::StreamExt;
use shared::{FlameTier, ScrollProgress, TimelineFrame, TimelineSettings};
use zoon::*;

#[derive(Clone)]
pub struct SegmentProgressMapper {
    frame: Actor<TimelineFrame>,
}

impl SegmentProgressMapper {
    pub fn new(
        progress_signal: impl Signal<Item = ScrollProgress> + Send + Unpin + 'static,
        entry_count: usize,
        settings: TimelineSettings,
    ) -> Self {
        let initial = TimelineFrame::derive(ScrollProgress::ZERO, entry_count, &settings);

        let frame = Actor::new(initial, async move |state| {
            let mut progress_stream = progress_signal.to_stream();
            while let Some(progress) = progress_stream.next().await {
                let frame = TimelineFrame::derive(progress, entry_count, &settings);
                debug_log!(
                    crate::DEBUG_SCROLL,
                    "Progress {:.3} -> {:?}",
                    progress.value(),
                    frame.tier
                );
                state.set_neq(frame);
            }
        });

        Self { frame }
    }

    pub fn trunk_height_signal(&self) -> impl Signal<Item = f64> + use<> {
        self.frame.signal_ref(|frame| frame.trunk_height_percent())
    }

    pub fn tier_signal(&self) -> impl Signal<Item = FlameTier> + use<> {
        self.frame.signal_ref(|frame| frame.tier)
    }

    /// Connector fill width in percent, 0 or 100.
    pub fn branch_width_signal(&self, index: usize) -> impl Signal<Item = f64> + use<> {
        self.frame.signal_ref(move |frame| {
            frame
                .branch(index)
                .map(|branch| branch.width_percent())
                .unwrap_or(0.0)
        })
    }
}
