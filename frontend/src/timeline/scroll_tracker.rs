//! Viewport scroll tracker
//!
//! Samples the window and the timeline container on every `scroll` and
//! `resize` event and turns the sample into a [`ScrollProgress`]. Listeners
//! live in a [`ScrollSubscription`] and are removed when it drops.

use crate::dataflow::{Actor, Relay, relay};
use futures::StreamExt;
use shared::{ScrollProgress, ViewportGeometry};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use zoon::*;

const VIEWPORT_EVENTS: [&str; 2] = ["scroll", "resize"];

/// Raw numbers read from the DOM. `geometry` is `None` while the container
/// is not mounted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSample {
    pub geometry: Option<ViewportGeometry>,
    pub scroll_y: f64,
}

impl ViewportSample {
    fn measure(window: &web_sys::Window, container: Option<&web_sys::Element>) -> Self {
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let geometry = container.map(|container| {
            let rect = container.get_bounding_client_rect();
            ViewportGeometry {
                viewport_height: window
                    .inner_height()
                    .ok()
                    .and_then(|height| height.as_f64())
                    .unwrap_or(0.0),
                container_top: rect.top(),
                container_height: rect.height(),
            }
        });
        Self { geometry, scroll_y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    pub progress: ScrollProgress,
    pub scroll_y: f64,
}

impl ViewportState {
    fn from_sample(sample: ViewportSample, reading_line: f64) -> Self {
        Self {
            progress: sample
                .geometry
                .map(|geometry| ScrollProgress::from_geometry(geometry, reading_line))
                .unwrap_or(ScrollProgress::ZERO),
            scroll_y: sample.scroll_y,
        }
    }
}

/// Window listeners bound to one timeline container.
pub struct ScrollSubscription {
    window: web_sys::Window,
    listener: Closure<dyn FnMut(web_sys::Event)>,
}

impl ScrollSubscription {
    pub fn attach(
        container: web_sys::Element,
        viewport_changed_relay: Relay<ViewportSample>,
    ) -> Result<Self, String> {
        let window = web_sys::window().ok_or("no window available")?;

        emit_sample(&viewport_changed_relay, &window, Some(&container));

        let listener = Closure::<dyn FnMut(web_sys::Event)>::new({
            let window = window.clone();
            move |_event: web_sys::Event| {
                emit_sample(&viewport_changed_relay, &window, Some(&container));
            }
        });

        for event in VIEWPORT_EVENTS {
            window
                .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                .map_err(|error| format!("failed to listen to '{}': {:?}", event, error))?;
        }

        Ok(Self { window, listener })
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        for event in VIEWPORT_EVENTS {
            let _ = self
                .window
                .remove_event_listener_with_callback(event, self.listener.as_ref().unchecked_ref());
        }
        debug_log!(crate::DEBUG_SCROLL, "Scroll subscription released");
    }
}

fn emit_sample(
    viewport_changed_relay: &Relay<ViewportSample>,
    window: &web_sys::Window,
    container: Option<&web_sys::Element>,
) {
    let sample = ViewportSample::measure(window, container);
    debug_log!(crate::DEBUG_SCROLL, "Viewport sample: {:?}", sample);
    viewport_changed_relay.send(sample);
}

/// Owns the current [`ViewportState`] and the live subscription.
#[derive(Clone)]
pub struct ViewportScrollTracker {
    state: Actor<ViewportState>,
    viewport_changed_relay: Relay<ViewportSample>,
    subscription: Rc<RefCell<Option<ScrollSubscription>>>,
}

impl ViewportScrollTracker {
    pub fn new(reading_line: f64) -> Self {
        let (viewport_changed_relay, mut viewport_changed_stream) = relay::<ViewportSample>();

        // Last write wins; the browser already coalesces scroll events.
        let state = Actor::new(ViewportState::default(), async move |state| {
            while let Some(sample) = viewport_changed_stream.next().await {
                state.set_neq(ViewportState::from_sample(sample, reading_line));
            }
        });

        Self {
            state,
            viewport_changed_relay,
            subscription: Rc::new(RefCell::new(None)),
        }
    }

    /// Start tracking `container`. Replaces any previous binding.
    pub fn bind(&self, container: web_sys::Element) {
        match ScrollSubscription::attach(container, self.viewport_changed_relay.clone()) {
            Ok(subscription) => {
                self.subscription.borrow_mut().replace(subscription);
            }
            Err(error) => {
                zoon::eprintln!("Scroll tracking disabled: {}", error);
            }
        }
    }

    pub fn release(&self) {
        self.subscription.borrow_mut().take();
    }

    pub fn progress_signal(&self) -> impl Signal<Item = ScrollProgress> + Send + Unpin + use<> {
        self.state.signal_ref(|state| state.progress)
    }

    pub fn scroll_y_signal(&self) -> impl Signal<Item = f64> + use<> {
        self.state.signal_ref(|state| state.scroll_y)
    }
}
