//! One-shot reveal detection
//!
//! Wraps an `IntersectionObserver`. Observed elements carry a
//! `data-reveal-id` attribute; the first time one intersects, its key is sent
//! through the relay and the element is unobserved. Exits are ignored.

use crate::dataflow::Relay;
use std::str::FromStr;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

pub const REVEAL_ID_ATTR: &str = "data-reveal-id";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

pub struct RevealObserver {
    observer: web_sys::IntersectionObserver,
    _callback: ObserverCallback,
}

impl RevealObserver {
    /// `threshold` is the visible fraction needed, `root_margin` a CSS margin
    /// such as `0px 0px -100px 0px`.
    pub fn new<K>(threshold: f64, root_margin: &str, revealed_relay: Relay<K>) -> Result<Self, String>
    where
        K: FromStr + Clone + Send + Sync + 'static,
    {
        let callback = ObserverCallback::new(
            move |records: js_sys::Array, observer: web_sys::IntersectionObserver| {
                for record in records.iter() {
                    let Ok(record) = record.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !record.is_intersecting() {
                        continue;
                    }
                    let target = record.target();
                    observer.unobserve(&target);
                    match target.get_attribute(REVEAL_ID_ATTR).map(|raw| raw.parse::<K>()) {
                        Some(Ok(key)) => emit_reveal(&revealed_relay, key),
                        _ => zoon::eprintln!("Observed element without a valid {}", REVEAL_ID_ATTR),
                    }
                }
            },
        );

        let options = web_sys::IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(root_margin);

        let observer = web_sys::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|error| format!("IntersectionObserver unavailable: {:?}", error))?;

        debug_log!(
            crate::DEBUG_REVEAL,
            "Reveal observer ready (threshold {}, margin '{}')",
            threshold,
            root_margin
        );

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &web_sys::Element) {
        self.observer.observe(element);
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Single emit site for reveal keys, shared by the observer callback and the
/// no-observer fallback.
pub fn emit_reveal<K>(revealed_relay: &Relay<K>, key: K)
where
    K: Clone + Send + Sync + 'static,
{
    revealed_relay.send(key);
}
