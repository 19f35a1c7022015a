//! Single-value Actor
//!
//! An Actor owns a `Mutable<T>` and the task that mutates it. Only the
//! processor closure can write; everyone else reads through signals.

use std::future::Future;
use std::sync::Arc;
use zoon::{Mutable, Signal, Task, TaskHandle};

/// Reactive state container driven by Relay streams.
///
/// ```rust
/// let (card_intersected_relay, mut card_intersected_stream) = relay::<u32>();
///
/// let visible = Actor::new(VisibilitySet::new(), async move |state| {
///     while let Some(entry_id) = card_intersected_stream.next().await {
///         state.lock_mut().reveal(entry_id);
///     }
/// });
///
/// El::new().child_signal(visible.signal_ref(|set| set.len()).map(|n| n.to_string()))
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Mutable<T>,
    // Dropping the last clone cancels the processor
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
    #[cfg(debug_assertions)]
    #[allow(dead_code)]
    creation_location: &'static std::panic::Location<'static>,
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    #[track_caller]
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let state = Mutable::new(initial_state);
        let task_handle = Arc::new(Task::start_droppable(processor(state.clone())));

        Self {
            state,
            task_handle,
            #[cfg(debug_assertions)]
            creation_location: std::panic::Location::caller(),
        }
    }

    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.state.signal_cloned()
    }

    /// Derive a value without cloning the whole state.
    pub fn signal_ref<U, F>(&self, f: F) -> impl Signal<Item = U> + use<T, U, F>
    where
        U: PartialEq + Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        self.state.signal_ref(f)
    }
}
