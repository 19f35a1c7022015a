//! PortfolioApp - loads the content document and mounts the page

use crate::connection::ConnectionAdapter;
use crate::dataflow::Actor;
use crate::page::portfolio_page;
use crate::theme;
use futures::StreamExt;
use shared::{DownMsg, PortfolioContent, UpMsg};
use std::sync::Arc;
use zoon::*;

#[derive(Debug, Clone)]
pub enum ContentState {
    Loading,
    Ready(Arc<PortfolioContent>),
}

pub struct PortfolioApp {
    /// Content received from the backend
    pub content: Actor<ContentState>,

    /// Backend communication connection (Arc for cloning)
    pub connection: Arc<ConnectionAdapter>,
}

impl PortfolioApp {
    pub fn new() -> Self {
        let (connection, mut down_msg_stream) = ConnectionAdapter::new();

        let content = Actor::new(ContentState::Loading, async move |state| {
            while let Some(down_msg) = down_msg_stream.next().await {
                state.set(content_state_from(down_msg));
            }
        });

        let connection = Arc::new(connection);
        Task::start({
            let connection = connection.clone();
            async move {
                connection.send_up_msg(UpMsg::LoadContent).await;
            }
        });

        Self {
            content,
            connection,
        }
    }

    /// Root UI element. Owns the app until the element is removed.
    pub fn root(self) -> impl Element {
        El::new()
            .s(Width::fill())
            .s(Height::screen())
            .s(Background::new().color(theme::PAGE_BACKGROUND))
            .s(Font::new().color(theme::TEXT_BODY).family([
                FontFamily::new("Inter"),
                FontFamily::new("system-ui"),
                FontFamily::new("Segoe UI"),
                FontFamily::new("Arial"),
                FontFamily::SansSerif,
            ]))
            .child_signal(self.content.signal().map(|state| match state {
                ContentState::Loading => loading_view().into_raw(),
                ContentState::Ready(content) => portfolio_page(&content).into_raw(),
            }))
            .after_remove(move |_| drop(self))
    }
}

fn content_state_from(down_msg: DownMsg) -> ContentState {
    match down_msg {
        DownMsg::ContentLoaded { content, warnings } => {
            for warning in &warnings {
                zoon::eprintln!("Content warning: {}", warning);
            }
            debug_log!(
                crate::DEBUG_CONTENT,
                "Content loaded: {} entries, {} highlights",
                content.entries.len(),
                content.segments.highlights.len()
            );
            ContentState::Ready(Arc::new(content))
        }
        DownMsg::ContentError(error) => {
            zoon::eprintln!("Failed to load content: {}", error);
            ContentState::Ready(Arc::new(PortfolioContent::default()))
        }
    }
}

fn loading_view() -> impl Element {
    El::new()
        .s(Width::fill())
        .s(Height::screen())
        .s(Font::new().size(14).color(theme::TEXT_MUTED))
        .child(El::new().s(Align::center()).child("Loading..."))
}
