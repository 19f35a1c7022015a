//! Continuation segments below the career tree
//!
//! Each segment extends the trunk with a stub, a junction dot and one or more
//! boxes. Segments reveal once, the same way cards do, keyed by [`SegmentKind`].

use super::collect_reveals;
use super::reveal_observer::{REVEAL_ID_ATTR, RevealObserver, emit_reveal};
use crate::dataflow::{Actor, Relay, relay};
use crate::theme::{self, accent_colors, delayed_transition, transition_all};
use gloo_timers::callback::Timeout;
use shared::{
    Highlight, HighlightPoint, RevealPose, SEGMENT_BOX_DELAY_MS, SEGMENT_CONNECTOR_DELAY_MS,
    Segments, VisibilitySet, highlight_box_delay_ms, highlight_branch_delay_ms,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;
use zoon::*;

const SEGMENT_REVEAL_THRESHOLD: f64 = 0.2;
const SEGMENT_ROOT_MARGIN: &str = "0px";
const TRUNK_STUB_PX: u32 = 96;
const BOX_CONNECTOR_PX: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentKind {
    Highlights,
    LookingFor,
    WhatYouGet,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 3] = [
        SegmentKind::Highlights,
        SegmentKind::LookingFor,
        SegmentKind::WhatYouGet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Highlights => "highlights",
            SegmentKind::LookingFor => "looking-for",
            SegmentKind::WhatYouGet => "what-you-get",
        }
    }

    fn heading(self) -> (&'static str, &'static str) {
        match self {
            SegmentKind::Highlights => ("CAREER HIGHLIGHTS", "Key achievements and impact."),
            SegmentKind::LookingFor => ("WHAT I'M LOOKING FOR NEXT", "Mission parameters."),
            SegmentKind::WhatYouGet => ("WHAT YOU GET FROM ME", "My work principles."),
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SegmentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| format!("unknown segment '{}'", value))
    }
}

/// Reveal state of the three segments plus the staggered highlight branches.
#[derive(Clone)]
pub struct ContinuationSegments {
    segments: Arc<Segments>,
    visible: Actor<VisibilitySet<SegmentKind>>,
    filled_branches: Actor<VisibilitySet<usize>>,
    branch_filled_relay: Relay<usize>,
    observer: Option<Rc<RevealObserver>>,
    stagger: Rc<RefCell<Option<TaskHandle>>>,
    branch_timers: Rc<RefCell<Vec<Timeout>>>,
}

impl ContinuationSegments {
    pub fn new(segments: Segments) -> Self {
        let (segment_revealed_relay, segment_revealed_stream) = relay::<SegmentKind>();
        let (branch_filled_relay, branch_filled_stream) = relay::<usize>();

        let visible = Actor::new(VisibilitySet::new(), move |state| {
            collect_reveals(state, segment_revealed_stream, "Segment")
        });

        let filled_branches = Actor::new(VisibilitySet::new(), move |state| {
            collect_reveals(state, branch_filled_stream, "Highlight branch")
        });

        let observer = match RevealObserver::new(
            SEGMENT_REVEAL_THRESHOLD,
            SEGMENT_ROOT_MARGIN,
            segment_revealed_relay.clone(),
        ) {
            Ok(observer) => Some(Rc::new(observer)),
            Err(error) => {
                zoon::eprintln!("{}; revealing every segment up front", error);
                for kind in SegmentKind::ALL {
                    emit_reveal(&segment_revealed_relay, kind);
                }
                None
            }
        };

        let this = Self {
            segments: Arc::new(segments),
            visible,
            filled_branches,
            branch_filled_relay,
            observer,
            stagger: Rc::new(RefCell::new(None)),
            branch_timers: Rc::new(RefCell::new(Vec::new())),
        };
        this.start_highlight_stagger();
        this
    }

    /// Once the highlights segment is revealed, fill box branches one by one.
    fn start_highlight_stagger(&self) {
        let revealed = self.revealed_signal(SegmentKind::Highlights);
        let branch_count = self.segments.highlights.len();
        let branch_filled_relay = self.branch_filled_relay.clone();
        let branch_timers = self.branch_timers.clone();

        let task = Task::start_droppable(async move {
            revealed.wait_for(true).await;
            let mut timers = branch_timers.borrow_mut();
            for index in 0..branch_count {
                let branch_filled_relay = branch_filled_relay.clone();
                timers.push(Timeout::new(highlight_branch_delay_ms(index), move || {
                    emit_branch_fill(&branch_filled_relay, index);
                }));
            }
        });
        self.stagger.borrow_mut().replace(task);
    }

    pub fn revealed_signal(&self, kind: SegmentKind) -> impl Signal<Item = bool> + use<> {
        self.visible.signal_ref(move |visible| visible.is_revealed(&kind))
    }

    fn branch_filled_signal(&self, index: usize) -> impl Signal<Item = bool> + use<> {
        self.filled_branches
            .signal_ref(move |filled| filled.is_revealed(&index))
    }

    fn observe(&self, element: &web_sys::Element) {
        if let Some(observer) = &self.observer {
            observer.observe(element);
        }
    }

    /// Cancels pending timers and stops observing.
    pub fn unmount(&self) {
        self.stagger.borrow_mut().take();
        self.branch_timers.borrow_mut().clear();
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

fn emit_branch_fill(branch_filled_relay: &Relay<usize>, index: usize) {
    debug_log!(crate::DEBUG_REVEAL, "Highlight branch {} filled", index);
    branch_filled_relay.send(index);
}

pub fn continuation_segments(segments: ContinuationSegments) -> impl Element {
    Column::new()
        .s(Width::fill())
        .item(highlights_segment(&segments))
        .item(list_segment(
            &segments,
            SegmentKind::LookingFor,
            segments.segments.looking_for.clone(),
        ))
        .item(list_segment(
            &segments,
            SegmentKind::WhatYouGet,
            segments.segments.what_you_get.clone(),
        ))
        .after_remove(move |_| segments.unmount())
}

fn segment_heading(kind: SegmentKind) -> impl Element {
    let (title, subtitle) = kind.heading();
    Column::new()
        .s(Align::new().center_x())
        .s(Padding::new().top(48).bottom(32))
        .s(Gap::new().y(16))
        .item(
            Paragraph::new()
                .s(Align::new().center_x())
                .s(Font::new()
                    .size(36)
                    .weight(FontWeight::Bold)
                    .color(theme::TEXT_PRIMARY)
                    .center())
                .update_raw_el(|raw_el| raw_el.style("letter-spacing", "0.1em"))
                .content(title),
        )
        .item(
            Paragraph::new()
                .s(Align::new().center_x())
                .s(Font::new().color(theme::TEXT_MUTED).center())
                .content(subtitle),
        )
}

/// Segment frame: heading, trunk stub, junction and the revealed body.
fn segment_frame(
    segments: &ContinuationSegments,
    kind: SegmentKind,
    max_width: u32,
    body: impl Element,
) -> impl Element {
    Column::new()
        .s(Width::fill())
        .item(segment_heading(kind))
        .item(
            Column::new()
                .s(Width::fill().max(max_width))
                .s(Align::new().center_x())
                .s(Padding::new().x(16).top(128).bottom(40))
                .update_raw_el(|raw_el| {
                    raw_el
                        .attr(REVEAL_ID_ATTR, kind.as_str())
                        .style("position", "relative")
                })
                .item(trunk_stub(segments.revealed_signal(kind)))
                .item(junction())
                .item(body)
                .after_insert({
                    let segments = segments.clone();
                    move |element| segments.observe(&element)
                }),
        )
}

fn trunk_stub(revealed: impl Signal<Item = bool> + Unpin + 'static) -> impl Element {
    El::new()
        .update_raw_el(|raw_el| {
            raw_el
                .style("position", "absolute")
                .style("left", "50%")
                .style("top", "0")
                .style("width", "4px")
                .style("height", format!("{}px", TRUNK_STUB_PX))
                .style("transform", "translateX(-50%)")
                .style("border-radius", "9999px")
                .style("background-color", theme::RAIL)
        })
        .child(vertical_fill(revealed, theme::FILL, theme::FILL_GLOW, None))
}

fn junction() -> impl Element {
    El::new().update_raw_el(|raw_el| {
        raw_el
            .style("position", "absolute")
            .style("left", "50%")
            .style("top", format!("{}px", TRUNK_STUB_PX))
            .style("width", "12px")
            .style("height", "12px")
            .style("transform", "translate(-50%, -50%)")
            .style("border-radius", "9999px")
            .style("background-color", theme::FILL)
            .style("box-shadow", theme::JUNCTION_GLOW)
            .style("z-index", "10")
    })
}

/// Top-anchored fill growing from 0 to 100 % height.
fn vertical_fill(
    filled: impl Signal<Item = bool> + Unpin + 'static,
    color: &'static str,
    glow: &'static str,
    delay_ms: Option<u32>,
) -> impl Element {
    let transition = match delay_ms {
        Some(delay_ms) => delayed_transition(theme::DURATION_BRANCH, delay_ms),
        None => delayed_transition(theme::DURATION_REVEAL, 0),
    };
    El::new().update_raw_el(move |raw_el| {
        raw_el
            .style("position", "absolute")
            .style("top", "0")
            .style("left", "0")
            .style("right", "0")
            .style("border-radius", "9999px")
            .style("background-color", color)
            .style("box-shadow", glow)
            .style("transition", transition)
            .style_signal("height", filled.map_bool(|| "100%", || "0%"))
    })
}

/// Vertical connector of `BOX_CONNECTOR_PX` above a box.
fn box_connector(fill: impl Element) -> impl Element {
    El::new()
        .update_raw_el(|raw_el| {
            raw_el
                .style("position", "absolute")
                .style("left", "50%")
                .style("top", format!("-{}px", BOX_CONNECTOR_PX))
                .style("width", "4px")
                .style("height", format!("{}px", BOX_CONNECTOR_PX))
                .style("transform", "translateX(-50%)")
                .style("border-radius", "9999px")
                .style("background-color", theme::RAIL)
        })
        .child(fill)
}

fn reveal_styles(
    raw_el: RawHtmlEl<web_sys::HtmlElement>,
    revealed: impl Signal<Item = bool> + Unpin + 'static,
    delay_ms: u32,
) -> RawHtmlEl<web_sys::HtmlElement> {
    let pose = revealed.map(RevealPose::for_segment).broadcast();
    raw_el
        .style("position", "relative")
        .style("backdrop-filter", "blur(4px)")
        .style("transition", delayed_transition(theme::DURATION_REVEAL, delay_ms))
        .style_signal("opacity", pose.signal().map(|pose| pose.opacity.to_string()))
        .style_signal("transform", pose.signal().map(|pose| pose.css_transform()))
}

fn highlights_segment(segments: &ContinuationSegments) -> impl Element {
    let highlights = segments.segments.highlights.clone();
    let body = Column::new()
        .s(Width::fill())
        .update_raw_el(|raw_el| raw_el.style("position", "relative"))
        .item(horizontal_connector(
            segments.revealed_signal(SegmentKind::Highlights),
        ))
        .item(
            Row::new()
                .multiline()
                .s(Width::fill())
                .s(Gap::both(32))
                .items(highlights.into_iter().enumerate().map(|(index, highlight)| {
                    highlight_box(segments, index, highlight)
                })),
        );
    segment_frame(segments, SegmentKind::Highlights, 1024, body)
}

/// Connector spanning the centers of the two highlight columns, filling from the middle.
fn horizontal_connector(revealed: impl Signal<Item = bool> + Unpin + 'static) -> impl Element {
    El::new()
        .update_raw_el(|raw_el| {
            raw_el
                .style("position", "absolute")
                .style("top", format!("-{}px", BOX_CONNECTOR_PX))
                .style("left", "25%")
                .style("right", "25%")
                .style("height", "4px")
                .style("border-radius", "9999px")
                .style("background-color", theme::RAIL)
        })
        .child(El::new().s(transition_all(theme::DURATION_REVEAL)).update_raw_el(
            move |raw_el| {
                raw_el
                    .style("position", "absolute")
                    .style("top", "0")
                    .style("bottom", "0")
                    .style("left", "50%")
                    .style("transform", "translateX(-50%)")
                    .style("border-radius", "9999px")
                    .style("background-color", theme::FILL)
                    .style("box-shadow", theme::BRANCH_GLOW)
                    .style_signal("width", revealed.map_bool(|| "100%", || "0%"))
            },
        ))
}

fn highlight_box(segments: &ContinuationSegments, index: usize, highlight: Highlight) -> impl Element {
    let colors = accent_colors(highlight.accent);
    let revealed = segments.revealed_signal(SegmentKind::Highlights);

    Column::new()
        .s(Width::growable().min(280))
        .s(Padding::all(32))
        .s(RoundedCorners::all(8))
        .s(Background::new().color(colors.background))
        .s(Borders::all(Border::new().width(1).color(colors.border)))
        .s(Gap::new().y(24))
        .update_raw_el(move |raw_el| {
            reveal_styles(raw_el, revealed, highlight_box_delay_ms(index)).style("flex", "1 1 0")
        })
        .item(box_connector(vertical_fill(
            segments.branch_filled_signal(index),
            colors.branch,
            colors.branch_glow,
            Some(0),
        )))
        .item(
            Paragraph::new()
                .s(Align::new().center_x())
                .s(Font::new()
                    .size(24)
                    .weight(FontWeight::Bold)
                    .color(colors.title)
                    .center())
                .content(highlight.title),
        )
        .item(bullet_list(
            14,
            highlight.points.into_iter().map(highlight_point).collect(),
        ))
}

fn highlight_point(point: HighlightPoint) -> RawHtmlEl<web_sys::HtmlElement> {
    let item = RawHtmlEl::new("li").child(point.text);
    match point.link {
        Some(link) => item.child(" ").child(
            RawHtmlEl::new("a")
                .attr("href", &link.url)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .style("color", theme::BADGE_TEXT)
                .style("text-decoration", "underline")
                .child(link.text),
        ),
        None => item,
    }
}

fn bullet_list(font_size_px: u32, items: Vec<RawHtmlEl<web_sys::HtmlElement>>) -> impl Element {
    RawHtmlEl::new("ul")
        .style("margin", "0")
        .style("padding-left", "20px")
        .style("list-style", "disc inside")
        .style("text-align", "left")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("gap", "12px")
        .style("font-size", format!("{}px", font_size_px))
        .style("line-height", "1.625")
        .style("color", theme::TEXT_BODY)
        .children(items)
}

fn list_segment(segments: &ContinuationSegments, kind: SegmentKind, items: Vec<String>) -> impl Element {
    let revealed = segments.revealed_signal(kind).broadcast();
    let body = Column::new()
        .s(Width::fill())
        .s(Gap::new().y(64))
        .item(
            Column::new()
                .s(Width::fill())
                .s(Padding::all(32))
                .s(RoundedCorners::all(8))
                .s(Background::new().color(theme::CARD_BACKGROUND))
                .s(Borders::all(Border::new().width(1).color(theme::BADGE_TEXT)))
                .update_raw_el({
                    let revealed = revealed.signal();
                    move |raw_el| reveal_styles(raw_el, revealed, SEGMENT_BOX_DELAY_MS)
                })
                .item(box_connector(vertical_fill(
                    revealed.signal(),
                    theme::FILL,
                    theme::BRANCH_GLOW,
                    Some(SEGMENT_CONNECTOR_DELAY_MS),
                )))
                .item(bullet_list(
                    18,
                    items
                        .into_iter()
                        .map(|text| RawHtmlEl::new("li").child(text))
                        .collect(),
                )),
        )
        .item((kind == SegmentKind::WhatYouGet).then(back_to_top_button));
    segment_frame(segments, kind, 896, body)
}

fn back_to_top_button() -> impl Element {
    Button::new()
        .s(Align::new().center_x())
        .s(Padding::new().x(32).y(12))
        .s(RoundedCorners::all(12))
        .s(Background::new().color(theme::CARD_BACKGROUND))
        .s(Borders::all(Border::new().width(1).color(theme::FINISH_BORDER)))
        .s(Font::new()
            .size(14)
            .weight(FontWeight::Bold)
            .color(theme::FINISH_TEXT))
        .update_raw_el(|raw_el| {
            raw_el
                .style("letter-spacing", "0.1em")
                .style("text-transform", "uppercase")
                .style("box-shadow", theme::FINISH_GLOW)
        })
        .label("Back to Top")
        .on_press(scroll_to_top)
}

fn scroll_to_top() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = web_sys::ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_ids_parse_back_from_the_reveal_attribute() {
        for kind in SegmentKind::ALL {
            assert_eq!(kind.as_str().parse::<SegmentKind>(), Ok(kind));
        }
        assert!("career".parse::<SegmentKind>().is_err());
    }

    #[test]
    fn segments_reveal_in_page_order() {
        let mut visible = VisibilitySet::new();
        visible.reveal(SegmentKind::WhatYouGet);
        visible.reveal(SegmentKind::Highlights);
        let order: Vec<_> = visible.iter().copied().collect();
        assert_eq!(order, [SegmentKind::Highlights, SegmentKind::WhatYouGet]);
    }
}
