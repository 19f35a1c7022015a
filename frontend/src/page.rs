use crate::theme;
use crate::timeline::CareerTimeline;
use crate::timeline::career_tree::career_tree;
use crate::timeline::segments::{ContinuationSegments, continuation_segments};
use shared::{PortfolioContent, Profile, header_condensed};
use zoon::*;

pub fn portfolio_page(content: &PortfolioContent) -> impl Element {
    let timeline = CareerTimeline::new(content.entries.clone(), &content.timeline);
    let segments = ContinuationSegments::new(content.segments.clone());

    let condense_px = content.timeline.header_condense_px;
    let condensed = timeline
        .tracker()
        .scroll_y_signal()
        .map(move |scroll_y| header_condensed(scroll_y, condense_px))
        .dedupe();

    Column::new()
        .s(Width::fill())
        .s(Padding::new().top(80).bottom(80))
        .item(header(&content.profile, condensed))
        .item(journey_heading())
        .item(career_tree(timeline))
        .item(continuation_segments(segments))
}

fn header(profile: &Profile, condensed: impl Signal<Item = bool> + Unpin + 'static) -> impl Element {
    let condensed = condensed.broadcast();
    Row::new()
        .s(Width::fill())
        .s(Padding::new().x(24))
        .s(Gap::new().x(24))
        .update_raw_el(|raw_el| {
            raw_el
                .style("position", "fixed")
                .style("top", "0")
                .style("left", "0")
                .style("z-index", "40")
                .style("transition", "all 300ms")
                .style_signal(
                    "background-color",
                    condensed
                        .signal()
                        .map_bool(|| theme::HEADER_BACKGROUND, || "transparent"),
                )
                .style_signal(
                    "backdrop-filter",
                    condensed.signal().map_bool(|| "blur(12px)", || "none"),
                )
                .style_signal(
                    "border-bottom",
                    condensed.signal().map_bool(
                        || "1px solid rgba(255, 255, 255, 0.1)",
                        || "1px solid transparent",
                    ),
                )
                .style_signal(
                    "padding-top",
                    condensed.signal().map_bool(|| "12px", || "24px"),
                )
                .style_signal(
                    "padding-bottom",
                    condensed.signal().map_bool(|| "12px", || "24px"),
                )
        })
        .item(
            El::new()
                .s(Font::new()
                    .size(24)
                    .weight(FontWeight::ExtraBold)
                    .color(theme::TEXT_PRIMARY))
                .update_raw_el(|raw_el| raw_el.style("letter-spacing", "0.1em"))
                .child(profile.name.to_uppercase()),
        )
        .item(
            El::new()
                .s(Align::new().right())
                .s(Font::new().size(14).color(theme::TEXT_MUTED))
                .child(profile.headline.clone()),
        )
}

fn journey_heading() -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(Padding::new().top(80).bottom(16))
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
                .content("CAREER JOURNEY"),
        )
        .item(
            Paragraph::new()
                .s(Align::new().center_x())
                .s(Font::new().color(theme::TEXT_MUTED).center())
                .content("A ")
                .content(El::new().s(Font::new().color(theme::BADGE_TEXT)).child("Professional"))
                .content(" + ")
                .content(El::new().s(Font::new().color(theme::SPECIAL_BORDER)).child("Personal"))
                .content(" Timeline."),
        )
}
