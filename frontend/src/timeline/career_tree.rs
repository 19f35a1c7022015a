//! Career tree view: trunk with rocket, alternating cards with branch connectors

use super::CareerTimeline;
use super::reveal_observer::REVEAL_ID_ATTR;
use crate::theme::{self, flame_colors, transition_all};
use shared::{CardSide, CardTone, FlameTier, TimelineEntry};
use zoon::*;

const BRANCH_LENGTH_PX: u32 = 48;
const BRANCH_TOP_PX: u32 = 32;
const CARD_ROW_GAP_PX: u32 = 80;

const ROCKET_SVG: &str = r#"<svg viewBox="0 0 24 24" fill="none" width="32" height="32" style="transform: rotate(180deg); filter: drop-shadow(0 4px 6px rgba(0, 0, 0, 0.4));">
<path d="M12 2C12 2 19 8 19 14C19 19 16 22 12 22C8 22 5 19 5 14C5 8 12 2 12 2Z" fill="rgb(241, 245, 249)" stroke="rgb(203, 213, 225)" stroke-width="1"/>
<circle cx="12" cy="14" r="3" fill="rgba(59, 130, 246, 0.8)" stroke="rgb(147, 197, 253)" stroke-width="1"/>
<circle cx="12" cy="14" r="1" fill="white"/>
<path d="M5 14L2 19" stroke="rgb(148, 163, 184)" stroke-width="2" stroke-linecap="round"/>
<path d="M19 14L22 19" stroke="rgb(148, 163, 184)" stroke-width="2" stroke-linecap="round"/>
<path d="M12 22V24" stroke="rgb(249, 115, 22)" stroke-width="2" stroke-linecap="round"/>
</svg>"#;

// Fill colors come from the custom properties set on the wrapper.
const FLAME_SVG: &str = r#"<svg width="20" height="40" viewBox="0 0 20 40" fill="none">
<path d="M10 0C10 0 0 15 0 28C0 34.6274 4.47715 40 10 40C15.5228 40 20 34.6274 20 28C20 15 10 0 10 0Z" style="fill: var(--flame-outer); transition: fill 700ms;"/>
<path d="M10 5C10 5 2 18 2 28C2 33 5 38 10 38C15 38 18 33 18 28C18 18 10 5 10 5Z" opacity="0.9" style="fill: var(--flame-mid); transition: fill 700ms;"/>
<path d="M10 10C10 10 4 20 4 28C4 32 6.68629 36 10 36C13.3137 36 16 32 16 28C16 20 10 10 10 10Z" opacity="0.9" style="fill: var(--flame-core); transition: fill 700ms;"/>
</svg>"#;

pub fn career_tree(timeline: CareerTimeline) -> impl Element {
    Column::new()
        .s(Width::fill().max(1024))
        .s(Align::new().center_x())
        .s(Padding::new().x(16).y(40))
        .s(Gap::new().y(CARD_ROW_GAP_PX))
        .update_raw_el(|raw_el| raw_el.style("position", "relative"))
        .item(trunk(&timeline))
        .items(
            timeline
                .entries()
                .iter()
                .enumerate()
                .map(|(index, entry)| card_row(&timeline, index, entry.clone()))
                .collect::<Vec<_>>(),
        )
        .after_insert({
            let timeline = timeline.clone();
            move |element| timeline.mount(element.into())
        })
        .after_remove(move |_| timeline.unmount())
}

fn trunk(timeline: &CareerTimeline) -> impl Element {
    El::new()
        .update_raw_el(|raw_el| {
            raw_el
                .style("position", "absolute")
                .style("left", "50%")
                .style("top", "0")
                .style("bottom", "0")
                .style("width", "4px")
                .style("transform", "translateX(-50%)")
                .style("border-radius", "9999px")
                .style("background-color", theme::RAIL)
        })
        .child(trunk_fill(timeline))
}

fn trunk_fill(timeline: &CareerTimeline) -> impl Element {
    let mapper = timeline.mapper().clone();
    El::new()
        .s(transition_all(theme::DURATION_TRUNK))
        .update_raw_el(move |raw_el| {
            raw_el
                .style("position", "absolute")
                .style("top", "0")
                .style("width", "100%")
                .style("border-radius", "9999px")
                .style("background-color", theme::FILL)
                .style("box-shadow", theme::FILL_GLOW)
                .style_signal(
                    "height",
                    mapper
                        .trunk_height_signal()
                        .map(|percent| format!("{}%", percent)),
                )
        })
        .child(rocket(timeline))
}

fn rocket(timeline: &CareerTimeline) -> impl Element {
    El::new()
        .update_raw_el(|raw_el| {
            raw_el
                .style("position", "absolute")
                .style("bottom", "0")
                .style("left", "50%")
                .style("width", "32px")
                .style("height", "32px")
                .style("transform", "translate(-50%, 50%)")
                .style("z-index", "20")
        })
        .child(flame(timeline.mapper().tier_signal()))
        .child(
            RawHtmlEl::new("div")
                .style("position", "relative")
                .style("z-index", "10")
                .inner_markup(ROCKET_SVG),
        )
}

fn flame(tier_signal: impl Signal<Item = FlameTier> + Unpin + 'static) -> impl Element {
    let tier = tier_signal.broadcast();
    RawHtmlEl::new("div")
        .style("position", "absolute")
        .style("top", "-24px")
        .style("left", "50%")
        .style("transform-origin", "bottom center")
        .style("transition", "all 700ms ease-out")
        .style_signal(
            "transform",
            tier.signal()
                .map(|tier| format!("translateX(-50%) scale({})", tier.scale())),
        )
        .style_signal(
            "filter",
            tier.signal().map(|tier| {
                format!(
                    "drop-shadow(0 0 {}px {})",
                    tier.glow_radius_px(),
                    flame_colors(tier).glow
                )
            }),
        )
        .style_signal("--flame-outer", tier.signal().map(|tier| flame_colors(tier).outer))
        .style_signal(
            "--flame-mid",
            tier.signal().map(|tier| {
                if tier.shows_mid_layer() {
                    flame_colors(tier).mid
                } else {
                    "transparent"
                }
            }),
        )
        .style_signal("--flame-core", tier.signal().map(|tier| flame_colors(tier).core))
        .inner_markup(FLAME_SVG)
}

fn card_row(timeline: &CareerTimeline, index: usize, entry: TimelineEntry) -> impl Element {
    let side = CardSide::for_index(index);
    let spacer = El::new().s(Width::fill());
    let card_column = El::new()
        .s(Width::fill())
        .s(if side.is_reversed() {
            Padding::new().right(BRANCH_LENGTH_PX)
        } else {
            Padding::new().left(BRANCH_LENGTH_PX)
        })
        .child(card(timeline, index, side, entry));

    let row = Row::new().s(Width::fill()).s(Align::new().top());
    if side.is_reversed() {
        row.item(card_column).item(spacer)
    } else {
        row.item(spacer).item(card_column)
    }
}

fn card(timeline: &CareerTimeline, index: usize, side: CardSide, entry: TimelineEntry) -> impl Element {
    let pose = timeline.card_pose_signal(entry.id, side).broadcast();
    let colors = theme::card_colors(CardTone::for_entry(&entry));

    Column::new()
        .s(Width::fill())
        .s(Padding::all(24))
        .s(RoundedCorners::all(8))
        .s(Background::new().color(colors.background))
        .s(Borders::all(Border::new().width(1).color(colors.border)))
        .s(transition_all(theme::DURATION_REVEAL))
        .s(side_align(side))
        .update_raw_el({
            let entry_id = entry.id;
            move |raw_el| {
                raw_el
                    .attr(REVEAL_ID_ATTR, &entry_id.to_string())
                    .style("position", "relative")
                    .style("backdrop-filter", "blur(4px)")
                    .style_signal("opacity", pose.signal().map(|pose| pose.opacity.to_string()))
                    .style_signal("transform", pose.signal().map(|pose| pose.css_transform()))
            }
        })
        .item(branch_connector(timeline, index, side))
        .item(card_body(side, entry))
        .after_insert({
            let timeline = timeline.clone();
            move |element| timeline.observe(&element)
        })
}

fn branch_connector(timeline: &CareerTimeline, index: usize, side: CardSide) -> impl Element {
    let width = timeline.mapper().branch_width_signal(index);
    let (edge, anchor) = if side.is_reversed() {
        ("right", "right")
    } else {
        ("left", "left")
    };

    El::new()
        .update_raw_el(move |raw_el| {
            raw_el
                .style("position", "absolute")
                .style("top", format!("{}px", BRANCH_TOP_PX))
                .style(edge, format!("-{}px", BRANCH_LENGTH_PX))
                .style("width", format!("{}px", BRANCH_LENGTH_PX))
                .style("height", "4px")
                .style("pointer-events", "none")
                .style("border-radius", "9999px")
                .style("background-color", theme::RAIL)
        })
        .child(
            El::new()
                .s(transition_all(theme::DURATION_BRANCH))
                .update_raw_el(move |raw_el| {
                    raw_el
                        .style("position", "absolute")
                        .style("top", "0")
                        .style("bottom", "0")
                        .style(anchor, "0")
                        .style("border-radius", "9999px")
                        .style("background-color", theme::FILL)
                        .style("box-shadow", theme::BRANCH_GLOW)
                        .style_signal("width", width.map(|percent| format!("{}%", percent)))
                }),
        )
}

fn side_align(side: CardSide) -> Align<'static> {
    if side.is_reversed() {
        Align::new().right()
    } else {
        Align::new().left()
    }
}

fn card_body(side: CardSide, entry: TimelineEntry) -> impl Element {
    let organization_spacer = entry.organization.is_some() && entry.annotation.is_none();

    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(4))
        .item(period_badge(side, entry.period))
        .item(
            Paragraph::new()
                .s(side_align(side))
                .s(Font::new().size(24).weight(FontWeight::Bold).color(theme::TEXT_PRIMARY))
                .content(entry.role),
        )
        .item(entry.organization.map(|organization| {
            Paragraph::new()
                .s(side_align(side))
                .s(Font::new()
                    .size(18)
                    .weight(FontWeight::Medium)
                    .family([FontFamily::Monospace])
                    .color(theme::TEXT_ORGANIZATION))
                .content(organization)
        }))
        .item(entry.annotation.map(|annotation| {
            Paragraph::new()
                .s(side_align(side))
                .s(Padding::new().bottom(16))
                .s(Font::new()
                    .size(14)
                    .family([FontFamily::Monospace])
                    .color(theme::TEXT_ORGANIZATION))
                .content(annotation)
        }))
        .item(organization_spacer.then(|| El::new().s(Height::exact(16))))
        // Descriptions are trusted markup from the content file.
        .item(entry.description.map(|description| {
            RawHtmlEl::new("div")
                .style("margin", "0 0 16px 0")
                .style("text-align", "left")
                .style("font-size", "14px")
                .style("line-height", "1.625")
                .style("color", theme::TEXT_MUTED)
                .inner_markup(&description)
        }))
        .item((!entry.tags.is_empty()).then(|| tag_row(side, entry.tags)))
}

fn period_badge(side: CardSide, period: String) -> impl Element {
    El::new()
        .s(side_align(side))
        .s(Padding::new().x(8).y(2))
        .s(RoundedCorners::all(4))
        .s(Background::new().color(theme::BADGE_BACKGROUND))
        .s(Borders::all(Border::new().width(1).color(theme::BADGE_BORDER)))
        .s(Font::new().size(12).color(theme::BADGE_TEXT))
        .update_raw_el(|raw_el| {
            raw_el
                .style("letter-spacing", "0.1em")
                .style("margin-bottom", "8px")
        })
        .child(period)
}

fn tag_row(side: CardSide, tags: Vec<String>) -> impl Element {
    Row::new()
        .multiline()
        .s(Width::fill())
        .s(Gap::both(8))
        .update_raw_el(move |raw_el| {
            raw_el.style(
                "justify-content",
                if side.is_reversed() { "flex-end" } else { "flex-start" },
            )
        })
        .items(tags.into_iter().map(|tag| {
            El::new()
                .s(Padding::new().x(8).y(4))
                .s(RoundedCorners::all(2))
                .s(Background::new().color(theme::TAG_BACKGROUND))
                .s(Borders::all(Border::new().width(1).color(theme::TAG_BORDER)))
                .s(Font::new().size(10).color(theme::TEXT_BODY))
                .update_raw_el(|raw_el| {
                    raw_el
                        .style("text-transform", "uppercase")
                        .style("letter-spacing", "0.05em")
                        .style("cursor", "default")
                })
                .child(tag)
        }))
}
