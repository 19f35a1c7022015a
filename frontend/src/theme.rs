// Color and animation tokens for the portfolio page

use shared::{Accent, CardTone, FlameTier};
use zoon::*;

// Surface
pub const PAGE_BACKGROUND: &str = "rgb(2, 6, 23)";
pub const HEADER_BACKGROUND: &str = "rgba(0, 0, 0, 0.8)";
pub const CARD_BACKGROUND: &str = "rgba(15, 23, 42, 0.4)";
pub const CARD_BORDER: &str = "rgba(51, 65, 85, 0.5)";
pub const RAIL: &str = "rgba(51, 65, 85, 0.5)";

// Text
pub const TEXT_PRIMARY: &str = "rgb(255, 255, 255)";
pub const TEXT_BODY: &str = "rgb(209, 213, 219)";
pub const TEXT_MUTED: &str = "rgb(156, 163, 175)";
pub const TEXT_ORGANIZATION: &str = "rgb(192, 132, 252)";

// Trunk and branches
pub const FILL: &str = "rgb(59, 130, 246)";
pub const FILL_GLOW: &str = "0 0 10px rgba(59, 130, 246, 0.6)";
pub const BRANCH_GLOW: &str = "0 0 8px rgba(59, 130, 246, 0.6)";
pub const JUNCTION_GLOW: &str = "0 0 15px rgba(59, 130, 246, 0.8)";

// Period badge
pub const BADGE_TEXT: &str = "rgb(96, 165, 250)";
pub const BADGE_BACKGROUND: &str = "rgba(30, 58, 138, 0.2)";
pub const BADGE_BORDER: &str = "rgba(59, 130, 246, 0.2)";

// Tags
pub const TAG_BACKGROUND: &str = "rgba(0, 0, 0, 0.4)";
pub const TAG_BORDER: &str = "rgb(30, 41, 59)";

// Special events
pub const SPECIAL_BACKGROUND: &str = "rgba(80, 7, 36, 0.2)";
pub const SPECIAL_BORDER: &str = "rgba(244, 114, 182, 0.5)";

// Back to top
pub const FINISH_TEXT: &str = "rgb(74, 222, 128)";
pub const FINISH_BORDER: &str = "rgba(34, 197, 94, 0.5)";
pub const FINISH_GLOW: &str = "0 0 20px rgba(34, 197, 94, 0.2)";

pub struct CardColors {
    pub background: &'static str,
    pub border: &'static str,
}

pub fn card_colors(tone: CardTone) -> CardColors {
    match tone {
        CardTone::Standard => CardColors {
            background: CARD_BACKGROUND,
            border: CARD_BORDER,
        },
        CardTone::Special => CardColors {
            background: SPECIAL_BACKGROUND,
            border: SPECIAL_BORDER,
        },
    }
}

pub struct AccentColors {
    pub title: &'static str,
    pub background: &'static str,
    pub border: &'static str,
    pub branch: &'static str,
    pub branch_glow: &'static str,
}

pub fn accent_colors(accent: Accent) -> AccentColors {
    match accent {
        Accent::Purple => AccentColors {
            title: "rgb(192, 132, 252)",
            background: "rgba(59, 7, 100, 0.2)",
            border: "rgba(168, 85, 247, 0.5)",
            branch: "rgb(168, 85, 247)",
            branch_glow: "0 0 8px rgba(168, 85, 247, 0.6)",
        },
        Accent::Blue => AccentColors {
            title: "rgb(96, 165, 250)",
            background: "rgba(23, 37, 84, 0.2)",
            border: "rgba(59, 130, 246, 0.5)",
            branch: FILL,
            branch_glow: BRANCH_GLOW,
        },
    }
}

pub struct FlameColors {
    pub outer: &'static str,
    pub mid: &'static str,
    pub core: &'static str,
    pub glow: &'static str,
}

pub fn flame_colors(tier: FlameTier) -> FlameColors {
    match tier {
        FlameTier::Ember => FlameColors {
            outer: "rgba(249, 115, 22, 0.8)",
            mid: "transparent",
            core: "rgba(253, 224, 71, 0.8)",
            glow: "rgba(249, 115, 22, 0.6)",
        },
        FlameTier::Boost => FlameColors {
            outer: "rgb(249, 115, 22)",
            mid: "transparent",
            core: "rgb(254, 240, 138)",
            glow: "rgba(249, 115, 22, 0.8)",
        },
        FlameTier::Afterburner => FlameColors {
            outer: "rgb(239, 68, 68)",
            mid: "rgb(250, 204, 21)",
            core: "rgb(103, 232, 249)",
            glow: "rgba(239, 68, 68, 0.8)",
        },
    }
}

// Animation Durations
pub const DURATION_TRUNK: u32 = 100;
pub const DURATION_BRANCH: u32 = 500;
pub const DURATION_REVEAL: u32 = 700;

pub fn transition_all(duration: u32) -> impl Style<'static> {
    Transitions::new([Transition::all().duration(duration)])
}

/// `transition` with a start delay, for staggered segment reveals.
pub fn delayed_transition(duration: u32, delay_ms: u32) -> String {
    format!("all {}ms ease {}ms", duration, delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_cards_use_the_accent_palette() {
        let special = card_colors(CardTone::Special);
        let standard = card_colors(CardTone::Standard);

        assert_eq!(special.border, SPECIAL_BORDER);
        assert_eq!(special.background, SPECIAL_BACKGROUND);
        assert_eq!(standard.border, CARD_BORDER);
        assert_eq!(standard.background, CARD_BACKGROUND);
    }
}
