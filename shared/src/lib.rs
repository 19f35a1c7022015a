use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod timeline;

pub use timeline::{
    BranchFill, CardSide, CardTone, FlameTier, HIGHLIGHT_BOX_STAGGER_MS,
    HIGHLIGHT_BRANCH_STAGGER_MS, REVEAL_OFFSET_PX, RevealPose, SEGMENT_BOX_DELAY_MS, SEGMENT_CONNECTOR_DELAY_MS,
    ScrollProgress, TimelineFrame, ViewportGeometry, VisibilitySet, header_condensed,
    highlight_box_delay_ms, highlight_branch_delay_ms, item_progress,
};

// ===== MESSAGE TYPES =====

#[derive(Serialize, Deserialize, Debug)]
pub enum UpMsg {
    LoadContent,
}

#[derive(Serialize, Deserialize, Debug)]
pub enum DownMsg {
    ContentLoaded {
        content: PortfolioContent,
        warnings: Vec<String>,
    },
    ContentError(String),
}

// ===== ERRORS =====

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read portfolio content '{path}': {message}")]
    Read { path: String, message: String },
    #[error("failed to parse portfolio content '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("duplicate timeline entry id {0}, keeping the first occurrence")]
    DuplicateEntryId(u32),
    #[error("unsupported content version '{0}'")]
    UnsupportedVersion(String),
}

// ===== CONTENT TYPES =====

/// One career or life event on the timeline.
///
/// `description` is inserted into the page as raw markup. Whoever writes the
/// content file must sanitize it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub id: u32,
    pub role: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub annotation: Option<String>,
    pub period: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Personal milestone rendered with the accent treatment.
    #[serde(default)]
    pub special: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Purple,
    #[default]
    Blue,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HighlightLink {
    pub text: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HighlightPoint {
    pub text: String,
    #[serde(default)]
    pub link: Option<HighlightLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Highlight {
    pub title: String,
    #[serde(default)]
    pub accent: Accent,
    #[serde(default)]
    pub points: Vec<HighlightPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Segments {
    pub highlights: Vec<Highlight>,
    pub looking_for: Vec<String>,
    pub what_you_get: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Portfolio".to_string(),
            headline: String::new(),
        }
    }
}

/// Complete content document served to the frontend.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PortfolioContent {
    pub app: ContentSection,
    pub profile: Profile,
    pub timeline: TimelineSettings,
    pub entries: Vec<TimelineEntry>,
    pub segments: Segments,
}

impl PortfolioContent {
    pub fn from_toml_str(source: &str, path: &str) -> Result<Self, ContentError> {
        toml::from_str(source).map_err(|error| ContentError::Parse {
            path: path.to_string(),
            message: error.to_string(),
        })
    }

    /// Repairs out-of-range settings and duplicate ids in place.
    ///
    /// Returns one human readable warning per repair.
    pub fn validate_and_fix(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        match self.app.get_migration_strategy() {
            MigrationStrategy::None => {}
            MigrationStrategy::Recreate => {
                warnings.push(format!(
                    "{}; timeline settings reset to defaults",
                    ContentError::UnsupportedVersion(self.app.version.clone())
                ));
                self.app = ContentSection::default();
                self.timeline = TimelineSettings::default();
            }
        }

        warnings.extend(self.timeline.validate_and_fix());

        let mut seen = BTreeSet::new();
        let mut duplicates = Vec::new();
        self.entries.retain(|entry| {
            if seen.insert(entry.id) {
                true
            } else {
                duplicates.push(entry.id);
                false
            }
        });
        warnings.extend(
            duplicates
                .into_iter()
                .map(|id| ContentError::DuplicateEntryId(id).to_string()),
        );

        warnings
    }
}

// ===== CONFIG TYPES =====

// Versioning metadata; enables migration when the content format changes
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContentSection {
    pub version: String,
}

impl ContentSection {
    /// Current content format version
    pub const CURRENT_VERSION: &'static str = "1.0.0";

    pub fn get_migration_strategy(&self) -> MigrationStrategy {
        match self.version.as_str() {
            "1.0.0" => MigrationStrategy::None,
            _ => MigrationStrategy::Recreate,
        }
    }
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MigrationStrategy {
    None,
    Recreate,
}

/// Tuning constants for the scroll-driven timeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TimelineSettings {
    /// Fraction of the viewport height where the reading line sits.
    pub reading_line: f64,
    /// Branches fill once progress reaches `item_progress * branch_lead`.
    pub branch_lead: f64,
    pub boost_threshold: f64,
    pub afterburner_threshold: f64,
    /// Visible fraction of a card needed before it reveals.
    pub reveal_threshold: f64,
    /// Cards reveal this many pixels before they reach the viewport bottom.
    pub reveal_bottom_margin_px: u32,
    pub header_condense_px: f64,
}

impl TimelineSettings {
    pub const DEFAULT_READING_LINE: f64 = 0.7;
    pub const DEFAULT_BRANCH_LEAD: f64 = 0.8;
    pub const DEFAULT_BOOST_THRESHOLD: f64 = 0.35;
    pub const DEFAULT_AFTERBURNER_THRESHOLD: f64 = 0.82;
    pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.2;
    pub const DEFAULT_REVEAL_BOTTOM_MARGIN_PX: u32 = 100;
    pub const DEFAULT_HEADER_CONDENSE_PX: f64 = 50.0;

    pub fn validate_and_fix(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !(self.reading_line > 0.0 && self.reading_line <= 1.0) {
            warnings.push(format!(
                "reading_line {} outside (0, 1], using {}",
                self.reading_line,
                Self::DEFAULT_READING_LINE
            ));
            self.reading_line = Self::DEFAULT_READING_LINE;
        }

        if !(self.branch_lead > 0.0 && self.branch_lead <= 1.0) {
            warnings.push(format!(
                "branch_lead {} outside (0, 1], using {}",
                self.branch_lead,
                Self::DEFAULT_BRANCH_LEAD
            ));
            self.branch_lead = Self::DEFAULT_BRANCH_LEAD;
        }

        for (name, value) in [
            ("boost_threshold", &mut self.boost_threshold),
            ("afterburner_threshold", &mut self.afterburner_threshold),
            ("reveal_threshold", &mut self.reveal_threshold),
        ] {
            if !(0.0..=1.0).contains(value) {
                let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
                warnings.push(format!("{} {} clamped to {}", name, value, clamped));
                *value = clamped;
            }
        }

        if self.boost_threshold > self.afterburner_threshold {
            warnings.push(format!(
                "boost_threshold {} above afterburner_threshold {}, swapping",
                self.boost_threshold, self.afterburner_threshold
            ));
            std::mem::swap(&mut self.boost_threshold, &mut self.afterburner_threshold);
        }

        if !(self.header_condense_px >= 0.0) {
            warnings.push(format!(
                "header_condense_px {} is negative, using {}",
                self.header_condense_px,
                Self::DEFAULT_HEADER_CONDENSE_PX
            ));
            self.header_condense_px = Self::DEFAULT_HEADER_CONDENSE_PX;
        }

        warnings
    }

    /// Intersection root margin for career cards, e.g. `0px 0px -100px 0px`.
    pub fn card_root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.reveal_bottom_margin_px)
    }
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            reading_line: Self::DEFAULT_READING_LINE,
            branch_lead: Self::DEFAULT_BRANCH_LEAD,
            boost_threshold: Self::DEFAULT_BOOST_THRESHOLD,
            afterburner_threshold: Self::DEFAULT_AFTERBURNER_THRESHOLD,
            reveal_threshold: Self::DEFAULT_REVEAL_THRESHOLD,
            reveal_bottom_margin_px: Self::DEFAULT_REVEAL_BOTTOM_MARGIN_PX,
            header_condense_px: Self::DEFAULT_HEADER_CONDENSE_PX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[app]
version = "1.0.0"

[profile]
name = "Jordan Doe"
headline = "Lead AI Engineer"

[timeline]
reading_line = 0.7

[[entries]]
id = 1
role = "Analyst"
organization = "Acme Research"
period = "2015 - 2017"
tags = ["SQL"]

[[entries]]
id = 2
role = "Got Married!"
period = "Jul 2023"
special = true

[segments]
looking_for = ["A team of A-players"]

[[segments.highlights]]
title = "Acme"
accent = "purple"

[[segments.highlights.points]]
text = "Won an award"
link = { text = "(Press Release)", url = "https://example.com/press" }
"#;

    #[test]
    fn parses_content_document() {
        let content = PortfolioContent::from_toml_str(SAMPLE, "sample.toml").unwrap();

        assert_eq!(content.profile.name, "Jordan Doe");
        assert_eq!(content.entries.len(), 2);
        assert_eq!(content.entries[0].organization.as_deref(), Some("Acme Research"));
        assert_eq!(content.entries[0].annotation, None);
        assert!(!content.entries[0].special);
        assert!(content.entries[1].special);
        assert!(content.entries[1].tags.is_empty());
        assert_eq!(content.segments.highlights[0].accent, Accent::Purple);
        assert_eq!(
            content.segments.highlights[0].points[0].link.as_ref().map(|l| l.url.as_str()),
            Some("https://example.com/press")
        );
        assert!(content.segments.what_you_get.is_empty());
        assert_eq!(content.timeline, TimelineSettings::default());
    }

    #[test]
    fn parse_error_names_the_path() {
        let error = PortfolioContent::from_toml_str("[[entries]]\nid = \"x\"", "broken.toml")
            .unwrap_err();
        match error {
            ContentError::Parse { path, .. } => assert_eq!(path, "broken.toml"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_keep_first_entry() {
        let mut content = PortfolioContent::from_toml_str(SAMPLE, "sample.toml").unwrap();
        let mut duplicate = content.entries[0].clone();
        duplicate.role = "Impostor".to_string();
        content.entries.push(duplicate);

        let warnings = content.validate_and_fix();

        assert_eq!(content.entries.len(), 2);
        assert_eq!(content.entries[0].role, "Analyst");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("duplicate timeline entry id 1"));
    }

    #[test]
    fn out_of_range_settings_are_repaired() {
        let mut settings = TimelineSettings {
            reading_line: 1.5,
            branch_lead: 0.0,
            boost_threshold: 0.9,
            afterburner_threshold: 0.4,
            reveal_threshold: -0.5,
            ..TimelineSettings::default()
        };

        let warnings = settings.validate_and_fix();

        assert_eq!(settings.reading_line, TimelineSettings::DEFAULT_READING_LINE);
        assert_eq!(settings.branch_lead, TimelineSettings::DEFAULT_BRANCH_LEAD);
        assert_eq!(settings.boost_threshold, 0.4);
        assert_eq!(settings.afterburner_threshold, 0.9);
        assert_eq!(settings.reveal_threshold, 0.0);
        assert_eq!(warnings.len(), 4);
    }

    #[test]
    fn full_viewport_reading_line_is_accepted() {
        let mut settings = TimelineSettings {
            reading_line: 1.0,
            ..TimelineSettings::default()
        };
        assert!(settings.validate_and_fix().is_empty());
        assert_eq!(settings.reading_line, 1.0);
    }

    #[test]
    fn unknown_version_resets_settings() {
        let mut content = PortfolioContent::default();
        content.app.version = "0.1.0".to_string();
        content.timeline.reading_line = 0.5;

        let warnings = content.validate_and_fix();

        assert_eq!(content.app, ContentSection::default());
        assert_eq!(
            content.app.get_migration_strategy(),
            MigrationStrategy::None
        );
        assert_eq!(content.timeline, TimelineSettings::default());
        assert!(warnings[0].contains("unsupported content version '0.1.0'"));
    }

    #[test]
    fn current_version_needs_no_migration() {
        let mut content = PortfolioContent::default();
        content.timeline.reading_line = 0.5;

        let warnings = content.validate_and_fix();

        assert_eq!(content.app.version, ContentSection::CURRENT_VERSION);
        assert_eq!(content.timeline.reading_line, 0.5);
        assert!(warnings.is_empty());
    }

    #[test]
    fn card_root_margin_uses_negative_bottom() {
        assert_eq!(
            TimelineSettings::default().card_root_margin(),
            "0px 0px -100px 0px"
        );
    }

    #[test]
    fn down_msg_survives_json_transport() {
        let content = PortfolioContent::from_toml_str(SAMPLE, "sample.toml").unwrap();
        let msg = DownMsg::ContentLoaded {
            content: content.clone(),
            warnings: vec![],
        };
        let json = serde_json::to_string(&msg).unwrap();
        match serde_json::from_str::<DownMsg>(&json).unwrap() {
            DownMsg::ContentLoaded { content: received, .. } => assert_eq!(received, content),
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
