use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Field roles ---

/// Semantic purpose of an editable field, independent of how the host page
/// physically represents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Short headline field (the title).
    PrimaryText,
    /// Multi-line body field (the description).
    LongText,
    /// Comma- or chip-separated keyword field (the tags).
    KeywordList,
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldRole::PrimaryText => write!(f, "primary_text"),
            FieldRole::LongText => write!(f, "long_text"),
            FieldRole::KeywordList => write!(f, "keyword_list"),
        }
    }
}

// --- Extracted snapshot ---

/// Which of the three roles were actually located on the page.
///
/// A `false` flag means "unknown", not "empty" — consumers must surface the
/// distinction instead of silently scoring the field as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsFound {
    pub title: bool,
    pub description: bool,
    pub tags: bool,
}

impl FieldsFound {
    pub fn all(&self) -> bool {
        self.title && self.description && self.tags
    }

    pub fn none(&self) -> bool {
        !self.title && !self.description && !self.tags
    }
}

/// Immutable snapshot of the editable content read off the host page.
/// Never mutated after creation, only replaced by a fresh scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    pub title: String,
    pub description: String,
    /// Raw keyword field content, comma-separated.
    pub tags: String,
    pub fields_found: FieldsFound,
    pub source_url: String,
    pub captured_at: DateTime<Utc>,
}

impl ExtractedMetadata {
    /// Snapshot for a page where nothing could be located.
    pub fn empty(source_url: &str, captured_at: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            tags: String::new(),
            fields_found: FieldsFound::default(),
            source_url: source_url.to_string(),
            captured_at,
        }
    }
}

// --- Score results ---

/// Letter grade mapped from the overall score via fixed breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    F,
}

impl Grade {
    /// Breakpoints every 5 points from 90 (A+) down to 40 (D); below is F.
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Grade::APlus,
            85..=89 => Grade::A,
            80..=84 => Grade::AMinus,
            75..=79 => Grade::BPlus,
            70..=74 => Grade::B,
            65..=69 => Grade::BMinus,
            60..=64 => Grade::CPlus,
            55..=59 => Grade::C,
            50..=54 => Grade::CMinus,
            45..=49 => Grade::DPlus,
            40..=44 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{s}")
    }
}

/// Per-field sub-scores, each 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub title: u8,
    pub description: u8,
    pub tags: u8,
}

/// Derived, stateless scoring output. Recomputed on demand; never cached
/// beyond the panel's current render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall_score: u8,
    pub grade: Grade,
    pub component_scores: ComponentScores,
    pub suggestions: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl ScoreResult {
    /// Suggestions capped for condensed UI surfaces.
    pub fn top_suggestions(&self, cap: usize) -> &[String] {
        &self.suggestions[..self.suggestions.len().min(cap)]
    }
}

// --- Injection lifecycle ---

/// Lifecycle of the overlay for one page session. Exactly one instance per
/// session; transitions are linear except Injected -> Idle on navigation and
/// AwaitingContainer -> Failed after exhausting retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionState {
    Idle,
    DetectingPage,
    AwaitingContainer,
    Injected,
    Failed,
}

impl std::fmt::Display for InjectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InjectionState::Idle => write!(f, "idle"),
            InjectionState::DetectingPage => write!(f, "detecting_page"),
            InjectionState::AwaitingContainer => write!(f, "awaiting_container"),
            InjectionState::Injected => write!(f, "injected"),
            InjectionState::Failed => write!(f, "failed"),
        }
    }
}
