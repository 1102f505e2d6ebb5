use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Date format used by the corpus builder, e.g. `"Jan 03, 2025, 10:15:00 AM"`.
pub const PUBLICATION_DATE_FORMAT: &str = "%b %d, %Y, %I:%M:%S %p";

/// Publication types observed in the corpus.
///
/// The set is closed at corpus-build time; anything unrecognised
/// deserialises as [`PublicationType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PublicationType {
    Briefing,
    #[serde(rename = "Press Release")]
    PressRelease,
    Report,
    Letter,
    Opinion,
    News,
    Publication,
    #[serde(rename = "Consultation response")]
    ConsultationResponse,
    Internal,
    Spreadsheet,
    #[serde(other, rename = "Unknown Type")]
    Unknown,
}

impl PublicationType {
    /// Every known type, including [`PublicationType::Unknown`].
    pub fn all() -> &'static [PublicationType] {
        &[
            PublicationType::Briefing,
            PublicationType::PressRelease,
            PublicationType::Report,
            PublicationType::Letter,
            PublicationType::Opinion,
            PublicationType::News,
            PublicationType::Publication,
            PublicationType::ConsultationResponse,
            PublicationType::Internal,
            PublicationType::Spreadsheet,
            PublicationType::Unknown,
        ]
    }

    /// Canonical display name, matching the corpus metadata spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationType::Briefing => "Briefing",
            PublicationType::PressRelease => "Press Release",
            PublicationType::Report => "Report",
            PublicationType::Letter => "Letter",
            PublicationType::Opinion => "Opinion",
            PublicationType::News => "News",
            PublicationType::Publication => "Publication",
            PublicationType::ConsultationResponse => "Consultation response",
            PublicationType::Internal => "Internal",
            PublicationType::Spreadsheet => "Spreadsheet",
            PublicationType::Unknown => "Unknown Type",
        }
    }
}

impl std::fmt::Display for PublicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PublicationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PublicationType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Per-chunk metadata, 1:1 with a chunk by id. Immutable once loaded.
///
/// Field names mirror the corpus builder's JSON keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(rename = "Title", default = "unknown_title")]
    pub title: String,

    #[serde(rename = "Article URL", default = "no_url")]
    pub article_url: String,

    #[serde(rename = "PDF URL", default = "no_pdf_url")]
    pub pdf_url: String,

    #[serde(rename = "Publication Type", default)]
    pub publication_type: PublicationType,

    /// Raw date string as written by the corpus builder. Kept verbatim;
    /// parse with [`ChunkMetadata::parsed_date`].
    #[serde(rename = "Publication Date", default = "unknown_date")]
    pub publication_date: String,

    #[serde(rename = "Summary", default = "no_summary")]
    pub summary: String,
}

impl Default for PublicationType {
    fn default() -> Self {
        PublicationType::Unknown
    }
}

fn unknown_title() -> String {
    "Unknown Title".to_string()
}

fn no_url() -> String {
    "No URL".to_string()
}

fn no_pdf_url() -> String {
    "No PDF URL".to_string()
}

fn unknown_date() -> String {
    "Unknown Date".to_string()
}

fn no_summary() -> String {
    "No Summary".to_string()
}

impl ChunkMetadata {
    /// Parses the publication date, if it follows the corpus format.
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.publication_date, PUBLICATION_DATE_FORMAT).ok()
    }

    /// Human-readable date (`"January 03, 2025"`), or the raw string when
    /// it does not parse.
    pub fn display_date(&self) -> String {
        match self.parsed_date() {
            Some(dt) => dt.format("%B %d, %Y").to_string(),
            None => self.publication_date.clone(),
        }
    }
}
