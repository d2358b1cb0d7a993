//! Dictionary Enums
//!
//! Enumerated fields carry a stable integer code (the stored value) and a
//! display label (what filter forms show). `from_label` resolves a form
//! value back to a variant; [`Labeled::ALL`] is the "no constraint"
//! sentinel every enumerated filter combo offers.

use serde::{Deserialize, Serialize};

/// A dictionary enum with a per-variant display label.
pub trait Labeled: Sized + Copy {
    /// Sentinel label meaning "no constraint for this field".
    const ALL: &'static str = "All";

    /// Stored integer code.
    fn code(self) -> i64;

    /// Display label for UI combos and tables.
    fn label(self) -> &'static str;

    /// Resolve a display label; `None` for unknown labels.
    fn from_label(label: &str) -> Option<Self>;

    /// All variants, in display order.
    fn variants() -> &'static [Self];
}

// ============================================================================
// Soft Delete Flag
// ============================================================================

/// Soft-delete flag. Rows are never physically removed; deletion flips
/// this to `Deleted` and every query filters on `Active`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i32)]
pub enum DeleteFlag {
    Active = 0,
    Deleted = 1,
}

// ============================================================================
// Data Category
// ============================================================================

/// Media category of a dataset or collection entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i32)]
pub enum DataCategory {
    Text = 1,
    Image = 2,
    Audio = 3,
    Video = 4,
}

impl Labeled for DataCategory {
    fn code(self) -> i64 {
        self as i64
    }

    fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Audio => "Audio",
            Self::Video => "Video",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|v| v.label() == label)
    }

    fn variants() -> &'static [Self] {
        &[Self::Text, Self::Image, Self::Audio, Self::Video]
    }
}

// ============================================================================
// Record Status
// ============================================================================

/// Enabled/disabled switch on datasets and questions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i32)]
pub enum RecordStatus {
    Disabled = 0,
    Enabled = 1,
}

impl Labeled for RecordStatus {
    fn code(self) -> i64 {
        self as i64
    }

    fn label(self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|v| v.label() == label)
    }

    fn variants() -> &'static [Self] {
        &[Self::Enabled, Self::Disabled]
    }
}

// ============================================================================
// Question Type
// ============================================================================

/// Question format of a collection entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i32)]
pub enum QuestionType {
    MultipleChoice = 1,
    TrueFalse = 2,
    QuestionAnswer = 3,
}

impl Labeled for QuestionType {
    fn code(self) -> i64 {
        self as i64
    }

    fn label(self) -> &'static str {
        match self {
            Self::MultipleChoice => "Multiple choice",
            Self::TrueFalse => "True/false",
            Self::QuestionAnswer => "Q&A",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|v| v.label() == label)
    }

    fn variants() -> &'static [Self] {
        &[Self::MultipleChoice, Self::TrueFalse, Self::QuestionAnswer]
    }
}

// ============================================================================
// Question Label
// ============================================================================

/// Capability tag a question exercises.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i32)]
pub enum QuestionLabel {
    Math = 1,
    Reading = 2,
    RagRecall = 3,
}

impl Labeled for QuestionLabel {
    fn code(self) -> i64 {
        self as i64
    }

    fn label(self) -> &'static str {
        match self {
            Self::Math => "Math",
            Self::Reading => "Reading comprehension",
            Self::RagRecall => "RAG recall",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|v| v.label() == label)
    }

    fn variants() -> &'static [Self] {
        &[Self::Math, Self::Reading, Self::RagRecall]
    }
}

// ============================================================================
// Model Type
// ============================================================================

/// Where a configured model runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i32)]
pub enum ModelType {
    Remote = 1,
    Local = 2,
}

impl Labeled for ModelType {
    fn code(self) -> i64 {
        self as i64
    }

    fn label(self) -> &'static str {
        match self {
            Self::Remote => "Remote model",
            Self::Local => "Local model",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|v| v.label() == label)
    }

    fn variants() -> &'static [Self] {
        &[Self::Remote, Self::Local]
    }
}

// ============================================================================
// Config Type
// ============================================================================

/// Role a model configuration plays in an evaluation run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i32)]
pub enum ConfigType {
    TestModel = 1,
    RefereeModel = 2,
}

impl Labeled for ConfigType {
    fn code(self) -> i64 {
        self as i64
    }

    fn label(self) -> &'static str {
        match self {
            Self::TestModel => "Model under test",
            Self::RefereeModel => "Referee model",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|v| v.label() == label)
    }

    fn variants() -> &'static [Self] {
        &[Self::TestModel, Self::RefereeModel]
    }
}
