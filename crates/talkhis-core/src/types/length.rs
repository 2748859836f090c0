//! Summary length selection.
//!
//! Five ordered granularity levels, each mapped to exactly one Arabic
//! instruction. Lookups by label are total: anything unrecognized resolves
//! to [`LengthSelector::Medium`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Summary verbosity chosen by the user.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum LengthSelector {
    /// A handful of key points.
    VeryShort,
    /// One focused paragraph.
    Short,
    /// Balanced coverage of every main section.
    #[default]
    Medium,
    /// Detailed, keeping the important details of each section.
    Long,
    /// Comprehensive, per-section coverage.
    VeryLong,
}

impl LengthSelector {
    /// Arabic label as presented to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryShort => "قصير جداً",
            Self::Short => "قصير",
            Self::Medium => "متوسط",
            Self::Long => "طويل",
            Self::VeryLong => "طويل جداً",
        }
    }

    /// Stable kebab-case key, e.g. `very-short`.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// The length instruction placed at the top of the prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::VeryShort => "أنشئ ملخصًا موجزًا للغاية في بضعة نقاط رئيسية.",
            Self::Short => "أنشئ ملخصًا قصيرًا في فقرة واحدة مركزة.",
            Self::Medium => "أنشئ ملخصًا متوازنًا يغطي كافة الأقسام الرئيسية بشكل معتدل.",
            Self::Long => "أنشئ ملخصًا مفصلاً مع الحفاظ على أهم التفاصيل من كل قسم.",
            Self::VeryLong => {
                "أنشئ ملخصًا شاملاً وموسعًا لكل قسم، مع استيعاب أكبر قدر من المعلومات الهامة."
            }
        }
    }

    /// Strict lookup by Arabic label or kebab-case key.
    pub fn parse_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::iter()
            .find(|len| len.label() == value)
            .or_else(|| value.parse().ok())
    }

    /// Total lookup: unrecognized values resolve to the default (medium).
    pub fn from_label(value: &str) -> Self {
        Self::parse_label(value).unwrap_or_default()
    }

    /// All selectors in ascending order of verbosity.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Instruction lookup by raw label; unrecognized labels get the medium
/// instruction.
pub fn length_instruction(label: &str) -> &'static str {
    LengthSelector::from_label(label).instruction()
}
