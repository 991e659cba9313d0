//! Subject-name comparison.
//!
//! Subject names are typed by hand in several places (schedules,
//! enrollments, teacher assignments), so equality goes through a
//! normalization step instead of raw string comparison.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectNormalization {
    /// Byte-for-byte after trimming.
    Exact,
    /// Trimmed and lowercased.
    CaseInsensitive,
    /// Lowercased with every non-alphanumeric character removed, so
    /// "Organic Chemistry", "organic-chemistry" and "ORGANIC_CHEMISTRY" agree.
    #[default]
    Alphanumeric,
}

impl FromStr for SubjectNormalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(SubjectNormalization::Exact),
            "case_insensitive" | "case-insensitive" => Ok(SubjectNormalization::CaseInsensitive),
            "alphanumeric" => Ok(SubjectNormalization::Alphanumeric),
            other => Err(format!("unknown subject normalization: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectMatcher {
    mode: SubjectNormalization,
}

impl SubjectMatcher {
    pub fn new(mode: SubjectNormalization) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SubjectNormalization {
        self.mode
    }

    pub fn normalize(&self, subject: &str) -> String {
        let trimmed = subject.trim();
        match self.mode {
            SubjectNormalization::Exact => trimmed.to_string(),
            SubjectNormalization::CaseInsensitive => trimmed.to_lowercase(),
            SubjectNormalization::Alphanumeric => trimmed
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect(),
        }
    }

    pub fn subjects_match(&self, a: &str, b: &str) -> bool {
        let a = self.normalize(a);
        !a.is_empty() && a == self.normalize(b)
    }

    /// Whether any subject in `subjects` matches `subject`.
    pub fn covers<S: AsRef<str>>(&self, subjects: &[S], subject: &str) -> bool {
        subjects.iter().any(|s| self.subjects_match(s.as_ref(), subject))
    }
}
