use crate::render::Rgba;
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Restrictions applied to every history extraction of a run.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    pub since: Option<DateTime<FixedOffset>>,
    pub until: Option<DateTime<FixedOffset>>,
    pub author: Option<String>,
    pub exclude_files: Option<Regex>,
    pub exclude_dirs: Option<Regex>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_since(mut self, since: DateTime<FixedOffset>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<FixedOffset>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_exclude_files(mut self, pattern: Regex) -> Self {
        self.exclude_files = Some(pattern);
        self
    }

    pub fn with_exclude_dirs(mut self, pattern: Regex) -> Self {
        self.exclude_dirs = Some(pattern);
        self
    }
}

/// Summary of one repository's history inside the filter window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub files_changed: u64,
    pub insertions: u64,
    pub deletions: u64,
    pub languages: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub repositories: u64,
    pub files_changed: u64,
    pub insertions: u64,
    pub deletions: u64,
    pub languages: BTreeMap<String, u64>,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: &ChangeRecord) {
        self.files_changed += record.files_changed;
        self.insertions += record.insertions;
        self.deletions += record.deletions;
        for (language, lines) in &record.languages {
            *self.languages.entry(language.clone()).or_insert(0) += lines;
        }
    }

    pub fn increment_repository_count(&mut self) {
        self.repositories += 1;
    }
}

/// One row of the language legend, derived from [`Totals`] at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageEntry {
    pub name: String,
    pub lines: u64,
    pub percentage: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub background: Rgba,
    pub foreground: Rgba,
    pub insertion_color: Rgba,
    pub deletion_color: Rgba,
    pub show_language_bar: bool,
    pub date_range: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            background: Rgba::TRANSPARENT,
            foreground: Rgba::BLACK,
            insertion_color: Rgba::new(26, 127, 55, 255),
            deletion_color: Rgba::new(209, 36, 47, 255),
            show_language_bar: false,
            date_range: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub date_range: Option<String>,
    pub totals: Totals,
}
