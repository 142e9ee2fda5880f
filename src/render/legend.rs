use crate::language::{LanguageTable, OTHER_LANGUAGE, UNKNOWN_COLOR};
use crate::model::LanguageEntry;
use std::collections::BTreeMap;

pub const TOP_LANGUAGES: usize = 3;

/// Largest languages first, with everything past the top three folded into
/// a single gray "Other" entry. Empty when no classified lines were recorded.
pub fn language_entries(
    languages: &BTreeMap<String, u64>,
    table: &LanguageTable,
) -> Vec<LanguageEntry> {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut entries: Vec<LanguageEntry> = languages
        .iter()
        .map(|(name, &lines)| LanguageEntry {
            name: name.clone(),
            lines,
            percentage: lines as f64 / total as f64 * 100.0,
            color: table.color_for(name),
        })
        .collect();

    // name breaks ties so the bar is stable between runs
    entries.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.name.cmp(&b.name)));

    if entries.len() <= TOP_LANGUAGES {
        return entries;
    }

    let rest = entries.split_off(TOP_LANGUAGES);
    entries.push(LanguageEntry {
        name: OTHER_LANGUAGE.to_string(),
        lines: rest.iter().map(|e| e.lines).sum(),
        percentage: rest.iter().map(|e| e.percentage).sum(),
        color: UNKNOWN_COLOR,
    });
    entries
}
