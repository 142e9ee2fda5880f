use crate::model::Totals;
use console::style;

pub const FILES_LABEL: &str = "files changed";
pub const INSERTIONS_LABEL: &str = "insertions(+)";
pub const DELETIONS_LABEL: &str = "deletions(-)";

/// The three numerals right-aligned to the width of the longest one.
pub fn padded_numerals(totals: &Totals) -> [String; 3] {
    let raw = [
        totals.files_changed.to_string(),
        totals.insertions.to_string(),
        totals.deletions.to_string(),
    ];
    let width = raw.iter().map(String::len).max().unwrap_or(0);
    raw.map(|n| format!("{n:>width$}"))
}

/// `<numeral> <label>` per stat, in files/insertions/deletions order.
pub fn stat_lines(totals: &Totals) -> [String; 3] {
    let [files, insertions, deletions] = padded_numerals(totals);
    [
        format!("{files} {FILES_LABEL}"),
        format!("{insertions} {INSERTIONS_LABEL}"),
        format!("{deletions} {DELETIONS_LABEL}"),
    ]
}

/// Stat lines padded on the right to a common width, so a monospace block
/// centers as one unit.
pub fn block_lines(totals: &Totals) -> [String; 3] {
    let lines = stat_lines(totals);
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    lines.map(|l| format!("{l:<width$}"))
}

/// Plain-text summary. With `styled`, the date label is bold and the
/// insertion/deletion lines are green/red.
pub fn text_report(totals: &Totals, date_range: Option<&str>, styled: bool) -> String {
    let mut out = String::new();
    if let Some(label) = date_range {
        let label = style(label).bold().force_styling(styled);
        out.push_str(&format!("{label}\n\n"));
    }

    let [files, insertions, deletions] = stat_lines(totals);
    let lines = [
        style(files).force_styling(styled),
        style(insertions).green().force_styling(styled),
        style(deletions).red().force_styling(styled),
    ];
    for line in lines {
        out.push_str(&format!("{line}\n"));
    }
    out
}
