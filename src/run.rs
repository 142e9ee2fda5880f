use crate::error::{BragError, Result};
use crate::git::{extract, GitCli, HistorySource, RepoLocator};
use crate::language::LanguageTable;
use crate::model::{FilterSet, RenderOptions, StatsOutput, Totals, SCHEMA_VERSION};
use crate::render::{Renderer, Rgba};
use crate::report::text_report;
use crate::util::date_range_label;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, warn};

pub const NO_REPOSITORIES: &str = "No git repositories found in the specified directories.";

/// Everything a run needs, already parsed and validated by the caller.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub dirs: Vec<PathBuf>,
    pub filters: FilterSet,
    pub output: Option<PathBuf>,
    pub background: Option<String>,
    pub color: Option<String>,
    pub lang: bool,
    pub json: bool,
    pub font: Option<PathBuf>,
}

/// Walks every input directory and folds the change records of all
/// repositories found into one total. Per-repository failures are logged
/// and leave the total untouched.
pub fn collect(
    dirs: &[PathBuf],
    filters: &FilterSet,
    source: &dyn HistorySource,
    progress: &ProgressBar,
) -> Result<Totals> {
    if dirs.is_empty() {
        return Err(BragError::NoDirectories);
    }

    let locator = RepoLocator::new(filters.exclude_dirs.as_ref());
    let languages = LanguageTable::builtin();
    let mut totals = Totals::new();

    for dir in dirs {
        // unreadable inputs warn from inside the walk
        let repos = progress.suspend(|| locator.locate(dir));
        for repo in repos {
            progress.set_message(format!("Scanning {}", repo.display()));
            match extract(&repo, filters, source, languages) {
                Ok(record) => {
                    debug!(
                        repo = %repo.display(),
                        files = record.files_changed,
                        insertions = record.insertions,
                        deletions = record.deletions,
                        "collected"
                    );
                    totals.add(&record);
                    totals.increment_repository_count();
                }
                Err(e) => progress.suspend(|| {
                    warn!("could not get git stats for '{}': {e}", repo.display())
                }),
            }
            progress.inc(1);
        }
    }

    Ok(totals)
}

fn render_options(options: &RunOptions, date_range: Option<String>) -> anyhow::Result<RenderOptions> {
    let mut render = RenderOptions {
        show_language_bar: options.lang,
        date_range,
        ..RenderOptions::default()
    };
    if let Some(bg) = &options.background {
        render.background = Rgba::parse_hex(bg).context("invalid background color")?;
    }
    if let Some(fg) = &options.color {
        render.foreground = Rgba::parse_hex(fg).context("invalid text color")?;
    }
    Ok(render)
}

fn spinner(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Scanning repositories...");
    pb
}

pub fn exec(options: RunOptions) -> anyhow::Result<()> {
    exec_with(options, &GitCli)
}

pub fn exec_with(options: RunOptions, source: &dyn HistorySource) -> anyhow::Result<()> {
    let date_range = date_range_label(&options.filters);
    // colors are checked before any repository is scanned
    let render = render_options(&options, date_range.clone())?;

    let pb = spinner(options.json);
    let totals = collect(&options.dirs, &options.filters, source, &pb)
        .context("Failed to collect repository statistics")?;
    pb.finish_and_clear();

    if totals.repositories == 0 {
        println!("{NO_REPOSITORIES}");
        return Ok(());
    }

    if let Some(path) = &options.output {
        let mut renderer =
            Renderer::new(options.font.as_deref()).context("Failed to load font")?;
        renderer
            .render_to_file(&totals, &render, path)
            .with_context(|| format!("failed to export PNG to {}", path.display()))?;
        println!("Statistics exported to {}", path.display());
        return Ok(());
    }

    if options.json {
        let output = StatsOutput {
            version: SCHEMA_VERSION,
            date_range,
            totals,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!(
        "{}",
        text_report(&totals, date_range.as_deref(), console::colors_enabled())
    );
    Ok(())
}
