use crate::model::FilterSet;
use crate::run::RunOptions;
use crate::util::{resolve_since, resolve_until, Clock, SystemClock};
use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gitbrag")]
#[command(about = "Display git statistics for local repositories")]
#[command(
    long_about = "Outputs files changed, insertions and deletions summed over every git \
repository found in the given directories, as text or as a PNG card."
)]
#[command(after_help = "Examples:
  gitbrag ./ projects
  gitbrag ./ --since 7d --author john@example.com
  gitbrag ./ --since 2024-01-01 --until 2024-12-31
  gitbrag ./ -O stats.png -B \"#282a36\" -C f8f8f2 --lang")]
#[command(version)]
pub struct Cli {
    #[arg(required = true, help = "Directories to search for git repositories")]
    pub dirs: Vec<PathBuf>,

    #[arg(long, help = "Specific date (e.g. 2024-01-01 12:03:04) or duration (e.g. 1d, 2h30m)")]
    pub since: Option<String>,

    #[arg(long, help = "Specific date (e.g. 2024-12-31 23:59:59)")]
    pub until: Option<String>,

    #[arg(long, help = "Filter by author name or email")]
    pub author: Option<String>,

    #[arg(short = 'O', long, help = "Export statistics to PNG file (e.g. stats.png)")]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'B',
        long,
        help = "Background color in hex format (e.g. #282a36 or 282a36), transparent by default"
    )]
    pub background: Option<String>,

    #[arg(short = 'C', long, help = "Text color in hex format (e.g. #f8f8f2 or f8f8f2)")]
    pub color: Option<String>,

    #[arg(long, help = "Show language breakdown with top 3 languages and others (PNG output only)")]
    pub lang: bool,

    #[arg(long, value_name = "REGEX", help = "Skip files whose path matches this pattern")]
    pub exclude_files: Option<String>,

    #[arg(long, value_name = "REGEX", help = "Skip directories whose name matches this pattern")]
    pub exclude_dirs: Option<String>,

    #[arg(long, conflicts_with = "output", help = "Output as JSON")]
    pub json: bool,

    #[arg(
        long,
        value_name = "PATH",
        help = "Font file for PNG output; without it the host's installed fonts are used, so images differ between machines"
    )]
    pub font: Option<PathBuf>,

    #[arg(short, long, help = "Log every repository processed")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn init_logging(&self) {
        let default = if self.verbose { "gitbrag=debug,warn" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }

    pub fn execute(self) -> Result<()> {
        let options = self.into_options(&SystemClock)?;
        crate::run::exec(options)
    }

    pub fn into_options(self, clock: &dyn Clock) -> Result<RunOptions> {
        let mut filters = FilterSet::new();
        if let Some(since) = non_empty(&self.since) {
            filters = filters.with_since(resolve_since(since, clock).context("invalid --since value")?);
        }
        if let Some(until) = non_empty(&self.until) {
            filters = filters.with_until(resolve_until(until).context("invalid --until value")?);
        }
        if let Some(author) = non_empty(&self.author) {
            filters = filters.with_author(author);
        }
        if let Some(pattern) = non_empty(&self.exclude_files) {
            filters = filters
                .with_exclude_files(Regex::new(pattern).context("invalid --exclude-files pattern")?);
        }
        if let Some(pattern) = non_empty(&self.exclude_dirs) {
            filters = filters
                .with_exclude_dirs(Regex::new(pattern).context("invalid --exclude-dirs pattern")?);
        }

        Ok(RunOptions {
            dirs: self.dirs,
            filters,
            output: self.output.filter(|p| !p.as_os_str().is_empty()),
            background: self.background.filter(|s| !s.is_empty()),
            color: self.color.filter(|s| !s.is_empty()),
            lang: self.lang,
            json: self.json,
            font: self.font,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<FixedOffset> {
            DateTime::parse_from_rfc3339("2024-01-08T00:00:00Z").unwrap()
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gitbrag").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn requires_a_directory() {
        assert!(Cli::try_parse_from(["gitbrag"]).is_err());
    }

    #[test]
    fn builds_filters_from_flags() {
        let cli = parse(&[
            "./",
            "projects",
            "--since",
            "7d",
            "--until",
            "2024-01-31T00:00:00Z",
            "--author",
            "John Doe",
            "--exclude-dirs",
            "^target$",
            "-O",
            "stats.png",
            "-B",
            "282a36",
            "--lang",
        ]);
        let options = cli.into_options(&FixedClock).unwrap();

        assert_eq!(options.dirs, vec![PathBuf::from("./"), PathBuf::from("projects")]);
        assert_eq!(
            options.filters.since,
            Some(DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap())
        );
        assert_eq!(
            options.filters.until,
            Some(DateTime::parse_from_rfc3339("2024-01-31T00:00:00Z").unwrap())
        );
        assert_eq!(options.filters.author.as_deref(), Some("John Doe"));
        assert!(options.filters.exclude_dirs.unwrap().is_match("target"));
        assert!(options.filters.exclude_files.is_none());
        assert_eq!(options.output, Some(PathBuf::from("stats.png")));
        assert_eq!(options.background.as_deref(), Some("282a36"));
        assert!(options.lang);
    }

    #[test]
    fn empty_flag_values_are_ignored() {
        let cli = parse(&["./", "--since", "", "--author", ""]);
        let options = cli.into_options(&FixedClock).unwrap();
        assert!(options.filters.since.is_none());
        assert!(options.filters.author.is_none());
    }

    #[test]
    fn rejects_bad_dates_and_patterns() {
        assert!(parse(&["./", "--since", "last tuesday"])
            .into_options(&FixedClock)
            .is_err());
        assert!(parse(&["./", "--until", "7d"]).into_options(&FixedClock).is_err());
        assert!(parse(&["./", "--exclude-files", "("]).into_options(&FixedClock).is_err());
    }

    #[test]
    fn json_conflicts_with_output() {
        assert!(Cli::try_parse_from(["gitbrag", "./", "--json", "-O", "a.png"]).is_err());
    }
}
