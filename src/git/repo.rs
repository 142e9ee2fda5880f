use crate::error::{BragError, Result};
use crate::language::LanguageTable;
use crate::model::{ChangeRecord, FilterSet};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// stderr fragments git prints for a repository without any commits
const EMPTY_REPO_MARKERS: [&str; 2] = ["does not have any commits yet", "bad default revision"];

pub fn is_git_repo(dir: &Path) -> bool {
    dir.join(".git").is_dir()
}

/// Produces the raw `--numstat` listing for a repository.
pub trait HistorySource {
    fn numstat(&self, repo: &Path, filters: &FilterSet) -> Result<String>;
}

/// Shells out to the `git` executable on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    pub fn log_args(filters: &FilterSet) -> Vec<String> {
        let mut args: Vec<String> = ["log", "--pretty=", "--numstat", "--no-renames", "--branches"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Some(since) = &filters.since {
            args.push(format!("--since={}", since.to_rfc3339()));
        }
        if let Some(until) = &filters.until {
            args.push(format!("--until={}", until.to_rfc3339()));
        }
        if let Some(author) = &filters.author {
            args.push(format!("--author={author}"));
        }
        args
    }
}

impl HistorySource for GitCli {
    fn numstat(&self, repo: &Path, filters: &FilterSet) -> Result<String> {
        let args = Self::log_args(filters);
        debug!(repo = %repo.display(), ?args, "running git");

        let output = Command::new("git")
            .args(&args)
            .current_dir(repo)
            .output()
            .map_err(|e| BragError::Git(format!("failed to execute git command: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if EMPTY_REPO_MARKERS.iter().any(|m| stderr.contains(m)) {
                debug!(repo = %repo.display(), "repository has no commits");
                return Ok(String::new());
            }
            return Err(BragError::Git(format!(
                "git log exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Builds the change record of one repository.
pub fn extract(
    repo: &Path,
    filters: &FilterSet,
    source: &dyn HistorySource,
    languages: &LanguageTable,
) -> Result<ChangeRecord> {
    if !repo.is_dir() || !is_git_repo(repo) {
        return Err(BragError::NotARepository(repo.to_path_buf()));
    }

    let listing = source.numstat(repo, filters)?;
    Ok(parse_numstat(&listing, filters.exclude_files.as_ref(), languages))
}

/// Folds `<added> <deleted> <path>` lines into a record. A `-` count marks a
/// binary file: it adds nothing to the sums but the path is still counted.
pub fn parse_numstat(
    listing: &str,
    exclude_files: Option<&Regex>,
    languages: &LanguageTable,
) -> ChangeRecord {
    let mut record = ChangeRecord::default();
    let mut files: HashSet<&str> = HashSet::new();

    for line in listing.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.splitn(3, |c: char| c == '\t' || c == ' ');
        let (Some(added), Some(deleted), Some(path)) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        let path = path.trim();
        if path.is_empty() {
            continue;
        }

        if exclude_files.is_some_and(|re| re.is_match(path)) {
            continue;
        }

        files.insert(path);

        let added = count(added);
        let deleted = count(deleted);
        record.insertions += added;
        record.deletions += deleted;

        if let Some(language) = languages.classify(path) {
            *record.languages.entry(language.to_string()).or_insert(0) += added + deleted;
        }
    }

    record.files_changed = files.len() as u64;
    record
}

fn count(field: &str) -> u64 {
    if field == "-" {
        return 0;
    }
    field.parse().unwrap_or(0)
}
