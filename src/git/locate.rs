use super::repo::is_git_repo;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Finds the git repositories below a set of input directories.
///
/// An input that is itself a repository yields only that repository. Otherwise
/// the walk goes down one directory level at a time; as soon as a level
/// contains at least one repository, the repositories of that level are
/// returned and none of its plain siblings are searched any further.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepoLocator<'a> {
    exclude_dirs: Option<&'a Regex>,
}

impl<'a> RepoLocator<'a> {
    pub fn new(exclude_dirs: Option<&'a Regex>) -> Self {
        Self { exclude_dirs }
    }

    /// Unusable inputs are reported as warnings and yield no repositories.
    pub fn locate(&self, dir: &Path) -> Vec<PathBuf> {
        let abs_dir = match fs::canonicalize(dir) {
            Ok(path) => path,
            Err(e) => {
                warn!("could not access '{}': {e}", dir.display());
                return Vec::new();
            }
        };

        if !abs_dir.is_dir() {
            warn!("'{}' is not a directory", dir.display());
            return Vec::new();
        }

        if is_git_repo(&abs_dir) {
            return vec![abs_dir];
        }

        let mut found = Vec::new();
        self.scan_children(&abs_dir, &mut found);
        found
    }

    fn scan_children(&self, dir: &Path, found: &mut Vec<PathBuf>) {
        let children = match self.child_dirs(dir) {
            Ok(children) => children,
            Err(e) => {
                warn!("could not read directory '{}': {e}", dir.display());
                return;
            }
        };

        let (repos, plain): (Vec<PathBuf>, Vec<PathBuf>) =
            children.into_iter().partition(|child| is_git_repo(child));

        if repos.is_empty() {
            for child in plain {
                self.scan_children(&child, found);
            }
        } else {
            found.extend(repos);
        }
    }

    fn child_dirs(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') && name != ".git" {
                continue;
            }
            if self.exclude_dirs.is_some_and(|re| re.is_match(&name)) {
                continue;
            }

            children.push(entry.path());
        }
        children.sort();
        Ok(children)
    }
}
