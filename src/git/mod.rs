pub mod locate;
pub mod repo;

pub use locate::RepoLocator;
pub use repo::{extract, is_git_repo, parse_numstat, GitCli, HistorySource};
