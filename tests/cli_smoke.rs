use assert_cmd::prelude::*;
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
}

fn commit_all(dir: &Path, message: &str, author: Option<&str>) {
    git(dir, &["add", "."]);
    let mut args = vec!["commit", "-m", message];
    if let Some(author) = author {
        args.extend(["--author", author]);
    }
    git(dir, &args);
}

/// Two commits: one on the current branch adding main.go (8 lines) and
/// main.ts (3 lines), one on a side branch trimming main.ts by a line.
fn two_branch_repo(dir: &Path) {
    init_git_repo(dir);
    write_file(
        dir,
        "main.go",
        "\npackage main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"Hello, World!\")\n}\n",
    );
    write_file(
        dir,
        "main.ts",
        "\nconsole.log(\"Hello, World!\");\nconsole.log(\"Hello, World!\");\n",
    );
    commit_all(dir, "initial commit", None);

    git(dir, &["checkout", "-b", "feature"]);
    write_file(dir, "main.ts", "\nconsole.log(\"Hello, World!\");\n");
    commit_all(
        dir,
        "second commit",
        Some("John Doe <john.doe@example.com>"),
    );
    git(dir, &["checkout", "-"]);
}

fn gitbrag(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("gitbrag").unwrap();
    cmd.args(args);
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn counts_all_branches() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    two_branch_repo(dir.path());

    let out = gitbrag(&[dir.path().to_str().unwrap()]);
    assert_eq!(out, " 2 files changed\n11 insertions(+)\n 1 deletions(-)\n");
}

#[test]
fn author_filter_keeps_only_their_changes() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    write_file(dir.path(), "notes.txt", "1\n2\n3\n4\n5\n6\n");
    commit_all(dir.path(), "add notes", None);
    write_file(dir.path(), "notes.txt", "1\n");
    commit_all(
        dir.path(),
        "trim notes",
        Some("John Doe <john.doe@example.com>"),
    );
    write_file(dir.path(), "other.txt", "a\nb\nc\nd\ne\n");
    commit_all(dir.path(), "add other", None);

    let out = gitbrag(&[dir.path().to_str().unwrap(), "--author", "John Doe"]);
    assert_eq!(out, "1 files changed\n0 insertions(+)\n5 deletions(-)\n");

    let out = gitbrag(&[dir.path().to_str().unwrap(), "--author", "john.doe@"]);
    assert_eq!(out, "1 files changed\n0 insertions(+)\n5 deletions(-)\n");
}

#[test]
fn exclude_files_pattern() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    two_branch_repo(dir.path());

    let out = gitbrag(&[dir.path().to_str().unwrap(), "--exclude-files", r"\.ts$"]);
    assert_eq!(out, "1 files changed\n8 insertions(+)\n0 deletions(-)\n");
}

#[test]
fn empty_repository_reports_zeros() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());

    let out = gitbrag(&[dir.path().to_str().unwrap(), "--json"]);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["totals"]["repositories"], 1);
    assert_eq!(v["totals"]["files_changed"], 0);
    assert_eq!(v["totals"]["insertions"], 0);
    assert_eq!(v["totals"]["deletions"], 0);
}

#[test]
fn since_after_last_commit_prints_label_and_zeros() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    two_branch_repo(dir.path());

    let out = gitbrag(&[dir.path().to_str().unwrap(), "--since", "2090-01-01"]);
    assert_eq!(
        out,
        "Since Jan 1, 2090\n\n0 files changed\n0 insertions(+)\n0 deletions(-)\n"
    );
}

#[test]
fn since_past_2099_warns_that_git_ignores_it() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("gitbrag").unwrap();
    cmd.arg(dir.path()).args(["--since", "2999-01-01"]);
    let output = cmd.assert().success().get_output().clone();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("git ignores it"), "{stderr}");
}

#[test]
fn nested_repositories_across_inputs() {
    if !has_git() {
        return;
    }
    let root = tempdir().unwrap();
    two_branch_repo(&root.path().join("work/one"));
    two_branch_repo(&root.path().join("work/two"));
    two_branch_repo(&root.path().join("work/plain/deep/three"));

    let out = gitbrag(&[root.path().to_str().unwrap(), "--json"]);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["version"], 1);
    assert_eq!(v["totals"]["repositories"], 2);
    assert_eq!(v["totals"]["files_changed"], 4);
    assert_eq!(v["totals"]["insertions"], 22);
    assert_eq!(v["totals"]["languages"]["Go"], 16);
    assert_eq!(v["totals"]["languages"]["TypeScript"], 8);
}

#[test]
fn no_repositories_is_not_an_error() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("just/folders")).unwrap();

    let out = gitbrag(&[dir.path().to_str().unwrap(), "missing-dir-for-gitbrag-test"]);
    assert_eq!(out, "No git repositories found in the specified directories.\n");
}

#[test]
fn invalid_color_fails() {
    let dir = tempdir().unwrap();
    let png = dir.path().join("stats.png");
    let mut cmd = Command::cargo_bin("gitbrag").unwrap();
    cmd.arg(dir.path())
        .arg("-O")
        .arg(&png)
        .args(["-B", "12345"]);
    cmd.assert().failure();
    assert!(!png.exists());
}

#[test]
fn exports_png() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let repo = dir.path().join("repo");
    two_branch_repo(&repo);
    let png = dir.path().join("stats.png");

    let mut cmd = Command::cargo_bin("gitbrag").unwrap();
    cmd.arg(&repo)
        .arg("-O")
        .arg(&png)
        .args(["-B", "#282a36", "-C", "f8f8f2", "--lang"]);
    let output = cmd.output().unwrap();
    if gitbrag::render::Renderer::new(None).is_err() {
        // hosts without any font cannot render
        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Failed to load font"), "{stderr}");
        assert!(!png.exists());
        return;
    }
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, format!("Statistics exported to {}\n", png.display()));
    let bytes = fs::read(&png).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    assert_eq!(height, 950);
}
