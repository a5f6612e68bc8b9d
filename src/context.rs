//! Work context: where the user is and what they have been doing.
//!
//! [`WorkContext::detect`] looks at the working directory and, inside a git
//! repository, the repository name and the latest commit subjects.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Number of recent commit subjects folded into the context keywords.
const RECENT_COMMITS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkContext {
    pub directory: PathBuf,
    /// Repository name when inside a git work tree.
    pub project: Option<String>,
    /// Short human label: the project name, else the directory name.
    pub description: String,
    pub keywords: Vec<String>,
}

impl WorkContext {
    /// Detect the context of the current process. Never fails: without git the
    /// context is just the directory.
    pub fn detect() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::detect_in(&cwd)
    }

    pub fn detect_in(dir: &Path) -> Self {
        let project = git_root(dir).and_then(|root| dir_name(&root));
        let keywords = if project.is_some() {
            recent_commit_subjects(dir)
        } else {
            Vec::new()
        };
        Self::from_parts(dir, project, keywords)
    }

    /// Build a context from already-known signals. The directory name is always
    /// appended to `keywords`.
    pub fn from_parts(dir: &Path, project: Option<String>, mut keywords: Vec<String>) -> Self {
        let dir_label = dir_name(dir).unwrap_or_default();
        let description = project.clone().unwrap_or_else(|| dir_label.clone());
        if !dir_label.is_empty() {
            keywords.push(dir_label);
        }

        Self {
            directory: dir.to_path_buf(),
            project,
            description,
            keywords,
        }
    }

    /// Project name for the booster; empty when there is none.
    pub fn project_name(&self) -> &str {
        self.project.as_deref().unwrap_or("")
    }

    /// Text used to query the store: project, description and keywords, de-duplicated
    /// and space-joined.
    pub fn query_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let candidates = self
            .project
            .iter()
            .chain(std::iter::once(&self.description))
            .chain(self.keywords.iter());
        for part in candidates.map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if !parts.contains(&part) {
                parts.push(part);
            }
        }
        parts.join(" ")
    }
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).current_dir(dir).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn git_root(dir: &Path) -> Option<PathBuf> {
    let out = git(dir, &["rev-parse", "--show-toplevel"])?;
    let root = out.trim();
    (!root.is_empty()).then(|| PathBuf::from(root))
}

fn recent_commit_subjects(dir: &Path) -> Vec<String> {
    let count = format!("-{RECENT_COMMITS}");
    git(dir, &["log", &count, "--pretty=format:%s"])
        .map(|out| {
            out.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_without_project_uses_directory() {
        let ctx = WorkContext::from_parts(Path::new("/home/me/scratch"), None, vec![]);
        assert_eq!(ctx.project, None);
        assert_eq!(ctx.description, "scratch");
        assert_eq!(ctx.keywords, vec!["scratch"]);
        assert_eq!(ctx.project_name(), "");
    }

    #[test]
    fn from_parts_with_project() {
        let ctx = WorkContext::from_parts(
            Path::new("/src/myapp/api"),
            Some("myapp".into()),
            vec!["Add retry to payment client".into()],
        );
        assert_eq!(ctx.description, "myapp");
        assert_eq!(ctx.project_name(), "myapp");
        assert_eq!(
            ctx.keywords,
            vec!["Add retry to payment client".to_string(), "api".to_string()]
        );
    }

    #[test]
    fn query_text_deduplicates() {
        let ctx = WorkContext::from_parts(
            Path::new("/src/myapp"),
            Some("myapp".into()),
            vec!["Fix flaky test".into(), "  ".into()],
        );
        assert_eq!(ctx.query_text(), "myapp Fix flaky test");
    }

    #[test]
    fn empty_context_has_blank_query() {
        assert_eq!(WorkContext::default().query_text(), "");
    }

    #[test]
    fn detect_outside_git_has_no_project() {
        let tmp = tempfile::TempDir::new().unwrap();
        let ctx = WorkContext::detect_in(tmp.path());
        // A temp dir is not inside a repository unless TMPDIR is.
        if ctx.project.is_none() {
            assert!(ctx.keywords.len() == 1);
            assert_eq!(ctx.directory, tmp.path());
        }
    }
}
