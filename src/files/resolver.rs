//! Request target to file resolution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::http::mime;

const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No readable regular file at the resolved location.
    #[error("resource not found")]
    NotFound,
    /// The target escapes the document root (e.g. through `..`).
    #[error("resource outside document root")]
    OutsideRoot,
}

/// A file that exists under the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Canonical location of the file
    pub path: PathBuf,
    pub content_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

/// Target with the query dropped and the index file applied, relative to the root.
///
/// ```
/// # use tinyserve::files::resolver::relative_target;
/// assert_eq!(relative_target("/?x=1"), "index.html");
/// assert_eq!(relative_target("/css/site.css"), "css/site.css");
/// ```
pub fn relative_target(path: &str) -> String {
    let path = match path.split_once('?') {
        Some((before, _query)) => before,
        None => path,
    };

    let mut target = path.trim_start_matches('/').to_string();
    if path.ends_with('/') {
        target.push_str(INDEX_FILE);
    }
    target
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves a raw request target to a file under the root.
    ///
    /// Both the root and the candidate are canonicalized, so symlinks and
    /// `..` segments cannot lead outside the root.
    pub async fn resolve(&self, path: &str) -> Result<Resolved, ResolveError> {
        let candidate = self.root.join(relative_target(path));
        let content_type = mime::content_type_for(&candidate);

        let root = tokio::fs::canonicalize(&self.root).await.map_err(|e| {
            tracing::warn!(root = %self.root.display(), error = %e, "Document root not accessible");
            ResolveError::NotFound
        })?;

        let file = tokio::fs::canonicalize(&candidate)
            .await
            .map_err(not_found)?;

        if !file.starts_with(&root) {
            return Err(ResolveError::OutsideRoot);
        }

        let meta = tokio::fs::metadata(&file).await.map_err(not_found)?;
        if !meta.is_file() {
            return Err(ResolveError::NotFound);
        }

        Ok(Resolved {
            path: file,
            content_type,
        })
    }
}

fn not_found(_: io::Error) -> ResolveError {
    ResolveError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_stripped_before_index_rule() {
        assert_eq!(relative_target("/?x=1"), relative_target("/"));
        assert_eq!(relative_target("/docs/?page=2"), "docs/index.html");
    }

    #[test]
    fn question_mark_only_first_counts() {
        assert_eq!(relative_target("/a.html?b=/?c"), "a.html");
    }

    #[test]
    fn no_trailing_slash_no_index() {
        assert_eq!(relative_target("/docs"), "docs");
    }

    #[test]
    fn empty_target_stays_empty() {
        assert_eq!(relative_target(""), "");
    }
}
