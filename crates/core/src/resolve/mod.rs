//! Import resolution against the repository working tree.
//!
//! Maps an import token (as written in source) to an existing file path
//! relative to the repo root. `None` is the normal outcome for third-party
//! and standard-library imports; it is never an error and is logged only at
//! debug level.
//!
//! Resolution is a pure function of (token, current file, working tree,
//! language): candidates are probed on disk in a fixed order and the first
//! existing file wins.

use crate::languages::Language;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolves import tokens to repository-relative file paths
#[derive(Debug, Clone)]
pub struct ImportResolver {
    root: PathBuf,
}

impl ImportResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an import token from `current_file` (repo-relative).
    ///
    /// Candidate order, first existing file wins:
    /// 1. the token as a path relative to the current file's directory
    ///    (the only base tried for `./`-style tokens); for bare tokens the
    ///    repo root is retried when no candidate exists under the current
    ///    directory
    /// 2. each recognized extension appended to the base
    /// 3. `base/index.{ext}` for each extension
    /// 4. language fallbacks: Python `__init__` and dotted-name translation
    ///    (including leading-dot relative imports), Java dotted packages,
    ///    Rust `mod.rs` and `crate::` paths
    pub fn resolve(
        &self,
        token: &str,
        current_file: &Path,
        language: Language,
    ) -> Option<PathBuf> {
        let result = self.resolve_inner(token, current_file, language);
        if result.is_none() {
            debug!(token, file = %current_file.display(), "import did not resolve to a workspace file");
        }
        result
    }

    fn resolve_inner(
        &self,
        token: &str,
        current_file: &Path,
        language: Language,
    ) -> Option<PathBuf> {
        let current_dir = self.root.join(current_file.parent().unwrap_or(Path::new("")));
        let exts = language.extensions();

        if language == Language::Rust {
            return self.resolve_rust(token, &current_dir);
        }

        // Python `.mod` / `..pkg.mod` relative imports use dot counting, not
        // path separators
        if language == Language::Python && token.starts_with('.') && !is_path_relative(token) {
            return self.resolve_python_relative(token, &current_dir);
        }

        let base = if is_path_relative(token) {
            normalize(&current_dir.join(token))
        } else {
            let local = normalize(&current_dir.join(token));
            if self.has_direct_candidate(&local, exts) {
                local
            } else {
                normalize(&self.root.join(token))
            }
        };

        if let Some(hit) = self.try_base(&base, exts) {
            return Some(hit);
        }

        match language {
            Language::Python => {
                if let Some(hit) = self.try_init(&base, exts) {
                    return Some(hit);
                }
                // Dotted module path: `a.b.c` → `a/b/c.{ext}` from the root
                if token.contains('.') && !token.contains('/') {
                    let dotted = normalize(&self.root.join(token.replace('.', "/")));
                    if let Some(hit) = self.try_base(&dotted, exts) {
                        return Some(hit);
                    }
                    return self.try_init(&dotted, exts);
                }
                None
            }
            Language::Java => {
                // `com.example.util.Helper` → `com/example/util/Helper.java`
                let dotted = normalize(&self.root.join(token.replace('.', "/")));
                self.try_base(&dotted, exts)
            }
            _ => None,
        }
    }

    /// `use` path resolution: `a::b` → `a/b.rs` or `a/b/mod.rs`, tried from
    /// the current module's directory then the repo root; `crate::` anchors
    /// at the root, `self::` at the current directory, `super::` one up.
    fn resolve_rust(&self, token: &str, current_dir: &Path) -> Option<PathBuf> {
        let mut segments: Vec<&str> = token.split("::").filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return None;
        }

        let mut bases: Vec<PathBuf> = Vec::new();
        match segments[0] {
            "crate" => {
                segments.remove(0);
                bases.push(self.root.clone());
                // src-layout crates anchor modules under src/
                bases.push(self.root.join("src"));
            }
            "self" => {
                segments.remove(0);
                bases.push(current_dir.to_path_buf());
            }
            "super" => {
                segments.remove(0);
                bases.push(current_dir.parent()?.to_path_buf());
            }
            _ => {
                bases.push(current_dir.to_path_buf());
                bases.push(self.root.clone());
            }
        }
        if segments.is_empty() {
            return None;
        }

        for base in bases {
            // The token's trailing segments may name items, not modules:
            // probe the full path first, then progressively shorter prefixes
            // (`crate::util::helper` → `util/helper.rs`, then `util.rs`)
            for depth in (1..=segments.len()).rev() {
                let partial: PathBuf = segments[..depth].iter().collect();
                let candidate = normalize(&base.join(&partial));
                if let Some(hit) = self.existing(&with_suffix(&candidate, ".rs")) {
                    return Some(hit);
                }
                if let Some(hit) = self.existing(&candidate.join("mod.rs")) {
                    return Some(hit);
                }
            }
        }
        None
    }

    fn resolve_python_relative(&self, token: &str, current_dir: &Path) -> Option<PathBuf> {
        let dots = token.chars().take_while(|&c| c == '.').count();
        let rest = &token[dots..];

        let mut dir = current_dir.to_path_buf();
        for _ in 1..dots {
            dir = dir.parent()?.to_path_buf();
        }

        let base = if rest.is_empty() {
            normalize(&dir)
        } else {
            normalize(&dir.join(rest.replace('.', "/")))
        };

        let exts = Language::Python.extensions();
        self.try_base(&base, exts)
            .or_else(|| self.try_init(&base, exts))
    }

    /// The common candidate ladder for one base path
    fn try_base(&self, base: &Path, exts: &[&str]) -> Option<PathBuf> {
        // Token already carries its extension (C/C++ includes, explicit paths)
        if let Some(hit) = self.existing(base) {
            return Some(hit);
        }
        for ext in exts {
            if let Some(hit) = self.existing(&with_suffix(base, ext)) {
                return Some(hit);
            }
        }
        for ext in exts {
            if let Some(hit) = self.existing(&base.join(format!("index{ext}"))) {
                return Some(hit);
            }
        }
        None
    }

    fn try_init(&self, base: &Path, exts: &[&str]) -> Option<PathBuf> {
        for ext in exts {
            if let Some(hit) = self.existing(&base.join(format!("__init__{ext}"))) {
                return Some(hit);
            }
        }
        None
    }

    fn has_direct_candidate(&self, base: &Path, exts: &[&str]) -> bool {
        base.is_file() || exts.iter().any(|ext| with_suffix(base, ext).is_file())
    }

    /// An existing file inside the root, returned repo-relative.
    /// Paths that escaped the root through `..` fail the prefix strip.
    fn existing(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() {
            candidate.strip_prefix(&self.root).ok().map(|p| p.to_path_buf())
        } else {
            None
        }
    }
}

fn is_path_relative(token: &str) -> bool {
    token.starts_with("./") || token.starts_with("../")
}

/// Lexically fold `.` and `..` components (no filesystem access)
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Append a suffix to the final component without treating it as an
/// extension swap (`foo.h` + `.h` must give `foo.h.h`, not `foo.h`)
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_dots() {
        assert_eq!(
            normalize(Path::new("/r/pkg/./a/../utils")),
            PathBuf::from("/r/pkg/utils")
        );
    }

    #[test]
    fn test_with_suffix_appends() {
        assert_eq!(
            with_suffix(Path::new("/r/foo.h"), ".h"),
            PathBuf::from("/r/foo.h.h")
        );
        assert_eq!(with_suffix(Path::new("/r/utils"), ".py"), PathBuf::from("/r/utils.py"));
    }
}
