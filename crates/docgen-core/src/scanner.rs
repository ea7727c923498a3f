//! Template discovery by filesystem walking.
//!
//! The scanner only identifies template files; reading and compiling them
//! is the engine's job. Matching is a literal, case-sensitive suffix test
//! on the file name, and entries are sorted at each level so the walk order
//! (and therefore the generated output) is reproducible.

use std::fs;
use std::path::{Path, PathBuf};

/// A discovered template file.
#[derive(Debug, Clone)]
pub(crate) struct TemplateRef {
    /// Engine lookup name: path relative to the template root, `/`-separated.
    pub name: String,
    /// Absolute path on disk.
    pub path: PathBuf,
}

/// Discovers template files under the template root.
pub(crate) struct Scanner {
    template_dir: PathBuf,
    template_ext: String,
}

impl Scanner {
    pub fn new(template_dir: PathBuf, template_ext: String) -> Self {
        Self {
            template_dir,
            template_ext,
        }
    }

    /// Walk the template root and return every matching template.
    ///
    /// Returns an empty Vec if the template root doesn't exist.
    pub fn scan(&self) -> Vec<TemplateRef> {
        let mut refs = Vec::new();
        if self.template_dir.exists() {
            self.scan_directory(&self.template_dir, "", &mut refs);
        }
        refs
    }

    fn scan_directory(&self, dir_path: &Path, prefix: &str, refs: &mut Vec<TemplateRef>) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            tracing::warn!(path = %dir_path.display(), "Failed to read directory");
            return;
        };

        let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                let child_prefix = join_name(prefix, &name);
                self.scan_directory(&path, &child_prefix, refs);
            } else if name.ends_with(&self.template_ext) {
                refs.push(TemplateRef {
                    name: join_name(prefix, &name),
                    path,
                });
            }
        }
    }
}

/// Join a walk prefix and an entry name with `/`.
fn join_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Derive the output path for a template name.
///
/// The relative directory structure is mirrored under the output root and
/// the template suffix is replaced by `.md`:
/// `a/b/guide.j2` with output root `O` becomes `O/a/b/guide.md`.
pub(crate) fn output_path_for(
    output_dir: &Path,
    template_name: &str,
    template_ext: &str,
) -> PathBuf {
    let stem = template_name
        .strip_suffix(template_ext)
        .unwrap_or(template_name);
    let mut path = output_dir.to_path_buf();
    path.push(format!("{stem}.md"));
    path
}
