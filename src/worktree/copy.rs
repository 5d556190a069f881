//! Copy untracked files (`.env`, local config, ...) from the repository root
//! into a freshly created worktree.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path};

use anyhow::Context;

/// Result of a copy pass that had no hard failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Entries copied, as given
    pub copied: Vec<String>,
    /// Entries whose source does not exist
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFailure {
    pub path: String,
    pub message: String,
}

/// Every entry that failed for a reason other than a missing source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe_failures(.failures))]
pub struct CopyError {
    pub failures: Vec<CopyFailure>,
    /// Entries that did copy before and after the failures
    pub outcome: CopyOutcome,
}

fn describe_failures(failures: &[CopyFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.path, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Copy each of `relative_paths` from `source_root` to the same relative
/// location under `destination`.
///
/// Missing sources are skipped. Other failures don't stop the pass; they are
/// collected into one [`CopyError`].
pub fn copy_files(
    source_root: &Path,
    destination: &Path,
    relative_paths: &[String],
) -> Result<CopyOutcome, CopyError> {
    let mut outcome = CopyOutcome::default();
    let mut failures = Vec::new();

    for entry in relative_paths {
        let relative = Path::new(entry);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            failures.push(CopyFailure {
                path: entry.clone(),
                message: "path must stay inside the repository".to_string(),
            });
            continue;
        }

        let src = source_root.join(relative);
        let metadata = match fs::symlink_metadata(&src) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Skipping {entry}: not present in {}", source_root.display());
                outcome.skipped.push(entry.clone());
                continue;
            }
            Err(e) => {
                failures.push(CopyFailure {
                    path: entry.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        let dest = destination.join(relative);
        let result = if metadata.is_dir() {
            copy_dir_recursive(&src, &dest)
        } else {
            copy_file(&src, &dest, metadata.file_type().is_symlink())
        };

        match result {
            Ok(()) => outcome.copied.push(entry.clone()),
            Err(e) => failures.push(CopyFailure {
                path: entry.clone(),
                message: format!("{e:#}"),
            }),
        }
    }

    if failures.is_empty() {
        Ok(outcome)
    } else {
        Err(CopyError { failures, outcome })
    }
}

fn copy_file(src: &Path, dest: &Path, is_symlink: bool) -> anyhow::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    // A tracked file of the same name may already be checked out
    remove_if_exists(dest)?;

    if is_symlink {
        let target =
            fs::read_link(src).with_context(|| format!("reading symlink {}", src.display()))?;
        return create_symlink(&target, src, dest);
    }

    reflink_copy::reflink_or_copy(src, dest)
        .with_context(|| format!("copying {}", src.display()))?;
    Ok(())
}

/// File-by-file recursive copy with reflink per file.
fn copy_dir_recursive(src: &Path, dest: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("creating directory {}", dest.display()))?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dest_path)?;
        } else if file_type.is_file() || file_type.is_symlink() {
            copy_file(&src_path, &dest_path, file_type.is_symlink())?;
        } else {
            log::debug!("skipping non-regular file: {}", src_path.display());
        }
    }

    Ok(())
}

fn remove_if_exists(path: &Path) -> anyhow::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(anyhow::Error::from(e).context(format!("removing {}", path.display()))),
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, _src: &Path, dest: &Path) -> anyhow::Result<()> {
    std::os::unix::fs::symlink(target, dest)
        .with_context(|| format!("creating symlink {}", dest.display()))
}

#[cfg(windows)]
fn create_symlink(target: &Path, src: &Path, dest: &Path) -> anyhow::Result<()> {
    let result = if src.is_dir() {
        std::os::windows::fs::symlink_dir(target, dest)
    } else {
        std::os::windows::fs::symlink_file(target, dest)
    };
    result.with_context(|| format!("creating symlink {}", dest.display()))
}
