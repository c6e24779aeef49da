//! Directory tree operations used when materializing a template

use crate::error::{Result, ScaffoldError};
use std::fs;
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

/// Version-control metadata that does not make a directory "non-empty".
const VCS_DIR: &str = ".git";

/// A directory is effectively empty when it has no entries or only `.git`.
pub fn is_empty_dir(path: &Path) -> Result<bool> {
    let mut names = Vec::new();
    for entry in fs::read_dir(path)
        .map_err(ScaffoldError::io(format!("Failed to read directory: {}", path.display())))?
    {
        let entry = entry
            .map_err(ScaffoldError::io(format!("Failed to read directory: {}", path.display())))?;
        names.push(entry.file_name());
        if names.len() > 1 {
            return Ok(false);
        }
    }

    Ok(match names.as_slice() {
        [] => true,
        [only] => only == VCS_DIR,
        _ => false,
    })
}

/// Remove everything inside `path`, keeping `path` itself.
///
/// A missing directory is not an error.
pub fn empty_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(path)
        .map_err(ScaffoldError::io(format!("Failed to read directory: {}", path.display())))?
    {
        let entry = entry
            .map_err(ScaffoldError::io(format!("Failed to read directory: {}", path.display())))?;
        let entry_path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(ScaffoldError::io(format!("Failed to inspect {}", entry_path.display())))?;

        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&entry_path)
        } else {
            fs::remove_file(&entry_path)
        };
        removed.map_err(ScaffoldError::io(format!("Failed to remove {}", entry_path.display())))?;
    }

    Ok(())
}

/// Copy a file or a whole directory tree from `src` to `dest`.
///
/// Existing files at the destination are overwritten. Symlinks and special
/// files are refused with [`ScaffoldError::UnsupportedEntry`].
pub fn copy_entry(src: &Path, dest: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(src)
        .map_err(ScaffoldError::io(format!("Failed to inspect {}", src.display())))?;

    if metadata.is_file() {
        return copy_file(src, dest);
    }
    if !metadata.is_dir() {
        return Err(ScaffoldError::UnsupportedEntry {
            path: src.to_path_buf(),
        });
    }

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| ScaffoldError::Io {
            context: format!("Failed to walk {}", src.display()),
            source: e.into(),
        })?;
        let rel_path = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir entries are under the walk root");
        let target = dest.join(rel_path);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(ScaffoldError::io(format!(
                "Failed to create directory: {}",
                target.display()
            )))?;
        } else if file_type.is_file() {
            copy_file(entry.path(), &target)?;
        } else {
            return Err(ScaffoldError::UnsupportedEntry {
                path: entry.path().to_path_buf(),
            });
        }
    }

    Ok(())
}

fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    trace!(src = %src.display(), dest = %dest.display(), "copying file");
    fs::copy(src, dest).map_err(ScaffoldError::io(format!(
        "Failed to copy {} to {}",
        src.display(),
        dest.display()
    )))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(is_empty_dir(dir.path()).unwrap());
    }

    #[test]
    fn test_git_only_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(is_empty_dir(dir.path()).unwrap());
    }

    #[test]
    fn test_dir_with_files_is_not_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "hi").unwrap();
        assert!(!is_empty_dir(dir.path()).unwrap());

        fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(!is_empty_dir(dir.path()).unwrap());
    }

    #[test]
    fn test_other_hidden_dir_is_not_empty() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".svn-ish")).unwrap();
        assert!(!is_empty_dir(dir.path()).unwrap());
    }

    #[test]
    fn test_empty_dir_removes_everything_but_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/c.txt"), "c").unwrap();
        fs::write(dir.path().join("top.txt"), "t").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        empty_dir(dir.path()).unwrap();

        assert!(dir.path().exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_dir_missing_is_noop() {
        let dir = TempDir::new().unwrap();
        empty_dir(&dir.path().join("nope")).unwrap();
    }

    #[test]
    fn test_copy_entry_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        let dest = dir.path().join("dest.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dest, "old content").unwrap();

        copy_entry(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_copy_entry_directory_tree() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("nested/deeper")).unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();
        fs::write(src.join("main.js"), "console.log(1)").unwrap();
        fs::write(src.join("nested/deeper/logo.svg"), [0u8, 159, 146, 150]).unwrap();

        let dest = dir.path().join("out/src");
        copy_entry(&src, &dest).unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("main.js")).unwrap(),
            "console.log(1)"
        );
        assert_eq!(
            fs::read(dest.join("nested/deeper/logo.svg")).unwrap(),
            vec![0u8, 159, 146, 150]
        );
        assert!(dest.join("empty").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_entry_refuses_symlinks() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("real.txt"), "x").unwrap();
        std::os::unix::fs::symlink(src.join("real.txt"), src.join("link.txt")).unwrap();

        let err = copy_entry(&src, &dir.path().join("dest")).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnsupportedEntry { .. }));
    }
}
