//! Recursive directory size accounting

use std::path::Path;

use tokio::fs;
use tracing::warn;

/// Total size in bytes of all regular files under `path`.
///
/// Symbolic links are not followed and contribute nothing, which avoids
/// double-counting and broken-link failures. Subtrees that cannot be read are
/// logged and contribute zero; a size report never aborts the run.
pub async fn directory_size(path: &Path) -> u64 {
    let mut total_size = 0u64;
    let mut stack = vec![path.to_path_buf()];

    while let Some(current) = stack.pop() {
        let mut entries = match fs::read_dir(&current).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("cannot read {}: {}", current.display(), e);
                continue;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("cannot read entry in {}: {}", current.display(), e);
                    break;
                }
            };

            let path = entry.path();
            // symlink_metadata so links are seen as links, not their targets
            let metadata = match fs::symlink_metadata(&path).await {
                Ok(m) => m,
                Err(e) => {
                    warn!("cannot stat {}: {}", path.display(), e);
                    continue;
                }
            };

            if metadata.is_symlink() {
                continue;
            } else if metadata.is_dir() {
                stack.push(path);
            } else {
                total_size += metadata.len();
            }
        }
    }

    total_size
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_empty_directory_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(directory_size(temp_dir.path()).await, 0);
    }

    #[tokio::test]
    async fn test_sums_files_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        std::fs::write(dir.join("file1.txt"), "hello").unwrap();
        std::fs::create_dir(dir.join("sub")).unwrap();
        std::fs::write(dir.join("sub").join("file2.txt"), "world!").unwrap();

        assert_eq!(directory_size(dir).await, 11);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinks_are_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        std::fs::write(dir.join("real.txt"), "0123456789").unwrap();
        std::os::unix::fs::symlink(dir.join("real.txt"), dir.join("link.txt")).unwrap();
        // broken link must not abort the walk either
        std::os::unix::fs::symlink(dir.join("gone.txt"), dir.join("broken.txt")).unwrap();

        assert_eq!(directory_size(dir).await, 10);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_only_directory_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        std::os::unix::fs::symlink("/nonexistent", dir.join("only.lnk")).unwrap();
        assert_eq!(directory_size(dir).await, 0);
    }

    #[tokio::test]
    async fn test_missing_directory_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let gone = temp_dir.path().join("gone");
        assert_eq!(directory_size(&gone).await, 0);
    }
}
