//! Breadth-first discovery of NewsML files under a root directory.
//!
//! Directories are pushed onto an explicit work queue as they are found, so
//! every file in a shallower directory is discovered before any file in a
//! deeper one. Sibling order follows the order the OS lists entries in.
//!
//! A directory that cannot be listed is skipped along with its subtree; the
//! walk itself never fails.

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

const XML_EXTENSION: &str = ".xml";

/// Result of walking a root directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Every `.xml` file found, in traversal order.
    pub files: Vec<PathBuf>,
    /// Directories holding at least one `.xml` file, with their file counts.
    pub per_directory: Vec<(PathBuf, usize)>,
    /// Directories that could not be listed.
    pub skipped: Vec<PathBuf>,
}

/// Walk `root` breadth-first and collect every `.xml` file beneath it.
#[instrument(level = "info", skip_all, fields(root = %root.display()))]
pub async fn discover(root: &Path) -> Discovery {
    let mut discovery = Discovery::default();
    let mut queue = VecDeque::from([root.to_path_buf()]);

    while let Some(dir) = queue.pop_front() {
        match list_directory(&dir, &mut queue, &mut discovery.files).await {
            Ok(count) => {
                debug!(dir = %dir.display(), count, "Listed directory");
                if count > 0 {
                    discovery.per_directory.push((dir, count));
                }
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                println!("Permission denied: {}", dir.display());
                warn!(dir = %dir.display(), "Permission denied; skipping directory");
                discovery.skipped.push(dir);
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to list directory; skipping");
                discovery.skipped.push(dir);
            }
        }
    }

    info!(
        files = discovery.files.len(),
        directories = discovery.per_directory.len(),
        skipped = discovery.skipped.len(),
        "Discovery complete"
    );
    discovery
}

/// List one directory: queue its subdirectories and collect its `.xml` files.
///
/// Only failing to open the directory is an error. An entry that cannot be
/// inspected is skipped, and a failure partway through the listing keeps
/// whatever was collected before it. Returns the number of files collected.
async fn list_directory(
    dir: &Path,
    queue: &mut VecDeque<PathBuf>,
    files: &mut Vec<PathBuf>,
) -> io::Result<usize> {
    let mut entries = fs::read_dir(dir).await?;
    let before = files.len();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Directory listing interrupted");
                break;
            }
        };
        let file_type = entry.file_type().await;
        visit_entry(entry.path(), file_type, queue, files).await;
    }
    Ok(files.len() - before)
}

/// Route one directory entry to the queue or the file list.
///
/// Symlinked directories are not followed; symlinked files are.
async fn visit_entry(
    path: PathBuf,
    file_type: io::Result<std::fs::FileType>,
    queue: &mut VecDeque<PathBuf>,
    files: &mut Vec<PathBuf>,
) {
    let file_type = match file_type {
        Ok(file_type) => file_type,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot inspect entry; skipping");
            return;
        }
    };

    if file_type.is_dir() {
        queue.push_back(path);
    } else if path
        .file_name()
        .is_some_and(|name| is_xml_name(&name.to_string_lossy()))
    {
        let is_file = if file_type.is_symlink() {
            fs::metadata(&path).await.is_ok_and(|m| m.is_file())
        } else {
            file_type.is_file()
        };
        if is_file {
            files.push(path);
        }
    }
}

fn is_xml_name(name: &str) -> bool {
    name.ends_with(XML_EXTENSION)
}
