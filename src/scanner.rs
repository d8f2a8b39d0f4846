//! Maildir traversal and header-only message reading

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Per-folder state directories of the maildir layout
pub const MAIL_SUBDIRS: [&str; 3] = ["cur", "new", "tmp"];

/// Whether `path` is a message: a file directly under `cur`, `new` or `tmp`
#[must_use]
pub fn is_mail(path: &Path) -> bool {
    let in_mail_subdir = path
        .parent()
        .and_then(Path::file_name)
        .is_some_and(|parent| MAIL_SUBDIRS.iter().any(|d| parent == *d));

    in_mail_subdir && path.is_file()
}

/// Collect every message below `root`, in file name order
///
/// Entries that cannot be read are logged and skipped, except for `root`
/// itself: an unreadable mail store is an error.
pub fn walk_messages(root: &Path) -> Result<Vec<PathBuf>> {
    let mut messages = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(Error::io(root, err.into())),
            Err(err) => {
                warn!("Skipping unreadable maildir entry: {err}");
                continue;
            }
        };
        if is_mail(entry.path()) {
            messages.push(entry.into_path());
        }
    }

    Ok(messages)
}

/// Read the header block of a message, stopping at the first empty line
///
/// The body is never read and the file is closed before returning.
pub fn read_headers(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut headers = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| Error::io(path, e))?;
        if read == 0 {
            break;
        }
        headers.extend_from_slice(&line);
        if line == b"\n" || line == b"\r\n" {
            break;
        }
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_mail_requires_maildir_parent() {
        let dir = tempfile::tempdir().unwrap();
        let cur = dir.path().join("INBOX/cur");
        let other = dir.path().join("INBOX/attachments");
        fs::create_dir_all(&cur).unwrap();
        fs::create_dir_all(&other).unwrap();
        fs::write(cur.join("1.host,S"), "").unwrap();
        fs::write(other.join("1.host"), "").unwrap();

        assert!(is_mail(&cur.join("1.host,S")));
        assert!(!is_mail(&other.join("1.host")));
        assert!(!is_mail(&cur));
    }

    #[test]
    fn test_read_headers_stops_at_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msg");
        fs::write(&path, "From: a@example.com\r\nTo: b@example.com\r\n\r\nbody text\r\n").unwrap();

        let headers = read_headers(&path).unwrap();
        assert_eq!(headers, b"From: a@example.com\r\nTo: b@example.com\r\n\r\n");
    }
}
