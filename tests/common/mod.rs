#![allow(dead_code)]

use maildir_rank_addr::Config;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Throwaway maildir tree with its own cache and report directories
pub struct MailStore {
    dir: TempDir,
}

impl MailStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("mail")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("mail")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `mail/<folder>/<subdir>/<file_name>`
    pub fn add(&self, folder: &str, subdir: &str, file_name: &str, content: &str) -> PathBuf {
        let dir = self.root().join(folder).join(subdir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn config(&self) -> Config {
        Config {
            maildirs: vec![self.root()],
            cache_dir: self.dir.path().join("addressbook"),
            report_dir: self.dir.path().join("report"),
            ..Config::default()
        }
    }
}

/// A minimal message; `date` is left out when `None`
pub fn message(from: &str, to: &str, date: Option<&str>) -> String {
    let mut msg = format!("From: {from}\r\nTo: {to}\r\nSubject: hello\r\n");
    if let Some(date) = date {
        msg.push_str(&format!("Date: {date}\r\n"));
    }
    msg.push_str("\r\nBody text that is never read.\r\n");
    msg
}

/// Make `path` unreadable; false when permissions are not enforced (root)
#[cfg(unix)]
pub fn lock(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
    fs::File::open(path).is_err()
}

#[cfg(unix)]
pub fn unlock(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o644)).unwrap();
}
