//! Unit tests for the bundle layout, store and validator.


use std::fs;
use std::io;

use camino::Utf8PathBuf;
use rstest::fixture;
use tempfile::TempDir;

use crate::reporter::{Reporter, Severity};

/// A temporary staging directory that lives as long as the fixture value.
pub(super) struct Staging {
    _temp_dir: TempDir,
    pub(super) root: Utf8PathBuf,
}

impl Staging {
    pub(super) fn write(&self, relative: &str, contents: &str) -> io::Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub(super) fn config_file(&self) -> Utf8PathBuf {
        self.root.join("config.json")
    }

    /// Create `relative` as a symlink pointing at `target`.
    #[cfg(unix)]
    pub(super) fn link(&self, relative: &str, target: &camino::Utf8Path) -> io::Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        std::os::unix::fs::symlink(target, &path)?;
        Ok(path)
    }
}

#[fixture]
pub(super) fn staging() -> Staging {
    let temp_dir = tempfile::tempdir().expect("tempdir creation should succeed");
    let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
        .expect("tempdir path should be valid UTF-8");
    Staging {
        _temp_dir: temp_dir,
        root,
    }
}

/// A verbose reporter writing into memory.
#[fixture]
pub(super) fn reporter() -> Reporter<Vec<u8>> {
    Reporter::new(Vec::new(), Severity::Info)
}

pub(super) fn output_of(reporter: Reporter<Vec<u8>>) -> String {
    String::from_utf8_lossy(&reporter.into_inner()).into_owned()
}
