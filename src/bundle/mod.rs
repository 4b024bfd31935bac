//! The on-disk configuration bundle.
//!
//! A bundle is a `config.json` descriptor plus a `mock/` directory of JSON
//! response files, both living directly under one base directory. The same
//! layout is used for the local staging directory and for the destination
//! directory on the device, so both are derived with [`BundlePaths::derive`].
//!
//! - [`initialize`] writes the default template and creates `mock/`.
//! - [`validate`] checks a staged bundle before it is pushed.
//! - [`clean`] removes both artifacts again.

mod store;
mod template;
mod validation;

#[cfg(test)]
mod tests;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use crate::error::{FilesystemError, Result};

pub use store::{clean, initialize};
pub use template::BundleTemplate;
pub use validation::validate;

/// File name of the bundle descriptor.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Directory name holding mock response files.
pub const MOCK_DIR_NAME: &str = "mock";

/// Locations of the two bundle artifacts under a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePaths {
    config_file: Utf8PathBuf,
    mock_dir: Utf8PathBuf,
}

impl BundlePaths {
    /// Join `base` with the fixed artifact names.
    ///
    /// This is plain path joining: nothing is checked for existence, and the
    /// base may equally be a local directory or a directory on a device.
    #[must_use]
    pub fn derive(base: impl AsRef<Utf8Path>) -> Self {
        let base_dir = base.as_ref();
        Self {
            config_file: base_dir.join(CONFIG_FILE_NAME),
            mock_dir: base_dir.join(MOCK_DIR_NAME),
        }
    }

    /// Path of `config.json`.
    #[must_use]
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }

    /// Path of the `mock` directory.
    #[must_use]
    pub fn mock_dir(&self) -> &Utf8Path {
        &self.mock_dir
    }

    /// Split into `(config_file, mock_dir)`.
    #[must_use]
    pub fn into_parts(self) -> (Utf8PathBuf, Utf8PathBuf) {
        (self.config_file, self.mock_dir)
    }
}

/// Return `(base/config.json, base/mock)`.
#[must_use]
pub fn derive_paths(base: impl AsRef<Utf8Path>) -> (Utf8PathBuf, Utf8PathBuf) {
    BundlePaths::derive(base).into_parts()
}

/// A local staging directory resolved to an absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingDir {
    root: Utf8PathBuf,
    paths: BundlePaths,
}

impl StagingDir {
    /// Resolve `dir` against the current working directory.
    ///
    /// `.` and `..` components are collapsed lexically, without consulting
    /// the filesystem, so the directory does not need to exist yet.
    ///
    /// # Errors
    ///
    /// Returns `FilesystemError::IoError` when the working directory cannot
    /// be determined, and `FilesystemError::NonUtf8Path` when the resolved
    /// path is not valid UTF-8.
    pub fn resolve(dir: &Utf8Path) -> Result<Self> {
        let absolute = std::path::absolute(dir).map_err(|error| FilesystemError::IoError {
            path: dir.to_path_buf(),
            message: error.to_string(),
        })?;
        let root = Utf8PathBuf::from_path_buf(absolute).map_err(|path| {
            FilesystemError::NonUtf8Path {
                path: path.display().to_string(),
            }
        })?;
        Ok(Self::from_absolute(normalise_lexically(&root)))
    }

    /// Wrap a path that is already absolute.
    #[must_use]
    pub fn from_absolute(root: Utf8PathBuf) -> Self {
        let paths = BundlePaths::derive(&root);
        Self { root, paths }
    }

    /// The staging directory itself.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Artifact locations inside the staging directory.
    #[must_use]
    pub const fn paths(&self) -> &BundlePaths {
        &self.paths
    }
}

/// Drop `.` components and fold each `..` into its parent.
///
/// `..` above the root stays at the root.
fn normalise_lexically(path: &Utf8Path) -> Utf8PathBuf {
    let mut normalised = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if matches!(
                    normalised.components().next_back(),
                    Some(Utf8Component::Normal(_))
                ) {
                    normalised.pop();
                } else if !normalised.has_root() {
                    normalised.push(component);
                }
            }
            Utf8Component::Prefix(_) | Utf8Component::RootDir | Utf8Component::Normal(_) => {
                normalised.push(component);
            }
        }
    }
    normalised
}
