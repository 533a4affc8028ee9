use crate::{HytError, I2cBus};
use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

/// Where the kernel lists I2C adapters and where their device nodes live.
#[derive(Debug, Clone)]
pub struct Registry {
    /// One subdirectory per adapter, each holding a `name` file.
    pub class_dir: PathBuf,
    /// Directory holding the device node named after each subdirectory.
    pub dev_dir: PathBuf,
}

impl Default for Registry {
    fn default() -> Self {
        Registry {
            class_dir: PathBuf::from("/sys/class/i2c-dev"),
            dev_dir: PathBuf::from("/dev"),
        }
    }
}

impl Registry {
    pub fn new(class_dir: impl Into<PathBuf>, dev_dir: impl Into<PathBuf>) -> Self {
        Registry {
            class_dir: class_dir.into(),
            dev_dir: dev_dir.into(),
        }
    }

    /// Opens the device node of the first adapter whose name is `name`.
    ///
    /// Adapters are visited in directory order and the scan stops at the
    /// first match.
    pub fn resolve(&self, name: &str) -> Result<I2cBus, HytError> {
        let dir_error = |source| HytError::DirectoryRead {
            path: self.class_dir.clone(),
            source,
        };
        let entries = fs::read_dir(&self.class_dir).map_err(|source| HytError::DirectoryOpen {
            path: self.class_dir.clone(),
            source,
        })?;
        for entry in entries {
            let id = entry.map_err(dir_error)?.file_name();
            if id.as_encoded_bytes().starts_with(b".") {
                continue;
            }
            let descriptor = self.class_dir.join(&id).join("name");
            log::debug!("Checking {}", descriptor.display());
            if descriptor_matches(&descriptor, name)? {
                log::info!("Found i2c bus {name} at {}", id.to_string_lossy());
                return I2cBus::open(self.dev_dir.join(&id));
            }
        }
        Err(HytError::BusNotFound(name.to_string()))
    }
}

/// Finds the adapter called `name` in sysfs and opens its `/dev` node.
pub fn resolve_by_name(name: &str) -> Result<I2cBus, HytError> {
    Registry::default().resolve(name)
}

fn descriptor_matches(path: &Path, want: &str) -> Result<bool, HytError> {
    let read_error = |source| HytError::DescriptorRead {
        path: path.to_path_buf(),
        source,
    };
    // Two bytes of slack: one for the trailing newline, one to notice a longer name.
    let limit = want.len() as u64 + 2;
    let mut content = Vec::new();
    File::open(path)
        .map_err(read_error)?
        .take(limit)
        .read_to_end(&mut content)
        .map_err(read_error)?;
    Ok(name_matches(&content, want))
}

/// `content` is `want`, optionally followed by exactly one newline.
fn name_matches(content: &[u8], want: &str) -> bool {
    matches!(content.strip_prefix(want.as_bytes()), Some(b"" | b"\n"))
}
