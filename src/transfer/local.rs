use std::fs;
use std::path::{Component, Path, PathBuf};

use super::{RemoteFolder, TransferError, UploadSource};

/// A drop folder reachable through the local file system (for example a
/// mounted share).
#[derive(Debug, Clone)]
pub struct LocalFolder {
    root: PathBuf,
}

impl LocalFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, folder: &str, name: Option<&str>) -> Result<PathBuf, TransferError> {
        let mut path = self.root.clone();
        for part in [Some(folder), name].into_iter().flatten() {
            let relative = Path::new(part);
            if relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
            {
                return Err(TransferError::new(format!(
                    "{part} escapes the drop folder"
                )));
            }
            path.push(relative);
        }
        Ok(path)
    }
}

impl RemoteFolder for LocalFolder {
    fn upload(
        &self,
        source: UploadSource<'_>,
        folder: &str,
        name: Option<&str>,
    ) -> Result<(), TransferError> {
        let name = source.destination_name(name)?;
        let target = self.resolve(folder, Some(&name))?;
        let result = match source {
            UploadSource::Path(path) => fs::copy(path, &target).map(|_| ()),
            UploadSource::Bytes(bytes) => fs::write(&target, bytes),
        };
        match result {
            Ok(()) => {
                log::info!("uploaded {}", target.display());
                Ok(())
            }
            Err(e) => {
                log::warn!("upload to {} failed: {e}", target.display());
                Err(e.into())
            }
        }
    }

    fn list(&self, folder: &str) -> Result<Vec<String>, TransferError> {
        let dir = self.resolve(folder, None)?;
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn download(&self, folder: &str, name: &str) -> Result<Vec<u8>, TransferError> {
        Ok(fs::read(self.resolve(folder, Some(name))?)?)
    }
}
