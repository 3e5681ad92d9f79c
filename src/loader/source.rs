use crate::{HashMap, LoadError, MapPath};

/**
 * A method of receiving the bytes of map and tileset files.
 * IE: file system, archive, embedded data etc.
 */
pub trait Source: Send + Sync + 'static {
    /**
     * Name of the source, for logging.
     */
    fn name(&self) -> &str;
    /**
     * Retrieves raw bytes from the path specified.
     */
    fn read(&self, path: &MapPath) -> anyhow::Result<Vec<u8>>;
}

/**
 * An implementation of [`Source`] that fetches bytes from the file system.
 */
#[derive(Copy, Clone, Debug)]
pub struct FileSource;
impl Source for FileSource {
    fn name(&self) -> &str { "file" }
    fn read(&self, path: &MapPath) -> anyhow::Result<Vec<u8>> {
        let bytes = std::fs::read(path.full_path())?;
        Ok(bytes)
    }
}

/**
 * An implementation of [`Source`] that serves files it stores in memory.
 * Useful for testing purposes.
 */
#[derive(Clone, Default, Debug)]
pub struct RawSource(HashMap<String, Vec<u8>>);

impl RawSource {
    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.0.insert(path.into(), bytes.into());
        self
    }
}

impl Source for RawSource {
    fn name(&self) -> &str { "raw" }
    fn read(&self, path: &MapPath) -> anyhow::Result<Vec<u8>> {
        let full_path = path.full_path();
        match self.0.get(&full_path) {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(LoadError::NotFound { path: full_path }.into()),
        }
    }
}
