use std::io::Read;
use std::sync::Arc;
use anyhow::Context;
use derive_more::*;
use crate::map::{parse_map, parse_tileset, DecodedLayer, Layer, TiledMap, Tileset};
use crate::{Config, FileSource, HashMap, MapPath, PathHash, Source};

/// A map together with its decoded tile layers.
/// `layers[i]` is the decoded form of `map.layers[i]`.
#[derive(Clone, Debug)]
pub struct LoadedMap {
    pub map: TiledMap,
    pub layers: Vec<DecodedLayer>,
}

impl LoadedMap {

    /// First tile layer with the name given, raw and decoded.
    pub fn layer(&self, name: &str) -> Option<(&Layer, &DecodedLayer)> {
        self.map.layers
            .iter()
            .zip(&self.layers)
            .find(|(layer, _)| layer.name == name)
    }

    /// Tileset used by every tile of a decoded layer, if there is only one.
    pub fn uniform_tileset(&self, layer: &DecodedLayer) -> Option<&Tileset> {
        self.map.tilesets.get(layer.tileset_index?)
    }
}

/// Reads `.tmx` files and the `.tsx` files they reference through a [`Source`], then decodes them.
pub struct MapLoader {
    source: Arc<dyn Source>,
    config: Config,
    tilesets: HashMap<PathHash, Tileset>,
}

impl MapLoader {

    pub const MAP_EXTENSIONS: &'static [&'static str] = &["tmx"];
    pub const TILESET_EXTENSIONS: &'static [&'static str] = &["tsx"];

    pub fn new(source: impl Source, config: Config) -> Self {
        Self {
            source: Arc::new(source),
            config,
            tilesets: HashMap::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads the map at `path`, its external tilesets, and decodes every tile layer.
    pub fn load(&mut self, path: &str) -> anyhow::Result<LoadedMap> {
        let path = self.resolve(path, Self::MAP_EXTENSIONS)?;
        log::debug!("Loading map '{path}' from {}", self.source.name());
        let bytes = self.source
            .read(&path)
            .with_context(|| format!("Failed to read map '{path}'"))?;
        self.load_bytes(&bytes, path.parent().as_deref())
            .with_context(|| format!("Failed to load map '{path}'"))
    }

    /// Loads a map from the bytes of a `.tmx` document.
    /// Relative paths in the document are resolved against `parent_path`.
    pub fn load_bytes(&mut self, bytes: &[u8], parent_path: Option<&str>) -> anyhow::Result<LoadedMap> {
        let text = std::str::from_utf8(bytes)?;
        let mut map = parse_map(text, parent_path)?;
        for tileset in &mut map.tilesets {
            let Some(source) = tileset.source.clone() else { continue };
            if !tileset.is_unloaded() { continue }
            let loaded = self
                .load_tileset(&source)
                .with_context(|| format!("Failed to load tileset '{source}'"))?;
            *tileset = Tileset {
                first_gid: tileset.first_gid,
                source: Some(source),
                ..loaded
            };
        }
        let layers = match self.config.parallel {
            true => map.par_decoded_layers()?,
            false => map.decoded_layers()?,
        };
        log::debug!("Decoded {} layers using {} tilesets", layers.len(), map.tilesets.len());
        Ok(LoadedMap { map, layers })
    }

    /// Loads a `.tsx` file, or reuses it if an earlier map referenced the same path.
    fn load_tileset(&mut self, path: &str) -> anyhow::Result<Tileset> {
        let path_hash = PathHash::of(path);
        if let Some(tileset) = self.tilesets.get(&path_hash) {
            log::trace!("Reusing tileset '{path}'");
            return Ok(tileset.clone());
        }
        let path = self.resolve(path, Self::TILESET_EXTENSIONS)?;
        log::trace!("Loading tileset '{path}'");
        let bytes = self.source.read(&path)?;
        let text = std::str::from_utf8(&bytes)?;
        let tileset = parse_tileset(text, path.parent().as_deref())?;
        self.tilesets.insert(path_hash, tileset.clone());
        Ok(tileset)
    }

    fn resolve(&self, path: &str, extensions: &[&str]) -> Result<MapPath, LoadError> {
        let mut path = MapPath::parse(path)?;
        if !extensions.contains(&path.extension.as_str()) {
            return Err(LoadError::NoSuchLoader { extension: path.extension });
        }
        path.prefix = self.config.path_prefix.clone();
        Ok(path)
    }
}

/// Reads a map from `reader`.
/// External tilesets are read from the file system, relative to the working directory.
pub fn read(mut reader: impl Read) -> anyhow::Result<LoadedMap> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    MapLoader::new(FileSource, Config::default()).load_bytes(&bytes, None)
}

/// Reads a map from a file path.
pub fn read_file(path: &str) -> anyhow::Result<LoadedMap> {
    MapLoader::new(FileSource, Config::default()).load(path)
}

#[derive(Error, Debug, Display, Clone, Eq, PartialEq)]
pub enum LoadError {
    #[display(fmt="Path missing extension")]
    PathMissingExtension,
    #[display(fmt="No loader matching extension '{}'", extension)]
    NoSuchLoader { extension: String },
    #[display(fmt="File not found '{}'", path)]
    NotFound { path: String },
}
