use std::path::PathBuf;
use clap::Parser;
use serde::Serialize;
use tmx_map::map::{ObjectGroup, Point};
use tmx_map::{Config, FileSource, LoadedMap, MapLoader};

/// Decodes a Tiled map and prints a summary of its tilesets and layers.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path of the .tmx file.
    path: String,

    /// YAML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Include decoded polygon and polyline points of objects.
    #[arg(long)]
    points: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[cfg(feature = "profile")]
    let _guard = {
        use tracing_subscriber::prelude::*;
        let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new().build();
        tracing::subscriber::set_global_default(tracing_subscriber::registry().with(chrome_layer))?;
        guard
    };

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let mut loader = MapLoader::new(FileSource, config);
    let loaded = loader.load(&cli.path)?;
    log::info!("Loaded '{}'", cli.path);

    let summary = MapSummary::of(&loaded, cli.points)?;
    print!("{}", serde_yaml::to_string(&summary)?);
    Ok(())
}

#[derive(Serialize)]
struct MapSummary {
    version: String,
    size: [u32; 2],
    tile_size: [u32; 2],
    tilesets: Vec<TilesetSummary>,
    layers: Vec<LayerSummary>,
    object_groups: Vec<ObjectGroupSummary>,
}

#[derive(Serialize)]
struct TilesetSummary {
    name: String,
    first_gid: u32,
    tile_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

#[derive(Serialize)]
struct LayerSummary {
    name: String,
    size: [u32; 2],
    tiles: usize,
    non_empty: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    tileset: Option<String>,
    empty: bool,
    multi_tileset: bool,
}

#[derive(Serialize)]
struct ObjectGroupSummary {
    name: String,
    objects: Vec<ObjectSummary>,
}

#[derive(Serialize)]
struct ObjectSummary {
    id: u32,
    name: String,
    position: [f64; 2],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    polygons: Vec<Vec<[i32; 2]>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    polylines: Vec<Vec<[i32; 2]>>,
}

impl MapSummary {
    fn of(loaded: &LoadedMap, points: bool) -> anyhow::Result<Self> {
        let map = &loaded.map;
        let tilesets = map.tilesets
            .iter()
            .map(|tileset| TilesetSummary {
                name: tileset.name.clone(),
                first_gid: tileset.first_gid,
                tile_count: tileset.tile_count,
                source: tileset.source.clone(),
            })
            .collect();
        let layers = map.layers
            .iter()
            .zip(&loaded.layers)
            .map(|(layer, decoded)| LayerSummary {
                name: layer.name.clone(),
                size: [decoded.width, decoded.height],
                tiles: decoded.tiles.len(),
                non_empty: decoded.iter().count(),
                tileset: loaded.uniform_tileset(decoded).map(|tileset| tileset.name.clone()),
                empty: decoded.empty,
                multi_tileset: decoded.multi_tileset,
            })
            .collect();
        let object_groups = map.object_groups
            .iter()
            .map(|group| ObjectGroupSummary::of(group, points))
            .collect::<anyhow::Result<_>>()?;
        Ok(Self {
            version: map.version.clone(),
            size: [map.width, map.height],
            tile_size: [map.tile_width, map.tile_height],
            tilesets,
            layers,
            object_groups,
        })
    }
}

impl ObjectGroupSummary {
    fn of(group: &ObjectGroup, points: bool) -> anyhow::Result<Self> {
        let mut objects = Vec::with_capacity(group.objects.len());
        for object in &group.objects {
            let mut summary = ObjectSummary {
                id: object.id,
                name: object.name.clone(),
                position: [object.x, object.y],
                polygons: Vec::new(),
                polylines: Vec::new(),
            };
            if points {
                for polygon in &object.polygons {
                    summary.polygons.push(to_pairs(polygon.decode()?));
                }
                for polyline in &object.polylines {
                    summary.polylines.push(to_pairs(polyline.decode()?));
                }
            }
            objects.push(summary);
        }
        Ok(Self { name: group.name.clone(), objects })
    }
}

fn to_pairs(points: Vec<Point>) -> Vec<[i32; 2]> {
    points.into_iter().map(|point| point.to_array()).collect()
}
