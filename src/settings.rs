use cellmap_grid::{GridDimensions, WorldPoint};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// One radius query to run against the grid.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QuerySettings {
    pub x: i32,
    pub y: i32,
    pub radius: f32,
    #[serde(default)]
    pub center_check: bool,
}

impl QuerySettings {
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub grid: GridDimensions,
    #[serde(default)]
    pub queries: Vec<QuerySettings>,
}

/// Loads settings from a TOML file, overlaid with `CELLMAP_*` environment
/// variables (`CELLMAP_GRID__CELL_WIDTH=32`).
pub fn load_settings(path: &str) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let builder = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix("CELLMAP")
                .separator("__")
                .try_parsing(true),
        );

    match finish(builder) {
        Ok(settings) => {
            info!("Successfully loaded configuration: {:?}", settings);
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    builder.build()?.try_deserialize()
}
