mod settings;

use anyhow::Context;
use cellmap_grid::Grid;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use settings::{DEFAULT_CONFIG_PATH, Settings};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let settings = settings::load_settings(&path)
        .with_context(|| format!("failed to load configuration from {}", path))?;

    let grid = run(&settings)?;
    println!("{}", grid);
    Ok(())
}

/// Builds the configured grid and counts, per cell, how many queries touched it.
fn run(settings: &Settings) -> anyhow::Result<Grid<u32>> {
    let mut grid: Grid<u32> = Grid::with_dimensions(settings.grid)
        .context("invalid grid dimensions in configuration")?;
    let (_, extent) = grid.world_extent();
    info!(
        cells_x = grid.horizontal_cell_count(),
        cells_y = grid.vertical_cell_count(),
        world_width = extent.x,
        world_height = extent.y,
        "Grid created"
    );

    for query in &settings.queries {
        let center = query.center();
        let points = grid.get_points(center, query.radius, query.center_check);

        // The span check works on whole world units, like the query's bounding box
        match grid.covers_multiple_cells(center, query.radius as u32) {
            Ok(multiple) => debug!(%center, radius = query.radius, multiple, "Query span"),
            Err(e) => {
                warn!(%center, radius = query.radius, error = %e, "Query region off the grid")
            }
        }

        for p in &points {
            *grid.get_cell_mut(*p)? += 1;
        }
        info!(
            %center,
            radius = query.radius,
            center_check = query.center_check,
            cells = points.len(),
            "Query resolved"
        );
    }

    info!(touched = grid.len(), "All queries processed");
    Ok(grid)
}
