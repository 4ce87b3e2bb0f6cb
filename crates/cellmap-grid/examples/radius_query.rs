use cellmap_grid::{Grid, GridPoint, WorldPoint};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .init();

    // 16x12 cells of 32x32 pixels, a 512x384 world
    let mut grid: Grid<Vec<&str>> = Grid::new(32, 32, 16, 12)?;

    // Place a few named objects by their world position
    let objects = [
        ("tree", WorldPoint::new(40, 40)),
        ("rock", WorldPoint::new(70, 50)),
        ("well", WorldPoint::new(300, 200)),
        ("bush", WorldPoint::new(310, 215)),
    ];
    for (name, pos) in objects {
        grid.get_cell_at_world_mut(pos)?.push(name);
    }

    println!("{}", grid);

    // Everything within 64 pixels of (60, 60), filtered by cell center
    let center = WorldPoint::new(60, 60);
    for p in grid.get_points(center, 64.0, true) {
        match grid.get_cell(p) {
            Ok(names) => println!("cell {} holds {:?}", p, names),
            Err(e) if e.is_uninitialized() => println!("cell {} is empty", p),
            Err(e) => return Err(e.into()),
        }
    }

    // A tiny query near the world origin only reaches the containing cell
    let points = grid.get_points(WorldPoint::new(1, 1), 2.0, true);
    assert_eq!(points, vec![GridPoint::new(0, 0)]);
    println!("tiny query at (1, 1) resolved to {:?}", points);

    println!(
        "query at {} with radius 16 spans several cells: {}",
        WorldPoint::new(300, 200),
        grid.covers_multiple_cells(WorldPoint::new(300, 200), 16)?
    );

    Ok(())
}
