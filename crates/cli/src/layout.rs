// Board layout from settings

use squares_config::Settings;
use squares_engine::{GridContext, GridError, GridId, GridSpec, Paging};

pub const MAIN_GRID: &str = "a";
pub const PAGER_GRID: &str = "p";

/// Largest row, column or page count a grid may have.
pub const MAX_GRID_SIZE: usize = 1000;

fn grid_id(name: &str) -> Result<GridId, String> {
    GridId::parse(name).ok_or_else(|| GridError::InvalidId(name.to_string()).to_string())
}

/// Ids for the navigation strips: `b`, `c`, ... skipping the pager's `p`.
fn strip_ids(count: usize) -> Result<Vec<GridId>, String> {
    let names: Vec<char> = ('b'..='z').filter(|c| *c != 'p').collect();
    if count > names.len() {
        return Err(format!(
            "too many navigation strips: {} (at most {})",
            count,
            names.len()
        ));
    }
    names[..count]
        .iter()
        .map(|c| grid_id(&c.to_string()))
        .collect()
}

fn check_size(what: &str, value: usize) -> Result<(), String> {
    if value > MAX_GRID_SIZE {
        return Err(format!("{} is {} (at most {})", what, value, MAX_GRID_SIZE));
    }
    Ok(())
}

/// Main grid `a`, the navigation strips under it, and the pager `p` when
/// `grid.pages` is set.
pub fn build(settings: &Settings) -> Result<GridContext, String> {
    check_size("grid.rows", settings.rows)?;
    check_size("grid.cols", settings.cols)?;
    check_size("grid.pages", settings.pages)?;
    for rows in &settings.strips {
        check_size("navigation.strips rows", *rows)?;
    }

    let mut grids = GridContext::new();
    let main = grid_id(MAIN_GRID)?;

    let mut spec = GridSpec::new(main.clone(), settings.rows, settings.cols);
    if settings.pages > 0 {
        spec = spec.paged(Paging::Stored);
    }
    grids.add(spec).map_err(|e| e.to_string())?;

    let strips = strip_ids(settings.strips.len())?;
    for (id, rows) in strips.iter().zip(&settings.strips) {
        grids
            .add(GridSpec::new(id.clone(), *rows, settings.cols))
            .map_err(|e| e.to_string())?;
    }
    if settings.link_strips {
        for pair in strips.windows(2) {
            grids.link(&pair[0], &pair[1]).map_err(|e| e.to_string())?;
        }
    }

    if settings.pages > 0 {
        let pager = GridSpec::pager(grid_id(PAGER_GRID)?, 1, settings.pages, main);
        grids.add(pager).map_err(|e| e.to_string())?;
    }

    Ok(grids)
}
