//! Procedural level generation
//!
//! Levels are composed from a fixed per-difficulty script of 30-column
//! chunks. Generation is deterministic in the level index.

pub mod chunks;
mod composer;
pub mod rng;
pub mod tables;
#[cfg(test)]
mod testing;

use serde::{Deserialize, Serialize};

pub use chunks::{Chunk, ChunkContext, ChunkKind};
pub use composer::{LevelCatalog, generate_level};
pub use rng::LevelRng;
pub use tables::{EnemyProfile, EnemySet, EnemyType, Theme};

/// Tile grid cell codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Air = 0,
    Ground = 1,
    Platform = 2,
    Coin = 3,
    Walker = 4,
    Flyer = 5,
    Ammo = 6,
    Goal = 7,
    Spike = 8,
    Breakable = 9,
    Spring = 10,
    Crumble = 11,
    Heart = 12,
}

impl Cell {
    /// Layout cells; everything else is a pickup or marker
    pub fn is_structural(&self) -> bool {
        matches!(self, Cell::Ground | Cell::Platform | Cell::Crumble)
    }

    /// Cells that block movement from every side
    pub fn is_solid(&self) -> bool {
        matches!(self, Cell::Ground | Cell::Crumble)
    }
}

/// Row-major cell grid, row 0 at the top
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// Grid with Ground at and below `ground_row`
    pub fn with_ground(rows: usize, cols: usize, ground_row: usize) -> Self {
        let mut cells = vec![Cell::Air; rows * cols];
        for cell in cells.iter_mut().skip(ground_row * cols) {
            *cell = Cell::Ground;
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    /// Cell at `(col, row)`; out of bounds reads as Air
    pub fn get(&self, col: i32, row: i32) -> Cell {
        self.index(col, row).map_or(Cell::Air, |i| self.cells[i])
    }

    /// Write a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = cell;
        }
    }

    /// Iterate `(col, row, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i % cols) as i32, (i / cols) as i32, cell))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPos {
    pub col: i32,
    pub row: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSpan {
    pub col: i32,
    pub row: i32,
    pub len: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapSpan {
    pub col: i32,
    pub len: i32,
}

impl GapSpan {
    pub fn contains(&self, col: i32) -> bool {
        crate::in_span(col, self.col, self.len)
    }
}

/// Breakable block; `has_heart` and `has_coin` are never both set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakableSpec {
    pub col: i32,
    pub row: i32,
    pub has_heart: bool,
    pub has_coin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub kind: EnemyType,
    pub col: i32,
    pub row: i32,
    pub fly: bool,
    /// Initial patrol direction, -1 or 1
    pub dir: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub col: i32,
    pub row: i32,
    pub name: String,
}

/// Immutable output of the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub level_index: u32,
    /// 1..=4
    pub world: u32,
    pub theme: Theme,
    /// 1..=25 within the world
    pub difficulty: u32,
    /// Seconds
    pub time_limit: u32,
    pub seed: u32,
    pub ground_row: i32,
    pub grid: TileGrid,
    pub platforms: Vec<PlatformSpan>,
    pub breakables: Vec<BreakableSpec>,
    pub coins: Vec<CellPos>,
    pub gaps: Vec<GapSpan>,
    pub enemies: Vec<EnemySpec>,
    pub ammo: Vec<CellPos>,
    pub spikes: Vec<CellPos>,
    pub decorations: Vec<Decoration>,
    pub goal: CellPos,
    pub start: CellPos,
}

impl LevelDescriptor {
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn in_gap(&self, col: i32) -> bool {
        self.gaps.iter().any(|g| g.contains(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_out_of_bounds_is_air() {
        let grid = TileGrid::with_ground(14, 20, 9);
        assert_eq!(grid.get(-1, 10), Cell::Air);
        assert_eq!(grid.get(20, 10), Cell::Air);
        assert_eq!(grid.get(0, 14), Cell::Air);
        assert_eq!(grid.get(0, 9), Cell::Ground);
        assert_eq!(grid.get(0, 8), Cell::Air);
    }

    #[test]
    fn test_flat_descriptor_layout() {
        let level = LevelDescriptor::flat(30, 40);
        assert_eq!(level.theme, Theme::Graveyard);
        assert_eq!(level.world, 2);
        assert_eq!(level.difficulty, 5);
        assert_eq!(level.goal, CellPos { col: 35, row: 8 });
        assert_eq!(level.grid.get(35, 8), Cell::Goal);
    }

    #[test]
    fn test_gap_carves_full_height() {
        let mut level = LevelDescriptor::flat(1, 40);
        level.add_gap(10, 3);
        for row in 9..14 {
            assert_eq!(level.grid.get(11, row), Cell::Air);
        }
        assert_eq!(level.grid.get(13, 9), Cell::Ground);
        assert!(level.in_gap(12));
        assert!(!level.in_gap(13));
    }
}
