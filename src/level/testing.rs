//! Hand-built layouts for unit tests

use super::{BreakableSpec, Cell, CellPos, EnemySpec, EnemyType, GapSpan, LevelDescriptor, LevelRng, PlatformSpan, Theme, TileGrid};
use crate::consts::{GRID_ROWS, GROUND_ROW, LEVELS_PER_WORLD};

impl LevelDescriptor {
    /// Empty flat level with only ground, a goal and the start position
    pub fn flat(level_index: u32, cols: usize) -> Self {
        let level_index = level_index.max(1);
        let world_index = ((level_index - 1) / LEVELS_PER_WORLD) as usize;
        let theme = Theme::from_world_index(world_index);
        let ground_row = GROUND_ROW as i32;
        let goal = CellPos {
            col: cols as i32 - 5,
            row: ground_row - 1,
        };
        let mut grid = TileGrid::with_ground(GRID_ROWS, cols, GROUND_ROW);
        grid.set(goal.col, goal.row, Cell::Goal);

        Self {
            level_index,
            world: world_index as u32 + 1,
            theme,
            difficulty: (level_index - 1) % LEVELS_PER_WORLD + 1,
            time_limit: theme.time_limit(),
            seed: LevelRng::seed_for_level(level_index),
            ground_row,
            grid,
            platforms: Vec::new(),
            breakables: Vec::new(),
            coins: Vec::new(),
            gaps: Vec::new(),
            enemies: Vec::new(),
            ammo: Vec::new(),
            spikes: Vec::new(),
            decorations: Vec::new(),
            goal,
            start: CellPos { col: 1, row: ground_row - 1 },
        }
    }

    /// Carve a pit through every row at and below the ground row
    pub fn add_gap(&mut self, col: i32, len: i32) {
        for c in col..col + len {
            for row in self.ground_row..self.rows() as i32 {
                self.grid.set(c, row, Cell::Air);
            }
        }
        self.gaps.push(GapSpan { col, len });
    }

    pub fn add_platform(&mut self, col: i32, row: i32, len: i32) {
        for c in col..col + len {
            self.grid.set(c, row, Cell::Platform);
        }
        self.platforms.push(PlatformSpan { col, row, len });
    }

    pub fn add_enemy(&mut self, kind: EnemyType, col: i32, row: i32, fly: bool, dir: i32) {
        let marker = if fly { Cell::Flyer } else { Cell::Walker };
        if self.grid.get(col, row) == Cell::Air {
            self.grid.set(col, row, marker);
        }
        self.enemies.push(EnemySpec { kind, col, row, fly, dir });
    }

    pub fn add_breakable(&mut self, col: i32, row: i32, has_heart: bool, has_coin: bool) {
        let marker = if has_heart { Cell::Heart } else { Cell::Breakable };
        self.grid.set(col, row, marker);
        self.breakables.push(BreakableSpec {
            col,
            row,
            has_heart,
            has_coin: has_coin && !has_heart,
        });
    }

    /// Place a pickup or tile code directly (coins, springs, crumble tiles)
    pub fn set_cell(&mut self, col: i32, row: i32, cell: Cell) {
        self.grid.set(col, row, cell);
        match cell {
            Cell::Coin => self.coins.push(CellPos { col, row }),
            Cell::Ammo => self.ammo.push(CellPos { col, row }),
            Cell::Spike => self.spikes.push(CellPos { col, row }),
            _ => {}
        }
    }
}
