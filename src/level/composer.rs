//! Level composer: chunk script -> tile grid + descriptor

use super::chunks::{ChunkContext, ChunkKind, block_violates_platforms};
use super::rng::LevelRng;
use super::tables::{Theme, chunk_sequence};
use super::{BreakableSpec, Cell, CellPos, Decoration, EnemySpec, GapSpan, LevelDescriptor, PlatformSpan, TileGrid};
use crate::consts::{GRID_ROWS, GROUND_ROW, LEVEL_COUNT, LEVEL_MARGIN, LEVELS_PER_WORLD, WORLD_COUNT};

/// Coins scattered over the whole level
const COIN_TARGET: usize = 30;
/// Chance that a heartless block hides a coin
const BLOCK_COIN_CHANCE: f64 = 0.20;
const AMMO_STRIDE: usize = 30;
const DECORATION_STRIDE: usize = 4;
/// Minimum column distance between decorations
const DECORATION_SPACING: i32 = 3;

/// Generate the level for a 1-based index (0 is treated as 1)
pub fn generate_level(level_index: u32) -> LevelDescriptor {
    let n = level_index.max(1);
    let world_index = (((n - 1) / LEVELS_PER_WORLD) as usize).min(WORLD_COUNT - 1);
    let theme = Theme::from_world_index(world_index);
    let difficulty = (n - 1) % LEVELS_PER_WORLD + 1;
    let seed = LevelRng::seed_for_level(n);
    let mut rng = LevelRng::new(seed);
    let g = GROUND_ROW as i32;

    let ctx = ChunkContext::new(theme, difficulty);
    let chunks: Vec<_> = chunk_sequence(difficulty)
        .iter()
        .map(|name| ChunkKind::from_name(name).build(&ctx))
        .collect();

    let cols = LEVEL_MARGIN + chunks.iter().map(|c| c.width as usize).sum::<usize>() + LEVEL_MARGIN;
    let mut level = LevelDescriptor {
        level_index: n,
        world: world_index as u32 + 1,
        theme,
        difficulty,
        time_limit: theme.time_limit(),
        seed,
        ground_row: g,
        grid: TileGrid::with_ground(GRID_ROWS, cols, GROUND_ROW),
        platforms: Vec::new(),
        breakables: Vec::new(),
        coins: Vec::new(),
        gaps: Vec::new(),
        enemies: Vec::new(),
        ammo: Vec::new(),
        spikes: Vec::new(),
        decorations: Vec::new(),
        goal: CellPos { col: cols as i32 - 5, row: g - 1 },
        start: CellPos { col: 1, row: g - 1 },
    };
    let cols = cols as i32;

    let mut offset = LEVEL_MARGIN as i32;
    for chunk in &chunks {
        for gap in &chunk.gaps {
            // The last chunk column always keeps its ground
            for c in gap.col..(gap.col + gap.len).min(chunk.width - 1) {
                for row in g..GRID_ROWS as i32 {
                    level.grid.set(offset + c, row, Cell::Air);
                }
            }
            level.gaps.push(GapSpan { col: offset + gap.col, len: gap.len });
        }

        for p in &chunk.platforms {
            for c in p.col..p.col + p.len {
                let wc = offset + c;
                if wc > 0 && wc < cols - 1 {
                    level.grid.set(wc, p.row, Cell::Platform);
                }
            }
            level.platforms.push(PlatformSpan { col: offset + p.col, ..*p });
        }

        for b in &chunk.breakables {
            // Heart blocks never consume a draw
            let has_coin = !b.has_heart && rng.next_unit() < BLOCK_COIN_CHANCE;
            level.breakables.push(BreakableSpec {
                col: offset + b.col,
                row: b.row,
                has_heart: b.has_heart,
                has_coin,
            });
        }

        level
            .spikes
            .extend(chunk.spikes.iter().map(|s| CellPos { col: offset + s.col, row: s.row }));
        level
            .enemies
            .extend(chunk.enemies.iter().map(|e| EnemySpec { col: offset + e.col, ..*e }));

        for d in &chunk.decorations {
            let wc = offset + d.col;
            if wc > 0
                && wc < cols - 2
                && !level.in_gap(wc)
                && let Some(name) = ctx.decoration_name(d.variant, wc)
            {
                level.decorations.push(Decoration {
                    col: wc,
                    row: d.row,
                    name: name.to_string(),
                });
            }
        }

        offset += chunk.width;
    }

    settle_blocks(&mut level);
    ensure_single_heart(&mut level);
    scatter_coins(&mut level);
    place_ammo(&mut level);
    scatter_decorations(&mut level, &mut rng, ctx.decorations);
    write_pickup_cells(&mut level);

    log::debug!(
        "Generated level {} ({}, difficulty {}): {} cols, {} enemies, {} blocks",
        n,
        theme.as_str(),
        difficulty,
        cols,
        level.enemies.len(),
        level.breakables.len()
    );
    level
}

/// Ground surface directly under `col` (not a pit)
fn solid_ground(level: &LevelDescriptor, col: i32) -> bool {
    level.grid.get(col, level.ground_row) == Cell::Ground
}

fn clear(level: &LevelDescriptor, col: i32, row: i32) -> bool {
    !level.grid.get(col, row).is_structural()
}

/// Lift any block that overlaps or rests on a platform, or hugs the ground
fn settle_blocks(level: &mut LevelDescriptor) {
    let max_row = level.ground_row - 2;
    for i in 0..level.breakables.len() {
        let (col, start_row) = (level.breakables[i].col, level.breakables[i].row);
        let mut row = start_row.min(max_row);
        while row > 0 && block_violates_platforms(&level.platforms, col, row) {
            row -= 1;
        }
        if row != start_row {
            log::warn!("Block at ({col}, {start_row}) violates platform clearance, lifted to row {row}");
            level.breakables[i].row = row;
        }
    }
}

/// Exactly one block per level hides a heart
fn ensure_single_heart(level: &mut LevelDescriptor) {
    let blocks = &mut level.breakables;
    if blocks.is_empty() {
        return;
    }
    let hearts = blocks.iter().filter(|b| b.has_heart).count();
    if hearts == 0 {
        let plain: Vec<usize> = (0..blocks.len())
            .filter(|&i| !blocks[i].has_heart && !blocks[i].has_coin)
            .collect();
        let pick = if plain.is_empty() {
            blocks.len() / 2
        } else {
            plain[plain.len() / 2]
        };
        blocks[pick].has_heart = true;
        blocks[pick].has_coin = false;
    } else if hearts > 1 {
        let mut kept = false;
        for b in blocks.iter_mut().filter(|b| b.has_heart) {
            if kept {
                b.has_heart = false;
            }
            kept = true;
        }
    }
}

/// Thirty coins one row above the ground; chunk coin hints are not used
fn scatter_coins(level: &mut LevelDescriptor) {
    let cols = level.cols() as i32;
    let row = level.ground_row - 2;
    let eligible = |level: &LevelDescriptor, col: i32| {
        !level.in_gap(col) && solid_ground(level, col) && clear(level, col, row)
    };

    let stride = (level.cols() / 35).max(2);
    let mut col = 4;
    while col < cols - 4 && level.coins.len() < COIN_TARGET {
        if eligible(level, col) {
            level.coins.push(CellPos { col, row });
        }
        col += stride as i32;
    }

    // Densify when pits ate too many slots
    let mut col = 5;
    while col < cols - 4 && level.coins.len() < COIN_TARGET {
        if eligible(level, col) && !level.coins.iter().any(|c| c.col == col) {
            level.coins.push(CellPos { col, row });
        }
        col += 2;
    }
}

fn place_ammo(level: &mut LevelDescriptor) {
    let cols = level.cols() as i32;
    let row = level.ground_row - 1;
    for col in (6..cols - 4).step_by(AMMO_STRIDE) {
        let on_spike = level.spikes.iter().any(|s| s.col == col && s.row == row);
        if !level.in_gap(col) && solid_ground(level, col) && clear(level, col, row) && !on_spike {
            level.ammo.push(CellPos { col, row });
        }
    }
}

/// Fill open ground with decorations drawn from the level RNG
fn scatter_decorations(level: &mut LevelDescriptor, rng: &mut LevelRng, pool: &[&str]) {
    if pool.is_empty() {
        return;
    }
    let cols = level.cols() as i32;
    let row = level.ground_row - 1;
    for col in (3..cols - 3).step_by(DECORATION_STRIDE) {
        let near_gap = level.gaps.iter().any(|g| col >= g.col - 2 && col < g.col + g.len + 2);
        let on_platform = level
            .platforms
            .iter()
            .any(|p| p.row == row && crate::in_span(col, p.col, p.len));
        if level.in_gap(col) || near_gap || !solid_ground(level, col) || !clear(level, col, row) || on_platform {
            continue;
        }
        if level.decorations.iter().any(|d| (d.col - col).abs() < DECORATION_SPACING) {
            continue;
        }
        let name = pool[rng.pick(pool.len())];
        level.decorations.push(Decoration {
            col,
            row,
            name: name.to_string(),
        });
    }
}

/// Stamp pickup and marker codes into the cells left empty by layout
fn write_pickup_cells(level: &mut LevelDescriptor) {
    fn stamp(grid: &mut TileGrid, pos: CellPos, cell: Cell) {
        if grid.get(pos.col, pos.row) == Cell::Air {
            grid.set(pos.col, pos.row, cell);
        }
    }

    for &pos in &level.spikes {
        stamp(&mut level.grid, pos, Cell::Spike);
    }
    for &pos in &level.coins {
        stamp(&mut level.grid, pos, Cell::Coin);
    }
    for &pos in &level.ammo {
        stamp(&mut level.grid, pos, Cell::Ammo);
    }
    stamp(&mut level.grid, level.goal, Cell::Goal);
    for b in &level.breakables {
        let cell = if b.has_heart { Cell::Heart } else { Cell::Breakable };
        stamp(&mut level.grid, CellPos { col: b.col, row: b.row }, cell);
    }
    for e in &level.enemies {
        let cell = if e.fly { Cell::Flyer } else { Cell::Walker };
        stamp(&mut level.grid, CellPos { col: e.col, row: e.row }, cell);
    }
}

/// Every level pre-generated at startup
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelDescriptor>,
}

impl LevelCatalog {
    pub fn generate() -> Self {
        let levels: Vec<_> = (1..=LEVEL_COUNT).map(generate_level).collect();
        log::info!("Generated {} levels", levels.len());
        Self { levels }
    }

    /// Level by 1-based index
    pub fn get(&self, level_index: u32) -> Option<&LevelDescriptor> {
        let i = level_index.checked_sub(1)? as usize;
        self.levels.get(i)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDescriptor> {
        self.levels.iter()
    }
}
