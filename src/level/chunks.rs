//! Chunk library
//!
//! Each chunk is a 30-column layout pattern in local coordinates. Rows are
//! expressed relative to the ground surface row `G`.

use super::tables::{EnemySet, EnemyType, Theme};
use super::{CellPos, EnemySpec, GapSpan, PlatformSpan};
use crate::consts::CHUNK_WIDTH;

const G: i32 = crate::consts::GROUND_ROW as i32;

/// Layout pattern names used by the chunk scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    Open,
    Gap,
    Climb,
    Enemies,
    Spikes,
    Doubles,
    Boss,
    Breakables,
    Tower,
    Tunnel,
    Complex,
}

/// Inputs shared by every chunk builder
#[derive(Debug, Clone, Copy)]
pub struct ChunkContext {
    pub enemies: EnemySet,
    /// In-world difficulty, 1..=25
    pub difficulty: u32,
    /// Theme decoration names; hints pick from it by variant
    pub decorations: &'static [&'static str],
}

impl ChunkContext {
    pub fn new(theme: Theme, difficulty: u32) -> Self {
        Self {
            enemies: theme.enemies_for(difficulty),
            difficulty,
            decorations: theme.decorations(),
        }
    }

    /// Name for a decoration hint placed at world column `col`
    pub fn decoration_name(&self, variant: usize, col: i32) -> Option<&'static str> {
        if self.decorations.is_empty() {
            return None;
        }
        let i = (variant + col.max(0) as usize) % self.decorations.len();
        Some(self.decorations[i])
    }
}

/// Breakable block hint; coins are rolled by the composer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHint {
    pub col: i32,
    pub row: i32,
    pub has_heart: bool,
}

/// Decoration hint; `variant` offsets into the theme's decoration pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationHint {
    pub col: i32,
    pub row: i32,
    pub variant: usize,
}

/// One built chunk in local coordinates
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    pub width: i32,
    pub platforms: Vec<PlatformSpan>,
    pub enemies: Vec<EnemySpec>,
    pub coins: Vec<CellPos>,
    pub gaps: Vec<GapSpan>,
    pub breakables: Vec<BlockHint>,
    pub decorations: Vec<DecorationHint>,
    pub spikes: Vec<CellPos>,
}

impl Chunk {
    fn new() -> Self {
        Self {
            width: CHUNK_WIDTH as i32,
            ..Default::default()
        }
    }

    fn platform(&mut self, col: i32, row: i32, len: i32) {
        self.platforms.push(PlatformSpan { col, row, len });
    }

    /// Platform with a coin row resting on it
    fn coined_platform(&mut self, col: i32, row: i32, len: i32) {
        self.platform(col, row, len);
        for i in 0..len {
            self.coin(col + i, row - 1);
        }
    }

    fn coin(&mut self, col: i32, row: i32) {
        self.coins.push(CellPos { col, row });
    }

    fn gap(&mut self, col: i32, len: i32) {
        self.gaps.push(GapSpan { col, len });
    }

    fn block(&mut self, col: i32, row: i32, has_heart: bool) {
        self.breakables.push(BlockHint { col, row, has_heart });
    }

    fn spike(&mut self, col: i32) {
        self.spikes.push(CellPos { col, row: G - 1 });
    }

    fn walker(&mut self, kind: EnemyType, col: i32, dir: i32) {
        self.enemies.push(EnemySpec { kind, col, row: G - 1, fly: false, dir });
    }

    fn flyer(&mut self, kind: EnemyType, col: i32, row: i32, dir: i32) {
        self.enemies.push(EnemySpec { kind, col, row, fly: true, dir });
    }

    fn decorations(&mut self, hints: &[(i32, usize)]) {
        self.decorations.extend(hints.iter().map(|&(col, variant)| DecorationHint {
            col,
            row: G - 1,
            variant,
        }));
    }
}

impl ChunkKind {
    /// Resolve a script name, falling back to `Open` for unknown names
    pub fn from_name(name: &str) -> Self {
        match name {
            "open" => ChunkKind::Open,
            "gap" => ChunkKind::Gap,
            "climb" => ChunkKind::Climb,
            "enemies" => ChunkKind::Enemies,
            "spikes" => ChunkKind::Spikes,
            "doubles" => ChunkKind::Doubles,
            "boss" => ChunkKind::Boss,
            "breakables" => ChunkKind::Breakables,
            "tower" => ChunkKind::Tower,
            "tunnel" => ChunkKind::Tunnel,
            "complex" => ChunkKind::Complex,
            other => {
                log::debug!("Unknown chunk kind {other:?}, using open");
                ChunkKind::Open
            }
        }
    }

    pub fn build(&self, ctx: &ChunkContext) -> Chunk {
        match self {
            ChunkKind::Open => open(ctx),
            ChunkKind::Gap => gap(ctx),
            ChunkKind::Climb => climb(ctx),
            ChunkKind::Enemies => enemies(ctx),
            ChunkKind::Spikes => spikes(ctx),
            ChunkKind::Doubles => doubles(ctx),
            ChunkKind::Boss => boss(ctx),
            ChunkKind::Breakables => breakables(ctx),
            ChunkKind::Tower => tower(ctx),
            ChunkKind::Tunnel => tunnel(ctx),
            ChunkKind::Complex => complex(ctx),
        }
    }
}

/// Flat ground with two low platforms and a walker pair
fn open(ctx: &ChunkContext) -> Chunk {
    let d = ctx.difficulty as i32;
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    for col in (2..29).step_by(2) {
        ch.coin(col, G - 1);
    }
    let pc = 5 + d / 2;
    ch.platform(pc, G - 3, 5);
    for i in 0..5 {
        ch.coin(pc + i, G - 4);
    }
    ch.platform(20, G - 2, 4);

    ch.block(7, G - 5, false);
    ch.block(12, G - 5, d >= 3);
    ch.block(22, G - 4, false);

    ch.walker(et.walker, 15, 1);
    ch.walker(et.walker, 26, -1);
    if d >= 3 {
        ch.flyer(et.flyer, 10, G - 5, 1);
    }
    ch.decorations(&[(2, 0), (5, 1), (9, 2), (13, 3), (17, 4), (21, 0), (25, 2), (28, 5)]);
    ch
}

/// One pit that widens with difficulty
fn gap(ctx: &ChunkContext) -> Chunk {
    let d = ctx.difficulty as i32;
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    let size = (3 + d / 2).min(7);
    let gc = 8;
    ch.gap(gc, size);
    for col in (2..gc).step_by(2) {
        ch.coin(col, G - 1);
    }
    for col in (gc + size + 1..29).step_by(2) {
        ch.coin(col, G - 1);
    }
    if size >= 5 {
        ch.platform(gc + 2, G - 4, 2);
        ch.coin(gc + 2, G - 5);
        ch.coin(gc + 3, G - 5);
    }
    ch.platform(3, G - 3, 3);

    ch.block(4, G - 5, d >= 2);
    ch.block(gc + size + 2, G - 5, false);
    ch.block(25, G - 5, false);

    let after = gc + size + 3;
    if after < 26 {
        ch.walker(et.walker, after, -1);
    }
    if after + 3 < 28 {
        ch.walker(et.walker, after + 3, 1);
    }
    if d >= 2 {
        ch.flyer(et.flyer, gc + size / 2, G - 6, 1);
    }
    ch.decorations(&[(2, 0), (5, 3), (gc - 2, 1), (gc + size + 2, 2), (26, 4), (28, 0)]);
    ch
}

/// Staircase up and back down
fn climb(ctx: &ChunkContext) -> Chunk {
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    for (col, row, len) in [(3, G - 2, 4), (9, G - 3, 4), (15, G - 4, 4), (21, G - 3, 4), (26, G - 2, 3)] {
        ch.coined_platform(col, row, len);
    }

    ch.block(5, G - 4, false);
    ch.block(11, G - 5, true);
    ch.block(17, G - 6, false);
    ch.block(23, G - 5, false);

    ch.flyer(et.flyer, 15, G - 6, 1);
    ch.walker(et.walker, 6, 1);
    ch.walker(et.walker, 24, -1);
    ch.decorations(&[(1, 0), (7, 1), (13, 2), (19, 3), (24, 4), (28, 0)]);
    ch
}

/// Walker crowd with three escape platforms
fn enemies(ctx: &ChunkContext) -> Chunk {
    let d = ctx.difficulty as i32;
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    ch.platform(3, G - 3, 4);
    ch.platform(14, G - 3, 4);
    ch.platform(24, G - 3, 4);
    for i in 0..4 {
        ch.coin(3 + i, G - 4);
        ch.coin(14 + i, G - 4);
        ch.coin(24 + i, G - 4);
    }

    ch.block(4, G - 5, false);
    ch.block(15, G - 5, true);
    ch.block(25, G - 5, false);
    ch.block(10, G - 5, false);
    ch.block(20, G - 5, false);

    let count = (3 + d / 2).min(7);
    for i in 0..count {
        let dir = if i % 2 == 1 { 1 } else { -1 };
        ch.walker(et.walker, 3 + i * 24 / count, dir);
    }
    ch.flyer(et.flyer, 10, G - 5, 1);
    if d >= 4 {
        ch.flyer(et.flyer, 22, G - 5, -1);
    }
    if d >= 6 {
        ch.flyer(et.flyer, 16, G - 7, 1);
    }
    ch.decorations(&[(1, 5), (8, 1), (13, 2), (19, 3), (27, 0)]);
    ch
}

/// Spike floor under a long safe ledge
fn spikes(ctx: &ChunkContext) -> Chunk {
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    ch.platform(2, G - 4, 27);
    for col in 2..29 {
        ch.coin(col, G - 5);
    }
    for col in (2..28).step_by(2) {
        ch.spike(col);
    }
    ch.flyer(et.flyer, 8, G - 7, 1);
    ch.flyer(et.flyer, 22, G - 7, -1);
    ch.walker(et.walker, 5, 1);

    for col in [6, 10, 14, 18, 22] {
        ch.block(col, G - 6, col == 14);
    }
    ch.decorations(&[(4, 2), (10, 0), (16, 3), (22, 1), (27, 4)]);
    ch
}

/// Two pits joined by a low bridge
fn doubles(ctx: &ChunkContext) -> Chunk {
    let d = ctx.difficulty as i32;
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    let (g1, l1) = (4, 3 + d / 5);
    let (g2, l2) = (16, 3 + d / 4);
    ch.gap(g1, l1);
    ch.gap(g2, l2);
    let bridge_start = g1 + l1 + 1;
    let bridge_end = g2 - 1;
    if bridge_end > bridge_start {
        ch.platform(bridge_start, G - 2, bridge_end - bridge_start);
        for col in bridge_start..bridge_end {
            ch.coin(col, G - 3);
        }
    }
    ch.platform(2, G - 3, 2);
    ch.platform(g2 + l2 + 1, G - 3, 3);

    ch.block(3, G - 5, false);
    ch.block((bridge_start + bridge_end) / 2, G - 4, true);
    ch.block(g2 + l2 + 2, G - 5, false);

    for col in (g2 + l2 + 1..28).step_by(2) {
        ch.coin(col, G - 1);
    }
    for col in (2..g1).step_by(2) {
        ch.coin(col, G - 1);
    }

    ch.flyer(et.flyer, (g1 + g2) / 2, G - 5, 1);
    if g2 + l2 + 3 < 28 {
        ch.walker(et.walker, g2 + l2 + 3, -1);
    }
    ch.walker(et.walker, 2, 1);
    if d >= 3 {
        ch.flyer(et.flyer, g2 + 2, G - 5, -1);
    }
    ch.decorations(&[(2, 1), (g1 - 2, 3), (g2 + l2 + 2, 0), (27, 2)]);
    ch
}

/// Boss arena
fn boss(ctx: &ChunkContext) -> Chunk {
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    ch.platform(2, G - 3, 5);
    ch.platform(12, G - 5, 7);
    ch.platform(23, G - 3, 5);

    ch.flyer(et.boss, 14, G - 8, -1);
    ch.flyer(et.flyer, 5, G - 4, 1);
    ch.flyer(et.flyer, 24, G - 4, -1);
    ch.walker(et.walker, 3, 1);
    ch.walker(et.walker, 26, -1);
    ch.walker(et.walker, 14, 1);

    ch.block(6, G - 5, false);
    ch.block(13, G - 7, true);
    ch.block(15, G - 7, false);
    ch.block(17, G - 7, true);
    ch.block(24, G - 5, false);
    ch.block(10, G - 5, false);
    ch.block(20, G - 5, false);

    for col in (2..29).step_by(2) {
        ch.coin(col, G - 1);
    }
    for col in 12..19 {
        ch.coin(col, G - 6);
    }
    ch.decorations(&[(1, 0), (10, 2), (21, 4), (28, 1)]);
    ch
}

/// Three staggered rows of blocks
fn breakables(ctx: &ChunkContext) -> Chunk {
    let d = ctx.difficulty as i32;
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    for col in (3..27).step_by(2) {
        ch.block(col, G - 3, col == 13 || col == 21);
    }
    for col in (5..25).step_by(3) {
        ch.block(col, G - 5, col == 14 || col == 17);
    }
    for col in (7..22).step_by(4) {
        ch.block(col, G - 7, col == 11);
    }
    for col in (3..27).step_by(2) {
        ch.coin(col, G - 4);
    }
    for col in (5..25).step_by(3) {
        ch.coin(col, G - 6);
    }

    ch.walker(et.walker, 8, 1);
    ch.walker(et.walker, 20, -1);
    ch.walker(et.walker, 14, 1);
    ch.flyer(et.flyer, 14, G - 7, 1);
    if d >= 5 {
        ch.flyer(et.flyer, 7, G - 5, -1);
    }
    ch.decorations(&[(2, 0), (11, 3), (18, 1), (26, 5)]);
    ch
}

/// Vertical climb over three tiers
fn tower(ctx: &ChunkContext) -> Chunk {
    let d = ctx.difficulty as i32;
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    for (col, row, len) in [
        (1, G - 2, 6),
        (11, G - 2, 6),
        (22, G - 2, 7),
        (4, G - 4, 5),
        (16, G - 4, 5),
        (8, G - 6, 6),
        (20, G - 6, 6),
    ] {
        ch.coined_platform(col, row, len);
    }

    // Blocks sit two rows above the tier they hover over
    ch.block(5, G - 6, false);
    ch.block(15, G - 4, false);
    ch.block(25, G - 4, false);
    ch.block(9, G - 8, true);
    ch.block(21, G - 8, false);

    ch.flyer(et.flyer, 9, G - 4, 1);
    ch.flyer(et.flyer, 21, G - 5, -1);
    ch.walker(et.walker, 5, 1);
    ch.walker(et.walker, 25, -1);
    if d >= 6 {
        ch.flyer(et.boss, 14, G - 8, 1);
    }
    ch.decorations(&[(1, 0), (10, 2), (21, 3), (28, 1)]);
    ch
}

/// Low ceiling over a spiked corridor
fn tunnel(ctx: &ChunkContext) -> Chunk {
    let d = ctx.difficulty as i32;
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    ch.platform(2, G - 4, 27);
    for col in (2..29).step_by(2) {
        ch.coin(col, G - 2);
    }
    for col in (4..26).step_by(5) {
        ch.spike(col);
    }
    for col in (5..25).step_by(4) {
        ch.block(col, G - 6, col == 13);
    }

    ch.walker(et.walker, 8, 1);
    ch.walker(et.walker, 20, -1);
    ch.walker(et.walker, 14, 1);
    ch.flyer(et.flyer, 14, G - 3, 1);
    if d >= 5 {
        ch.flyer(et.flyer, 8, G - 3, -1);
    }
    ch.decorations(&[(2, 0), (8, 2), (16, 1), (24, 3)]);
    ch
}

/// Short pit plus floating platforms at mixed heights
fn complex(ctx: &ChunkContext) -> Chunk {
    let d = ctx.difficulty as i32;
    let et = ctx.enemies;
    let mut ch = Chunk::new();

    ch.gap(6, 3);
    for (col, row, len) in [(2, G - 3, 3), (9, G - 4, 3), (14, G - 2, 3), (20, G - 5, 3), (25, G - 3, 3)] {
        ch.coined_platform(col, row, len);
    }

    ch.block(3, G - 5, false);
    ch.block(10, G - 6, true);
    ch.block(21, G - 7, false);
    ch.block(26, G - 5, false);

    ch.flyer(et.flyer, 12, G - 6, -1);
    ch.walker(et.walker, 17, 1);
    ch.walker(et.walker, 3, -1);
    ch.walker(et.walker, 27, 1);
    if d >= 5 {
        ch.flyer(et.flyer, 23, G - 7, 1);
    }
    ch.decorations(&[(2, 1), (9, 0), (14, 3), (20, 2), (25, 4)]);
    ch
}

/// True when a block at `(col, row)` overlaps a platform cell or sits
/// directly on a platform surface
pub fn block_violates_platforms(platforms: &[PlatformSpan], col: i32, row: i32) -> bool {
    platforms
        .iter()
        .any(|p| (p.row == row || p.row == row + 1) && crate::in_span(col, p.col, p.len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::tables::Theme;

    const ALL: [ChunkKind; 11] = [
        ChunkKind::Open,
        ChunkKind::Gap,
        ChunkKind::Climb,
        ChunkKind::Enemies,
        ChunkKind::Spikes,
        ChunkKind::Doubles,
        ChunkKind::Boss,
        ChunkKind::Breakables,
        ChunkKind::Tower,
        ChunkKind::Tunnel,
        ChunkKind::Complex,
    ];

    fn ctx(difficulty: u32) -> ChunkContext {
        ChunkContext {
            enemies: Theme::Nature.enemies(),
            difficulty,
            decorations: Theme::Nature.decorations(),
        }
    }

    #[test]
    fn test_context_carries_theme_pool() {
        for theme in Theme::ALL {
            let ctx = ChunkContext::new(theme, 12);
            assert_eq!(ctx.decorations, theme.decorations());
            assert_eq!(ctx.enemies, theme.enemies_for(12));
            for kind in ALL {
                for hint in &kind.build(&ctx).decorations {
                    let name = ctx.decoration_name(hint.variant, hint.col + 8).expect("non-empty pool");
                    assert!(theme.decorations().contains(&name), "{name} not in {theme:?} pool");
                }
            }
        }
    }

    #[test]
    fn test_empty_pool_names_nothing() {
        let bare = ChunkContext {
            decorations: &[],
            ..ctx(1)
        };
        assert_eq!(bare.decoration_name(3, 10), None);
        assert_eq!(ctx(1).decoration_name(2, 3), Some(Theme::Nature.decorations()[5]));
    }

    #[test]
    fn test_unknown_name_falls_back_to_open() {
        assert_eq!(ChunkKind::from_name("lava"), ChunkKind::Open);
        assert_eq!(ChunkKind::from_name("tower"), ChunkKind::Tower);
    }

    #[test]
    fn test_blocks_clear_of_platforms_and_ground() {
        for d in 1..=25 {
            for kind in ALL {
                let ch = kind.build(&ctx(d));
                for b in &ch.breakables {
                    assert!(
                        !block_violates_platforms(&ch.platforms, b.col, b.row),
                        "{kind:?} d={d} block at ({}, {})",
                        b.col,
                        b.row
                    );
                    assert!(b.row <= G - 2, "{kind:?} block too close to ground");
                }
            }
        }
    }

    #[test]
    fn test_content_stays_inside_chunk() {
        for d in 1..=25 {
            for kind in ALL {
                let ch = kind.build(&ctx(d));
                assert_eq!(ch.width, 30);
                for p in &ch.platforms {
                    assert!(p.col >= 0 && p.col + p.len <= ch.width);
                }
                for e in &ch.enemies {
                    assert!(e.col >= 0 && e.col < ch.width);
                }
            }
        }
    }

    #[test]
    fn test_gap_width_scales_with_difficulty() {
        assert_eq!(gap(&ctx(1)).gaps[0].len, 3);
        assert_eq!(gap(&ctx(4)).gaps[0].len, 5);
        assert_eq!(gap(&ctx(25)).gaps[0].len, 7);
        // Extra stepping platform only over wide gaps
        assert_eq!(gap(&ctx(1)).platforms.len(), 1);
        assert_eq!(gap(&ctx(4)).platforms.len(), 2);
    }

    #[test]
    fn test_enemy_count_scales_with_difficulty() {
        let walkers = |d| enemies(&ctx(d)).enemies.iter().filter(|e| !e.fly).count();
        assert_eq!(walkers(1), 3);
        assert_eq!(walkers(6), 6);
        assert_eq!(walkers(20), 7);
        assert_eq!(enemies(&ctx(6)).enemies.iter().filter(|e| e.fly).count(), 3);
    }

    #[test]
    fn test_doubles_bridge_between_gaps() {
        let ch = doubles(&ctx(1));
        assert_eq!(ch.gaps, vec![GapSpan { col: 4, len: 3 }, GapSpan { col: 16, len: 3 }]);
        assert_eq!(ch.platforms[0], PlatformSpan { col: 8, row: G - 2, len: 7 });
    }

    #[test]
    fn test_tower_boss_only_when_hard() {
        let has_boss = |d| tower(&ctx(d)).enemies.iter().any(|e| e.kind == EnemyType::Tuca1);
        assert!(!has_boss(5));
        assert!(has_boss(6));
    }
}
