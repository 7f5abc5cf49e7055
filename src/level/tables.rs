//! Static theme, enemy and chunk-script tables
//!
//! Generation is a pure function of the level index given these tables.

use serde::{Deserialize, Serialize};

/// World skin, one per 25 levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Nature,
    Graveyard,
    Winter,
    Desert,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Nature, Theme::Graveyard, Theme::Winter, Theme::Desert];

    /// Theme for a 0-based world index (clamped to the last world)
    pub fn from_world_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Nature => "nature",
            Theme::Graveyard => "graveyard",
            Theme::Winter => "winter",
            Theme::Desert => "desert",
        }
    }

    /// Level time limit in seconds
    pub fn time_limit(&self) -> u32 {
        match self {
            Theme::Nature => 180,
            Theme::Graveyard => 210,
            Theme::Winter => 240,
            Theme::Desert => 270,
        }
    }

    /// Base walker/flyer/boss triple
    pub fn enemies(&self) -> EnemySet {
        use EnemyType::*;
        match self {
            Theme::Nature => EnemySet::new(Snail1, Bat1, Tuca1),
            Theme::Graveyard => EnemySet::new(Snail2, Bat2, SpikeBee1),
            Theme::Winter => EnemySet::new(Tuca2, SpikeBee2, Bat3),
            Theme::Desert => EnemySet::new(Tuca3, SpikeBee3, Snail3),
        }
    }

    /// Alternate sprites substituted at higher difficulties
    pub fn extra_enemies(&self) -> [EnemyType; 4] {
        use EnemyType::*;
        match self {
            Theme::Nature => [Snail1, Bat1, Tuca1, SpikeBee4],
            Theme::Graveyard => [Snail2, Bat2, SpikeBee1, Tuca1],
            Theme::Winter => [Tuca2, SpikeBee2, Bat3, Snail3],
            Theme::Desert => [Tuca3, SpikeBee3, Snail3, Bat1],
        }
    }

    /// Enemy triple for an in-world difficulty (1..=25)
    pub fn enemies_for(&self, difficulty: u32) -> EnemySet {
        let base = self.enemies();
        let extra = self.extra_enemies();
        let walker = if difficulty <= 12 {
            base.walker
        } else {
            extra[((difficulty - 13) % 4) as usize]
        };
        let flyer = if difficulty <= 10 {
            base.flyer
        } else if difficulty <= 18 {
            extra[1]
        } else {
            extra[2]
        };
        let boss = if difficulty <= 15 {
            base.boss
        } else {
            extra[((difficulty / 8) % 4) as usize]
        };
        EnemySet { walker, flyer, boss }
    }

    /// Non-colliding decoration sprites
    pub fn decorations(&self) -> &'static [&'static str] {
        match self {
            Theme::Nature => &[
                "Tree_1.png", "Tree_2.png", "Tree_3.png",
                "Bush__1_.png", "Bush__2_.png", "Bush__3_.png",
                "Mushroom_1.png", "Mushroom_2.png", "Mushroom_3.png",
                "Flower_1.png", "Flower_2.png", "Flower_3.png",
                "Stone.png", "Stone_2.png", "Crate.png", "Grass_1.png",
            ],
            Theme::Graveyard => &[
                "Tree.png", "Dead_Tree.png",
                "TombStone__1_.png", "TombStone__2_.png", "TombStone__3_.png",
                "DeadBush.png", "Bush__1_.png", "Bush__2_.png",
                "Crate.png", "Bone.png", "Skull.png", "Candle.png",
            ],
            Theme::Winter => &[
                "Tree_1.png", "Tree_2.png", "Tree_3.png",
                "SnowMan.png", "Stone.png", "IceBox.png",
                "Crystal.png", "Crystal_2.png", "Crate.png",
                "IcePillar.png", "Snowflake.png", "Bush__1_.png",
            ],
            Theme::Desert => &[
                "Cactus__1_.png", "Cactus__2_.png", "Cactus__3_.png",
                "Tree.png", "Dead_Tree.png",
                "Bush__1_.png", "Bush__2_.png",
                "Stone.png", "Stone_2.png", "Crate.png",
                "Skull.png", "Barrel.png", "Bone.png",
            ],
        }
    }
}

/// Enemy sprite types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyType {
    Bat1,
    Bat2,
    Bat3,
    Snail1,
    Snail2,
    Snail3,
    SpikeBee1,
    SpikeBee2,
    SpikeBee3,
    SpikeBee4,
    Tuca1,
    Tuca2,
    Tuca3,
}

/// Gameplay family shared by sprite variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyFamily {
    Bat,
    Snail,
    SpikeBee,
    Tuca,
}

/// Size and capabilities looked up per enemy type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub width: f32,
    pub height: f32,
    pub can_fly: bool,
    pub frame_count: u32,
}

impl EnemyType {
    pub fn family(&self) -> EnemyFamily {
        use EnemyType::*;
        match self {
            Bat1 | Bat2 | Bat3 => EnemyFamily::Bat,
            Snail1 | Snail2 | Snail3 => EnemyFamily::Snail,
            SpikeBee1 | SpikeBee2 | SpikeBee3 | SpikeBee4 => EnemyFamily::SpikeBee,
            Tuca1 | Tuca2 | Tuca3 => EnemyFamily::Tuca,
        }
    }

    pub fn profile(&self) -> EnemyProfile {
        match self.family() {
            EnemyFamily::Bat => EnemyProfile { width: 60.0, height: 60.0, can_fly: true, frame_count: 25 },
            EnemyFamily::Snail => EnemyProfile { width: 60.0, height: 60.0, can_fly: false, frame_count: 30 },
            // 140x117 sheet drawn at 80x67
            EnemyFamily::SpikeBee => EnemyProfile { width: 80.0, height: 67.0, can_fly: true, frame_count: 20 },
            // 140x112 sheet drawn at 80x64
            EnemyFamily::Tuca => EnemyProfile { width: 80.0, height: 64.0, can_fly: false, frame_count: 52 },
        }
    }
}

/// Walker / flyer / boss substitution triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySet {
    pub walker: EnemyType,
    pub flyer: EnemyType,
    pub boss: EnemyType,
}

impl EnemySet {
    pub const fn new(walker: EnemyType, flyer: EnemyType, boss: EnemyType) -> Self {
        Self { walker, flyer, boss }
    }
}

/// Difficulty whose script is used for out-of-table values
pub const DEFAULT_SEQUENCE_DIFFICULTY: u32 = 5;

/// Chunk script for an in-world difficulty
pub fn chunk_sequence(difficulty: u32) -> &'static [&'static str] {
    match difficulty {
        1 => &["open", "gap", "open", "climb"],
        2 => &["open", "gap", "climb", "enemies", "open"],
        3 => &["open", "gap", "enemies", "climb", "open", "gap"],
        4 => &["open", "gap", "climb", "enemies", "doubles", "spikes"],
        5 => &["open", "gap", "doubles", "enemies", "climb", "spikes", "open"],
        6 => &["open", "gap", "enemies", "climb", "doubles", "spikes", "breakables", "enemies"],
        7 => &["open", "gap", "doubles", "enemies", "tower", "spikes", "climb", "complex", "enemies"],
        8 => &["open", "gap", "tower", "enemies", "doubles", "spikes", "complex", "breakables", "climb", "boss"],
        9 => &[
            "open", "gap", "tower", "complex", "enemies", "doubles", "spikes", "boss", "breakables",
            "tunnel", "enemies", "climb",
        ],
        10 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "tower", "complex", "enemies", "boss", "gap", "spikes",
            "climb", "boss",
        ],
        11 => &["open", "gap", "enemies", "doubles", "climb", "tower", "spikes", "boss", "complex"],
        12 => &[
            "open", "gap", "doubles", "enemies", "tower", "spikes", "complex", "breakables", "climb",
            "boss", "gap", "enemies",
        ],
        13 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "spikes", "doubles", "breakables",
            "tunnel", "climb", "enemies", "gap",
        ],
        14 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "gap", "climb",
        ],
        15 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "tower", "gap", "complex", "spikes",
        ],
        16 => &[
            "open", "gap", "complex", "enemies", "boss", "doubles", "spikes", "tunnel", "breakables",
            "tower", "climb", "boss", "gap", "enemies", "complex", "boss",
        ],
        17 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "gap", "complex", "tower", "spikes", "climb", "boss",
        ],
        18 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "tower", "complex", "gap", "spikes", "climb", "boss",
            "enemies", "doubles",
        ],
        19 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "tower", "complex", "gap", "spikes", "climb", "boss",
            "enemies", "doubles", "boss", "complex",
        ],
        20 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "tower", "complex", "enemies", "boss", "gap", "spikes",
            "climb", "boss", "doubles", "complex", "boss", "enemies", "boss",
        ],
        21 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "tower", "complex", "gap", "boss", "doubles", "spikes",
            "climb", "boss", "enemies", "complex", "gap", "tower", "boss",
        ],
        22 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "tower", "complex", "gap", "spikes", "climb", "boss",
            "enemies", "doubles", "boss", "complex", "tunnel", "gap", "tower", "boss",
        ],
        23 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "tower", "complex", "gap", "spikes", "climb", "boss",
            "enemies", "doubles", "boss", "complex", "tunnel", "gap", "boss", "spikes", "enemies",
        ],
        24 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "tower", "complex", "gap", "spikes", "climb", "boss",
            "enemies", "doubles", "boss", "complex", "tunnel", "gap", "tower", "boss", "spikes",
            "enemies", "doubles",
        ],
        25 => &[
            "open", "gap", "tower", "complex", "enemies", "boss", "doubles", "spikes", "tunnel",
            "breakables", "enemies", "boss", "tower", "complex", "enemies", "boss", "gap", "spikes",
            "climb", "boss", "doubles", "complex", "boss", "enemies", "boss", "tunnel", "spikes",
            "complex", "boss", "doubles",
        ],
        _ => chunk_sequence(DEFAULT_SEQUENCE_DIFFICULTY),
    }
}
