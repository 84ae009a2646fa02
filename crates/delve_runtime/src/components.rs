//! Component set of the roguelike

use delve_core::define_components;
use glam::IVec2;

/// Grid cell an entity occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position(pub IVec2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Floor,
    Wall,
}

impl TileKind {
    pub fn glyph(self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
        }
    }
}

/// Map cell. Exactly one per grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub kind: TileKind,
}

/// What to draw for an entity. Higher layers cover lower ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub layer: u8,
}

impl Glyph {
    pub const TILE_LAYER: u8 = 0;
    pub const ACTOR_LAYER: u8 = 2;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Player;

/// Nothing may move onto this entity's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Blocker;

/// A tile the player has seen at least once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Revealed;

define_components! {
    pub enum GameComponent: GameKind {
        Position(Position),
        Tile(Tile),
        Glyph(Glyph),
        Player(Player),
        Blocker(Blocker),
        Revealed(Revealed),
    }
}
