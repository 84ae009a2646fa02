//! ASCII renderer
//!
//! Reads the world only through queries. Map tiles are drawn once revealed;
//! every other drawable entity is always drawn.

use crate::components::{GameComponent, GameKind, Glyph, Position};
use delve_core::ecs::{Entity, World};
use std::collections::HashSet;
use std::fmt;

const BLANK: char = ' ';

/// A character grid captured from the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiFrame {
    width: usize,
    height: usize,
    cells: Vec<Option<Glyph>>,
}

impl AsciiFrame {
    pub fn capture(world: &World<GameComponent>, width: usize, height: usize) -> Self {
        let mut frame = Self {
            width,
            height,
            cells: vec![None; width * height],
        };

        let tiles = entities_with(world, GameKind::Tile);
        let revealed = entities_with(world, GameKind::Revealed);

        for drawable in world.query(&[GameKind::Position, GameKind::Glyph]) {
            let entity = drawable.entity();
            if tiles.contains(&entity) && !revealed.contains(&entity) {
                continue;
            }
            let (Some(position), Some(glyph)) = (
                drawable.component::<Position>(),
                drawable.component::<Glyph>(),
            ) else {
                continue;
            };
            frame.plot(position, *glyph);
        }
        frame
    }

    fn plot(&mut self, Position(pos): &Position, glyph: Glyph) {
        let (Ok(x), Ok(y)) = (usize::try_from(pos.x), usize::try_from(pos.y)) else {
            return;
        };
        if x >= self.width || y >= self.height {
            return;
        }
        let cell = &mut self.cells[y * self.width + x];
        if cell.map_or(true, |current| glyph.layer >= current.layer) {
            *cell = Some(glyph);
        }
    }

    /// Character at `(x, y)`; blank if nothing is drawn there.
    pub fn cell(&self, x: usize, y: usize) -> char {
        if x >= self.width || y >= self.height {
            return BLANK;
        }
        self.cells[y * self.width + x].map_or(BLANK, |glyph| glyph.ch)
    }

    /// Number of cells with something drawn in them.
    pub fn drawn(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl fmt::Display for AsciiFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row: String = (0..self.width).map(|x| self.cell(x, y)).collect();
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}

fn entities_with(world: &World<GameComponent>, kind: GameKind) -> HashSet<Entity> {
    world
        .query(&[kind])
        .iter()
        .map(|result| result.entity())
        .collect()
}
