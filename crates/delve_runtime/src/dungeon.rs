//! Room-and-corridor dungeon generation
//!
//! Runs once, before the world starts. The result is plain data; the
//! `spawn_dungeon` startup system turns it into entities.

use crate::components::TileKind;
use delve_services::DungeonSettings;
use glam::IVec2;
use rand::Rng;

/// Placement attempts before giving up on reaching the dug target.
const MAX_ROOM_ATTEMPTS: usize = 2_000;

/// Axis-aligned room, `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub min: IVec2,
    pub max: IVec2,
}

impl Room {
    pub fn center(&self) -> IVec2 {
        (self.min + self.max) / 2
    }

    /// Whether the rooms touch or overlap, counting a one-tile wall between them.
    fn crowds(&self, other: &Room) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

#[derive(Debug, Clone)]
pub struct Dungeon {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
    rooms: Vec<Room>,
}

impl Dungeon {
    /// Carve rooms joined by L-shaped corridors until `dug_percentage` of the
    /// interior is floor or placement attempts run out.
    ///
    /// `settings` must have passed [`DungeonSettings::validate`].
    pub fn generate(settings: &DungeonSettings, rng: &mut impl Rng) -> Self {
        let width = settings.width as i32;
        let height = settings.height as i32;
        let mut dungeon = Self {
            width,
            height,
            tiles: vec![TileKind::Wall; (width * height) as usize],
            rooms: Vec::new(),
        };

        let interior = ((width - 2) * (height - 2)) as f32;
        let target = (interior * settings.dug_percentage).ceil() as usize;
        let [min_w, max_w] = settings.room_width.map(|v| v as i32);
        let [min_h, max_h] = settings.room_height.map(|v| v as i32);

        let mut attempts = 0;
        while dungeon.floor_count() < target && attempts < MAX_ROOM_ATTEMPTS {
            attempts += 1;
            let size = IVec2::new(rng.gen_range(min_w..=max_w), rng.gen_range(min_h..=max_h));
            let min = IVec2::new(
                rng.gen_range(1..=width - 1 - size.x),
                rng.gen_range(1..=height - 1 - size.y),
            );
            let room = Room {
                min,
                max: min + size,
            };
            if dungeon.rooms.iter().any(|existing| existing.crowds(&room)) {
                continue;
            }

            dungeon.carve_room(&room);
            if let Some(previous) = dungeon.rooms.last().copied() {
                dungeon.carve_corridor(previous.center(), room.center(), rng.gen());
            }
            dungeon.rooms.push(room);
        }

        tracing::debug!(
            rooms = dungeon.rooms.len(),
            floor = dungeon.floor_count(),
            target,
            attempts,
            "generated dungeon"
        );
        dungeon
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Tile at `pos`, `None` outside the map.
    #[cfg(test)]
    pub fn tile(&self, pos: IVec2) -> Option<TileKind> {
        self.index(pos).map(|index| self.tiles[index])
    }

    /// Every cell with its tile, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (IVec2, TileKind)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, kind)| {
                let index = index as i32;
                (IVec2::new(index % width, index / width), *kind)
            })
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|&&kind| kind == TileKind::Floor).count()
    }

    /// Center of the first room; the player starts here.
    pub fn player_start(&self) -> IVec2 {
        self.rooms
            .first()
            .map(Room::center)
            .unwrap_or(IVec2::new(self.width / 2, self.height / 2))
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        let inside = pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height;
        inside.then(|| (pos.y * self.width + pos.x) as usize)
    }

    fn dig(&mut self, pos: IVec2) {
        // Keep the outer ring solid.
        if pos.x <= 0 || pos.y <= 0 || pos.x >= self.width - 1 || pos.y >= self.height - 1 {
            return;
        }
        if let Some(index) = self.index(pos) {
            self.tiles[index] = TileKind::Floor;
        }
    }

    fn carve_room(&mut self, room: &Room) {
        for y in room.min.y..room.max.y {
            for x in room.min.x..room.max.x {
                self.dig(IVec2::new(x, y));
            }
        }
    }

    fn carve_corridor(&mut self, from: IVec2, to: IVec2, horizontal_first: bool) {
        let corner = if horizontal_first {
            IVec2::new(to.x, from.y)
        } else {
            IVec2::new(from.x, to.y)
        };
        self.carve_line(from, corner);
        self.carve_line(corner, to);
    }

    /// Straight axis-aligned run, both ends included.
    fn carve_line(&mut self, from: IVec2, to: IVec2) {
        let step = (to - from).signum();
        let mut cursor = from;
        self.dig(cursor);
        while cursor != to {
            cursor += step;
            self.dig(cursor);
        }
    }
}
