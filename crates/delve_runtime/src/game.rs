//! World assembly for the roguelike

use crate::components::{GameComponent, GameKind, Position};
use crate::dungeon::Dungeon;
use crate::systems;
use delve_core::ecs::World;
use delve_core::time::SimulationTime;
use delve_services::{ScriptedInput, Settings};
use glam::IVec2;

/// Tiles revealed around the player, in each direction.
pub const SIGHT_RADIUS: i32 = 6;

/// Register every kind and system. The dungeon is spawned by the startup
/// pass, so nothing is in the world until `start()`.
pub fn build_world(settings: &Settings, dungeon: Dungeon, input: ScriptedInput) -> World<GameComponent> {
    let mut world = World::with_time(SimulationTime::with_tick_rate(
        settings.simulation.tick_rate_hz,
    ));
    for kind in GameKind::ALL {
        world.register(*kind);
    }

    world.register_startup_system(systems::spawn_dungeon(dungeon));
    world.register_startup_system(systems::reveal_around_player(SIGHT_RADIUS));

    world.register_update_system(systems::move_player(input));
    world.register_update_system(systems::reveal_around_player(SIGHT_RADIUS));
    world
}

/// Position of the first player found, if any.
pub fn player_position(world: &World<GameComponent>) -> Option<IVec2> {
    world
        .query(&[GameKind::Player, GameKind::Position])
        .first()
        .and_then(|result| result.component::<Position>())
        .map(|position| position.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::TileKind;
    use crate::render::AsciiFrame;
    use delve_core::ecs::Phase;
    use delve_services::DungeonSettings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dungeon(seed: u64) -> Dungeon {
        Dungeon::generate(&DungeonSettings::default(), &mut StdRng::seed_from_u64(seed))
    }

    fn started(seed: u64, script: &str) -> (World<GameComponent>, Dungeon) {
        let dungeon = dungeon(seed);
        let input = ScriptedInput::parse(script).unwrap();
        let mut world = build_world(&Settings::default(), dungeon.clone(), input);
        world.start().unwrap();
        (world, dungeon)
    }

    #[test]
    fn startup_spawns_every_tile_and_one_player() {
        let (world, dungeon) = started(1, ".");
        let cells = (dungeon.width() * dungeon.height()) as usize;

        assert_eq!(world.query(&[GameKind::Tile]).len(), cells);
        assert_eq!(world.query(&[GameKind::Player]).len(), 1);
        assert_eq!(world.entities().len(), cells + 1);
        assert_eq!(player_position(&world), Some(dungeon.player_start()));
        assert_eq!(
            world.system_names(Phase::Update),
            ["move_player", "reveal_around_player"]
        );
    }

    #[test]
    fn walls_block_and_floors_do_not() {
        let dungeon = dungeon(4);
        let start = dungeon.player_start();

        // Walk left until the map says the next step is a wall.
        let steps = (1..)
            .take_while(|n| dungeon.tile(start - IVec2::new(*n, 0)) == Some(TileKind::Floor))
            .count() as i32;
        let script = "h".repeat(steps as usize + 3);
        let (mut world, _) = started(4, &script);

        for _ in 0..steps + 3 {
            world.tick().unwrap();
        }
        assert_eq!(player_position(&world), Some(start - IVec2::new(steps, 0)));
    }

    #[test]
    fn moving_replaces_the_player_entity_in_place() {
        let (mut world, dungeon) = started(2, ".");
        let before = world.query(&[GameKind::Player])[0].entity();
        let entity_count = world.entities().len();
        let component_count = world.components().total_len();
        let start = dungeon.player_start();

        // Find any open neighbour and script a single step into it.
        let (key, step) = [('h', IVec2::NEG_X), ('l', IVec2::X), ('k', IVec2::NEG_Y), ('j', IVec2::Y)]
            .into_iter()
            .find(|(_, step)| dungeon.tile(start + *step) == Some(TileKind::Floor))
            .expect("start room has an open neighbour");
        let mut world_with_step = {
            let input = ScriptedInput::parse(&key.to_string()).unwrap();
            let mut world = build_world(&Settings::default(), dungeon.clone(), input);
            world.start().unwrap();
            world
        };
        world_with_step.tick().unwrap();
        let after = world_with_step.query(&[GameKind::Player])[0].entity();

        assert_eq!(before, after);
        assert_eq!(player_position(&world_with_step), Some(start + step));
        assert_eq!(world_with_step.entities().len(), entity_count);
        // Only the newly revealed tiles add components.
        let revealed_delta = world_with_step.query(&[GameKind::Revealed]).len()
            - world.query(&[GameKind::Revealed]).len();
        assert_eq!(
            world_with_step.components().total_len(),
            component_count + revealed_delta
        );

        world.tick().unwrap();
        assert_eq!(player_position(&world), Some(start));
    }

    #[test]
    fn revealing_is_idempotent_while_standing_still() {
        let (mut world, _) = started(6, ".");
        let revealed = world.components().len(GameKind::Revealed);
        assert!(revealed > 0);

        world.tick().unwrap();
        world.tick().unwrap();
        assert_eq!(world.components().len(GameKind::Revealed), revealed);
    }

    #[test]
    fn rendered_frame_shows_the_player() {
        let (world, dungeon) = started(9, ".");
        let frame = AsciiFrame::capture(&world, dungeon.width() as usize, dungeon.height() as usize);
        let start = dungeon.player_start();
        assert_eq!(frame.cell(start.x as usize, start.y as usize), '@');
    }
}
