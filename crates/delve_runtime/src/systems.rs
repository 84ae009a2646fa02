//! Gameplay systems
//!
//! Every system reads through `query` and writes through the command buffer;
//! none of them keeps references into the world between runs.

use crate::components::{
    Blocker, GameComponent, GameKind, Glyph, Player, Position, Revealed, Tile, TileKind,
};
use crate::dungeon::Dungeon;
use delve_core::ecs::{make_system, Commands, System};
use delve_services::{Action, ScriptedInput};
use glam::IVec2;
use std::collections::HashSet;

pub type GameSystem = System<GameComponent>;

/// Startup: one entity per map cell, then the player.
pub fn spawn_dungeon(dungeon: Dungeon) -> GameSystem {
    make_system("spawn_dungeon", dungeon, |dungeon, commands| {
        for (pos, kind) in dungeon.tiles() {
            let mut components: Vec<GameComponent> = vec![
                Position(pos).into(),
                Tile { kind }.into(),
                Glyph {
                    ch: kind.glyph(),
                    layer: Glyph::TILE_LAYER,
                }
                .into(),
            ];
            if kind == TileKind::Wall {
                components.push(Blocker.into());
            }
            commands.spawn(components)?;
        }

        let start = dungeon.player_start();
        let player = commands.spawn([
            GameComponent::from(Position(start)),
            GameComponent::from(Glyph {
                ch: '@',
                layer: Glyph::ACTOR_LAYER,
            }),
            GameComponent::from(Player),
        ])?;
        tracing::info!(%player, x = start.x, y = start.y, "player spawned");
        Ok(())
    })
}

/// Update: apply the next scripted action to every player.
///
/// A move is applied by replacing the whole player entity: it is removed and
/// re-added under the same id with the new position. Moves into a
/// [`Blocker`] are ignored.
pub fn move_player(input: ScriptedInput) -> GameSystem {
    make_system("move_player", input, |input, commands| {
        let Action::Move { dx, dy } = input.next_action() else {
            return Ok(());
        };
        let blocked = occupied_by(commands, GameKind::Blocker);

        for player in commands.query(&[GameKind::Player, GameKind::Position, GameKind::Glyph]) {
            let Some(&Position(from)) = player.component::<Position>() else {
                continue;
            };
            let to = from + IVec2::new(dx, dy);
            if blocked.contains(&to) {
                tracing::debug!(entity = %player.entity(), %to, "move blocked");
                continue;
            }

            let entity = player.entity();
            let mut components = player.into_components();
            components.insert(GameKind::Position, Position(to).into());
            commands.remove_entity(entity);
            commands.add_entity(entity, components.into_values())?;
            tracing::debug!(%entity, %from, %to, "player moved");
        }
        Ok(())
    })
}

/// Startup and update: mark tiles within `radius` (Chebyshev) of a player as
/// revealed. Marking an already revealed tile is a no-op.
pub fn reveal_around_player(radius: i32) -> GameSystem {
    make_system("reveal_around_player", radius, |radius, commands| {
        let players = occupied_by(commands, GameKind::Player);
        if players.is_empty() {
            return Ok(());
        }

        for tile in commands.query(&[GameKind::Tile, GameKind::Position]) {
            let Some(&Position(pos)) = tile.component::<Position>() else {
                continue;
            };
            let seen = players
                .iter()
                .any(|player| (*player - pos).abs().max_element() <= *radius);
            if seen {
                commands.add_component(tile.entity(), Revealed)?;
            }
        }
        Ok(())
    })
}

/// Positions of every entity that owns `kind`.
fn occupied_by(commands: &Commands<'_, GameComponent>, kind: GameKind) -> HashSet<IVec2> {
    commands
        .query(&[kind, GameKind::Position])
        .iter()
        .filter_map(|result| result.component::<Position>())
        .map(|position| position.0)
        .collect()
}
