/// Level construction.
///
/// The layout is a fixed frame (walls, gate, water trench, damsel) plus random
/// rocks, one key and the enemy patrol.  Each step takes the world being
/// built and hands it back, so `build_world` reads as the startup sequence.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{GameConfig, KeyPlacement};
use crate::entities::{
    Damsel, Enemy, Gate, GateState, Indicator, IndicatorStatus, Key, Obstacle, ObstacleKind,
    Player, Sprite, World,
};
use crate::grid::{column_x, lane_y, COLUMNS, ENEMY_SPAWN_X, LANE_COUNT};

// ── Fixed layout ─────────────────────────────────────────────────────────────

pub const PLAYER_SPAWN_X: f32 = 303.0;
pub const PLAYER_SPAWN_Y: f32 = 456.0;
pub const DAMSEL_X: f32 = 303.0;
pub const DAMSEL_Y: f32 = -30.0;
pub const INDICATOR_X: f32 = -5.0;
pub const INDICATOR_Y: f32 = -20.0;

pub const WALL_Y: f32 = 83.0;
pub const GATE_X: f32 = 303.0;
/// Wall and gate sprites sit lower than the row their collision box blocks.
pub const WALL_COLLISION_OFFSET: f32 = -32.0;
pub const TRENCH_Y: f32 = -30.0;

/// Columns either side of the gate: a wall segment each, and a water box in
/// the top row.
const FLANK_COLUMNS: [u32; 6] = [0, 1, 2, 4, 5, 6];

// ── Random draws ──────────────────────────────────────────────────────────────

/// One of the three enemy lanes.
pub fn random_lane(rng: &mut impl Rng) -> f32 {
    lane_y(rng.gen_range(0..LANE_COUNT))
}

/// Enemy speed multiplier in {1, 2, 3}.
pub fn random_speed(rng: &mut impl Rng) -> f32 {
    rng.gen_range(1..=3u32) as f32
}

pub fn random_column(rng: &mut impl Rng) -> f32 {
    column_x(rng.gen_range(0..COLUMNS as u32))
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Build a fresh level.  Used both at first start and on every reset.
///
/// `rock_count` is capped at `GameConfig::MAX_ROCKS` so an unvalidated
/// config still leaves a column free for the key.
pub fn build_world(config: &GameConfig, rng: &mut impl Rng) -> World {
    info!("level_build_started");

    let rock_count = config.rock_count.min(GameConfig::MAX_ROCKS);
    if rock_count < config.rock_count {
        warn!(requested = config.rock_count, placed = rock_count, "rock_count_capped");
    }

    let world = create_actors();
    let world = build_wall(world);
    let world = place_rocks(world, rock_count, rng);
    let world = fill_trench(world);
    let world = drop_key(world, config.key_placement, rng);
    let world = release_enemies(world, config.enemy_count, rng);

    info!(
        enemies = world.enemies.len(),
        obstacles = world.obstacles.len(),
        collision_boxes = world.collision_boxes.len(),
        "level_built"
    );
    world
}

// ── Steps ─────────────────────────────────────────────────────────────────────

/// Player, damsel and the key indicator.
pub fn create_actors() -> World {
    info!("creating_actors");
    World::new(
        Player {
            x: PLAYER_SPAWN_X,
            y: PLAYER_SPAWN_Y,
            has_key: false,
        },
        Damsel {
            x: DAMSEL_X,
            y: DAMSEL_Y,
        },
        Indicator {
            x: INDICATOR_X,
            y: INDICATOR_Y,
            status: IndicatorStatus::Off,
        },
    )
}

/// Three wall segments either side of a closed gate.
pub fn build_wall(mut world: World) -> World {
    info!("building_walls");
    for &col in &FLANK_COLUMNS[..3] {
        push_obstacle(
            &mut world,
            ObstacleKind::Wall,
            column_x(col),
            WALL_Y,
            Some(Sprite::Wall),
            WALL_COLLISION_OFFSET,
        );
    }
    world.gate = Some(Gate {
        x: GATE_X,
        y: WALL_Y,
        state: GateState::Closed,
    });
    world.collision_boxes.push(Obstacle {
        x: GATE_X,
        y: WALL_Y + WALL_COLLISION_OFFSET,
        kind: ObstacleKind::Gate,
        sprite: None,
    });
    for &col in &FLANK_COLUMNS[3..] {
        push_obstacle(
            &mut world,
            ObstacleKind::Wall,
            column_x(col),
            WALL_Y,
            Some(Sprite::Wall),
            WALL_COLLISION_OFFSET,
        );
    }
    world
}

/// Rocks land on a random column of a random lane; two rocks may share a cell.
pub fn place_rocks(mut world: World, count: usize, rng: &mut impl Rng) -> World {
    for _ in 0..count {
        let x = random_column(rng);
        let y = random_lane(rng);
        push_obstacle(&mut world, ObstacleKind::Rock, x, y, Some(Sprite::Rock), 0.0);
    }
    info!(rocks = count, "rocks_placed");
    world
}

/// Water boxes along the top row.  They carry no sprite; the background
/// already draws the water.
pub fn fill_trench(mut world: World) -> World {
    info!("filling_trench");
    for &col in &FLANK_COLUMNS {
        push_obstacle(&mut world, ObstacleKind::Water, column_x(col), TRENCH_Y, None, 0.0);
    }
    world
}

/// Drop the key on a lane, re-rolling its column while `policy` says a rock
/// is in the way.  A lane with no free column is swapped for one that has
/// one; when no lane does, the level gets no key.
pub fn drop_key(mut world: World, policy: KeyPlacement, rng: &mut impl Rng) -> World {
    let rocks: Vec<(f32, f32)> = world
        .collision_boxes
        .iter()
        .filter(|o| o.kind == ObstacleKind::Rock)
        .map(|o| (o.x, o.y))
        .collect();

    let open_lanes: Vec<f32> = (0..LANE_COUNT)
        .map(lane_y)
        .filter(|&y| lane_has_room(policy, y, &rocks))
        .collect();
    if open_lanes.is_empty() {
        warn!(rocks = rocks.len(), "key_placement_impossible");
        return world;
    }

    let mut y = random_lane(rng);
    if !open_lanes.contains(&y) {
        y = open_lanes[rng.gen_range(0..open_lanes.len())];
    }
    let mut x = random_column(rng);
    while !key_spot_is_free(policy, x, y, &rocks) {
        debug!(x, y, "key_placement_rejected");
        x = random_column(rng);
    }

    info!(x, y, "key_dropped");
    world.key = Some(Key { x, y });
    world
}

/// Whether the key may be dropped at `(x, y)` given the rock positions.
pub fn key_spot_is_free(policy: KeyPlacement, x: f32, y: f32, rocks: &[(f32, f32)]) -> bool {
    match policy {
        KeyPlacement::Loose => {
            let x_taken = rocks.iter().any(|&(rx, _)| rx == x);
            let y_taken = rocks.iter().any(|&(_, ry)| ry == y);
            !(x_taken && y_taken)
        }
        KeyPlacement::Exact => !rocks.iter().any(|&(rx, ry)| rx == x && ry == y),
    }
}

fn lane_has_room(policy: KeyPlacement, y: f32, rocks: &[(f32, f32)]) -> bool {
    (0..COLUMNS as u32).any(|col| key_spot_is_free(policy, column_x(col), y, rocks))
}

/// Enemies start just off the left edge on a random lane.
pub fn release_enemies(mut world: World, count: usize, rng: &mut impl Rng) -> World {
    for _ in 0..count {
        let y = random_lane(rng);
        let speed = random_speed(rng);
        world.enemies.push(Enemy {
            x: ENEMY_SPAWN_X,
            y,
            speed,
        });
    }
    info!(enemies = count, "enemies_released");
    world
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Paired insert into the render list and the collision list.
fn push_obstacle(
    world: &mut World,
    kind: ObstacleKind,
    x: f32,
    y: f32,
    sprite: Option<Sprite>,
    collision_offset: f32,
) {
    world.obstacles.push(Obstacle { x, y, kind, sprite });
    world.collision_boxes.push(Obstacle {
        x,
        y: y + collision_offset,
        kind,
        sprite: None,
    });
}
