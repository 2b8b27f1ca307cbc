/// Collision, movement and tick resolution.
///
/// Contacts are cell-snapped on x and exact on y.  A move is tested against
/// the collision boxes before it lands, and a tick moves the enemies first
/// and then settles what the player touches: hazards, key, gate, damsel.

use rand::Rng;
use tracing::{debug, info};

use crate::entities::{
    Direction, Drawable, Enemy, GateState, Indicator, IndicatorStatus, ObstacleKind, Outcome,
    Player, World,
};
use crate::grid::{
    cell_of, clamp, CELL_WIDTH, ENEMY_SPAWN_X, ENEMY_WRAP_X, MAX_X, MAX_Y, MIN_X, MIN_Y, ROW_STEP,
};
use crate::level::{random_lane, random_speed};

/// Enemy travel per second at speed 1.
pub const ENEMY_PIXELS_PER_SECOND: f32 = 150.0;
/// Shifts an enemy's x so its column matches the bug's visible body.
pub const ENEMY_HITBOX_OFFSET: f32 = 40.0;
/// The gate is drawn this far above the row the player reaches it from.
pub const GATE_REACH_OFFSET: f32 = 49.0;

// ── Collision ────────────────────────────────────────────────────────────────

/// True when some entity in `list` shares a column with `test_x` and sits on
/// exactly `test_y`.  `x_offset` is added to the entity's x before snapping.
pub fn collides<T: Drawable>(list: &[T], test_x: f32, test_y: f32, x_offset: f32) -> bool {
    let column = cell_of(test_x);
    list.iter().any(|entity| {
        let pos = entity.position();
        column == cell_of(pos.x + x_offset) && test_y == pos.y
    })
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

fn step(direction: Direction) -> (f32, f32) {
    match direction {
        Direction::Up => (0.0, -ROW_STEP),
        Direction::Down => (0.0, ROW_STEP),
        Direction::Left => (-CELL_WIDTH, 0.0),
        Direction::Right => (CELL_WIDTH, 0.0),
    }
}

/// Move the player one cell.  The target is tested before committing, so a
/// blocked move leaves the player exactly where it was.
pub fn move_player(world: &World, direction: Direction) -> World {
    let (dx, dy) = step(direction);
    let target_x = world.player.x + dx;
    let target_y = world.player.y + dy;

    if collides(&world.collision_boxes, target_x, target_y, 0.0) {
        debug!(?direction, x = target_x, y = target_y, "move_blocked");
        return world.clone();
    }

    World {
        player: Player {
            x: clamp(target_x, MIN_X, MAX_X),
            y: clamp(target_y, MIN_Y, MAX_Y),
            ..world.player.clone()
        },
        ..world.clone()
    }
}

// ── Per-frame tick (RNG is injected) ────────────────────────────────────────

/// Advance the simulation by `dt` seconds and report how the round ended, if
/// it did.
pub fn tick(world: &World, dt: f32, rng: &mut impl Rng) -> (World, Option<Outcome>) {
    let advanced = advance_enemies(world, dt, rng);
    resolve_contacts(&advanced)
}

/// Move every enemy along its lane.  An enemy that runs off the right edge
/// re-enters from the left on a fresh lane with a fresh speed.
pub fn advance_enemies(world: &World, dt: f32, rng: &mut impl Rng) -> World {
    let enemies: Vec<Enemy> = world
        .enemies
        .iter()
        .map(|e| {
            let x = e.x + e.speed * dt * ENEMY_PIXELS_PER_SECOND;
            if x > ENEMY_WRAP_X {
                Enemy {
                    x: ENEMY_SPAWN_X,
                    y: random_lane(rng),
                    speed: random_speed(rng),
                }
            } else {
                Enemy { x, ..e.clone() }
            }
        })
        .collect();

    World {
        enemies,
        ..world.clone()
    }
}

/// Apply whatever the player is touching, in order: hazards, key, gate,
/// damsel.  Stops at the first contact that ends the round.
pub fn resolve_contacts(world: &World) -> (World, Option<Outcome>) {
    let (px, py) = (world.player.x, world.player.y);

    if collides(&world.collision_boxes, px, py, 0.0)
        || collides(&world.enemies, px, py, ENEMY_HITBOX_OFFSET)
    {
        info!(x = px, y = py, "player_hit");
        return (world.clone(), Some(Outcome::Failure));
    }

    let mut world = world.clone();

    if collides(world.key.as_slice(), px, py, 0.0) {
        world = collect_key(&world);
    }

    if world.player.has_key && collides(world.gate.as_slice(), px, py - GATE_REACH_OFFSET, 0.0) {
        world = open_gate(&world);
    }

    if collides(std::slice::from_ref(&world.damsel), px, py, 0.0) {
        info!("damsel_rescued");
        return (world, Some(Outcome::Success));
    }

    (world, None)
}

/// Take the key off the board and hand it to the player.
pub fn collect_key(world: &World) -> World {
    info!("key_collected");
    World {
        key: None,
        player: Player {
            has_key: true,
            ..world.player.clone()
        },
        indicator: Indicator {
            status: IndicatorStatus::On,
            ..world.indicator.clone()
        },
        ..world.clone()
    }
}

/// Spend the key on the gate: drop its collision box and show it open.
/// Calling this on an already open gate changes nothing further.
pub fn open_gate(world: &World) -> World {
    let collision_boxes: Vec<_> = world
        .collision_boxes
        .iter()
        .filter(|o| o.kind != ObstacleKind::Gate)
        .cloned()
        .collect();
    let removed = world.collision_boxes.len() - collision_boxes.len();

    let gate = world.gate.clone().map(|mut gate| {
        gate.state = GateState::Open;
        gate
    });

    info!(removed, "gate_opened");
    World {
        collision_boxes,
        gate,
        player: Player {
            has_key: false,
            ..world.player.clone()
        },
        indicator: Indicator {
            status: IndicatorStatus::Off,
            ..world.indicator.clone()
        },
        ..world.clone()
    }
}
