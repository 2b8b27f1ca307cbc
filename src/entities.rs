/// All game entity types.  Pure data, no logic.
///
/// Drawing is the renderer's job.  Every entity only carries a `Sprite` hint
/// telling the renderer which image to use.

// ── Render hints ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Enemy,
    Wall,
    Rock,
    DoorClosed,
    DoorOpen,
    Key,
    Damsel,
}

impl Sprite {
    /// Every sprite the renderer must have loaded before the first frame.
    pub const ALL: [Sprite; 8] = [
        Sprite::Key,
        Sprite::Wall,
        Sprite::DoorOpen,
        Sprite::DoorClosed,
        Sprite::Rock,
        Sprite::Enemy,
        Sprite::Player,
        Sprite::Damsel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Sprite::Player => "player",
            Sprite::Enemy => "enemy",
            Sprite::Wall => "wall",
            Sprite::Rock => "rock",
            Sprite::DoorClosed => "door-closed",
            Sprite::DoorOpen => "door-open",
            Sprite::Key => "key",
            Sprite::Damsel => "damsel",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Shared capability of everything the renderer can draw and the collision
/// predicate can test against.
pub trait Drawable {
    fn position(&self) -> Position;

    /// `None` for entities that only exist as collision boxes.
    fn sprite(&self) -> Option<Sprite>;
}

// ── Enumerations ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Wall,
    Rock,
    Water,
    Gate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Closed,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorStatus {
    On,
    Off,
}

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Running,
    Success,
    Failure,
}

impl GameStatus {
    /// The outcome behind an end state; `None` while in the menu or running.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GameStatus::Success => Some(Outcome::Success),
            GameStatus::Failure => Some(Outcome::Failure),
            GameStatus::Menu | GameStatus::Running => None,
        }
    }
}

impl From<Outcome> for GameStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => GameStatus::Success,
            Outcome::Failure => GameStatus::Failure,
        }
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub has_key: bool,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// Lane speed multiplier, one of 1, 2 or 3.
    pub speed: f32,
}

// ── Level furniture ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub kind: ObstacleKind,
    pub sprite: Option<Sprite>,
}

#[derive(Clone, Debug)]
pub struct Gate {
    pub x: f32,
    pub y: f32,
    pub state: GateState,
}

#[derive(Clone, Debug)]
pub struct Key {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug)]
pub struct Damsel {
    pub x: f32,
    pub y: f32,
}

/// HUD icon shown while the player carries the key.
#[derive(Clone, Debug)]
pub struct Indicator {
    pub x: f32,
    pub y: f32,
    pub status: IndicatorStatus,
}

impl Drawable for Player {
    fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }

    fn sprite(&self) -> Option<Sprite> {
        Some(Sprite::Player)
    }
}

impl Drawable for Enemy {
    fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }

    fn sprite(&self) -> Option<Sprite> {
        Some(Sprite::Enemy)
    }
}

impl Drawable for Obstacle {
    fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }

    fn sprite(&self) -> Option<Sprite> {
        self.sprite
    }
}

impl Drawable for Gate {
    fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }

    fn sprite(&self) -> Option<Sprite> {
        match self.state {
            GateState::Closed => Some(Sprite::DoorClosed),
            GateState::Open => Some(Sprite::DoorOpen),
        }
    }
}

impl Drawable for Key {
    fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }

    fn sprite(&self) -> Option<Sprite> {
        Some(Sprite::Key)
    }
}

impl Drawable for Damsel {
    fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }

    fn sprite(&self) -> Option<Sprite> {
        Some(Sprite::Damsel)
    }
}

impl Drawable for Indicator {
    fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }

    fn sprite(&self) -> Option<Sprite> {
        match self.status {
            IndicatorStatus::On => Some(Sprite::Key),
            IndicatorStatus::Off => None,
        }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything live in the current level.  Cloneable so the pure update
/// functions can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    /// Patrolling enemies, constant count for the whole level.
    pub enemies: Vec<Enemy>,
    /// Obstacles as drawn.
    pub obstacles: Vec<Obstacle>,
    /// Obstacles as tested for blocking; y is shifted per category.
    pub collision_boxes: Vec<Obstacle>,
    pub gate: Option<Gate>,
    pub key: Option<Key>,
    pub damsel: Damsel,
    pub indicator: Indicator,
}

impl World {
    /// A world holding only the singular entities; the level builder fills
    /// the collections.
    pub fn new(player: Player, damsel: Damsel, indicator: Indicator) -> Self {
        World {
            player,
            enemies: Vec::new(),
            obstacles: Vec::new(),
            collision_boxes: Vec::new(),
            gate: None,
            key: None,
            damsel,
            indicator,
        }
    }

    /// Board sprites to draw this frame, back to front.  The indicator is
    /// HUD, not board, and is read from `self.indicator` directly.
    pub fn render_list(&self) -> Vec<(Position, Sprite)> {
        let mut drawables: Vec<&dyn Drawable> = Vec::new();
        drawables.push(&self.damsel);
        drawables.extend(self.enemies.iter().map(|e| e as &dyn Drawable));
        drawables.extend(self.obstacles.iter().map(|o| o as &dyn Drawable));
        if let Some(gate) = &self.gate {
            drawables.push(gate);
        }
        drawables.push(&self.player);
        if let Some(key) = &self.key {
            drawables.push(key);
        }

        drawables
            .into_iter()
            .filter_map(|d| d.sprite().map(|sprite| (d.position(), sprite)))
            .collect()
    }
}
