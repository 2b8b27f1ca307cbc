//! The game state machine.
//!
//! `Menu → Running → {Success, Failure} → Running → …`
//!
//! Confirm input is only honoured through a one-shot prompt: arming a prompt
//! subscribes to the next Confirm, and the first Confirm consumes it.  Extra
//! presses land on an empty slot and are dropped.

use rand::Rng;
use tracing::{debug, info};

use crate::compute::{move_player, tick};
use crate::config::GameConfig;
use crate::entities::{GameStatus, Outcome, World};
use crate::input::Command;
use crate::level::build_world;

/// Which confirmatory prompt is waiting for Enter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    Start,
    Restart,
}

/// Round counters for the current process; never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub rounds: u32,
    pub successes: u32,
    pub failures: u32,
}

/// What the renderer should put on screen this frame.
#[derive(Debug)]
pub enum Screen<'a> {
    Menu,
    World(&'a World),
    Ended {
        outcome: Outcome,
        stats: SessionStats,
    },
}

pub struct Game<R: Rng> {
    config: GameConfig,
    rng: R,
    status: GameStatus,
    world: Option<World>,
    prompt: Option<Prompt>,
    /// Set on the frame a round ends; the end screen replaces the world on
    /// the following frame, once the final frame has been drawn.
    end_screen_pending: bool,
    stats: SessionStats,
}

impl<R: Rng> Game<R> {
    /// A new game sits in the menu with the start prompt armed.
    pub fn new(config: GameConfig, rng: R) -> Self {
        info!("menu_shown");
        Self {
            config,
            rng,
            status: GameStatus::Menu,
            world: None,
            prompt: Some(Prompt::Start),
            end_screen_pending: false,
            stats: SessionStats::default(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Direct access to the live world, for scripted setups.
    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    /// The prompt currently subscribed to Confirm, if any.
    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Apply one input command immediately.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Confirm => self.confirm(),
            Command::Move(direction) => {
                if self.status != GameStatus::Running {
                    return;
                }
                if let Some(world) = &self.world {
                    self.world = Some(move_player(world, direction));
                }
            }
        }
    }

    /// One scheduler callback: resolve a pending end screen, or run one tick
    /// while the round is live.
    pub fn frame(&mut self, dt: f32) {
        if self.end_screen_pending {
            self.end_screen_pending = false;
            self.prompt = Some(Prompt::Restart);
            info!(status = ?self.status, "end_screen_shown");
            return;
        }
        if self.status != GameStatus::Running {
            return;
        }
        let Some(world) = &self.world else {
            return;
        };

        let (next, outcome) = tick(world, dt, &mut self.rng);
        self.world = Some(next);
        if let Some(outcome) = outcome {
            self.finish(outcome);
        }
    }

    pub fn screen(&self) -> Screen<'_> {
        match (self.status.outcome(), &self.world) {
            (_, None) => Screen::Menu,
            (None, Some(world)) => Screen::World(world),
            (Some(_), Some(world)) if self.end_screen_pending => Screen::World(world),
            (Some(outcome), Some(_)) => Screen::Ended {
                outcome,
                stats: self.stats,
            },
        }
    }

    fn confirm(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            debug!(status = ?self.status, "confirm_ignored");
            return;
        };
        match prompt {
            Prompt::Start => info!("game_started"),
            Prompt::Restart => info!("game_reset"),
        }
        self.start_round();
    }

    /// Throw away the old world, if any, and build a fresh level.
    fn start_round(&mut self) {
        self.world = Some(build_world(&self.config, &mut self.rng));
        self.status = GameStatus::Running;
        self.stats.rounds += 1;
    }

    fn finish(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.stats.successes += 1,
            Outcome::Failure => self.stats.failures += 1,
        }
        self.status = outcome.into();
        self.end_screen_pending = true;
        info!(?outcome, "round_over");
    }
}
