//! Match state: health, timers, and the run's outcome
//!
//! The one shared mutable state every system reports into, replacing the
//! original's scene-wide manager object. Nothing here escalates errors;
//! state changes that cannot apply (damage while invincible, anything
//! after the run ends) are ignored, matching the source's leniency.

use crate::config::RulesConfig;

/// Why a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    /// Health reached zero
    OutOfHealth,
    /// The match timer ran out
    TimeUp,
}

/// Current result of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The run is still in progress
    Running,
    /// The player reached the exit door
    Won,
    /// The run ended in defeat
    Lost(LossReason),
}

/// Health, invincibility, and the match clock
pub struct GameState {
    health: u32,
    max_health: u32,
    invincibility_duration: f32,
    invincibility_remaining: f32,
    time_remaining: f32,
    outcome: Outcome,
}

impl GameState {
    /// Start a fresh run
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            health: rules.max_health,
            max_health: rules.max_health,
            invincibility_duration: rules.invincibility_duration,
            invincibility_remaining: 0.0,
            time_remaining: rules.game_duration,
            outcome: Outcome::Running,
        }
    }

    /// Advance the match clock and invincibility timer
    pub fn tick(&mut self, dt: f32) {
        if self.outcome != Outcome::Running {
            return;
        }
        self.invincibility_remaining = (self.invincibility_remaining - dt).max(0.0);
        self.time_remaining -= dt;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.outcome = Outcome::Lost(LossReason::TimeUp);
            log::info!("time's up");
        }
    }

    /// Apply damage; ignored while invincible or after the run ended
    pub fn take_damage(&mut self, amount: u32) {
        if self.outcome != Outcome::Running || self.is_invincible() {
            return;
        }
        self.health = self.health.saturating_sub(amount);
        log::info!("player hit, health {}/{}", self.health, self.max_health);
        if self.health == 0 {
            self.outcome = Outcome::Lost(LossReason::OutOfHealth);
            log::info!("player died");
        }
    }

    /// Restore health, clamped to the maximum
    pub fn heal(&mut self, amount: u32) {
        if self.outcome != Outcome::Running {
            return;
        }
        self.health = (self.health + amount).min(self.max_health);
        log::info!("player healed, health {}/{}", self.health, self.max_health);
    }

    /// Start the invincibility window; ignored if one is already active
    pub fn grant_invincibility(&mut self) {
        if self.outcome != Outcome::Running || self.is_invincible() {
            return;
        }
        self.invincibility_remaining = self.invincibility_duration;
        log::info!("invincibility for {:.1}s", self.invincibility_duration);
    }

    /// The player reached the exit door
    pub fn reach_exit(&mut self) {
        if self.outcome != Outcome::Running {
            return;
        }
        self.outcome = Outcome::Won;
        log::info!("player reached the exit door");
    }

    /// Whether the run is still in progress
    pub fn is_running(&self) -> bool {
        self.outcome == Outcome::Running
    }

    /// Whether contact damage is currently suppressed
    pub fn is_invincible(&self) -> bool {
        self.invincibility_remaining > 0.0
    }

    /// Current health
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Seconds left on the match clock
    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Current result of the run
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}
