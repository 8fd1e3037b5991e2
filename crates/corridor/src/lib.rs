//! # Corridor
//!
//! An endless corridor runner built on the `runner_engine` collision core.
//! The player auto-runs down a flat corridor past patrolling enemies,
//! deadly and harmless obstacles, and power-up pickups, trying to reach
//! the exit door before the clock or their health runs out.
//!
//! All collision state lives in one [`runner_engine::CollisionRegistry`]
//! owned by the frame loop; each entity type is a data-oriented system
//! over its own arena of structs. Rendering, input, and UI are host
//! concerns — systems expose world matrices, nothing here draws.

pub mod config;
pub mod game;
pub mod stage;
pub mod systems;
