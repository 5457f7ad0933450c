//! Library entry for integration tests & external tooling.
//! Exposes plugin modules and a prelude for common types.

pub mod plugins {
    pub mod config;
    pub mod events;
    pub mod core_sim;
    pub mod target_field;
    pub mod charge;
    pub mod ballistics;
    pub mod camera;
    pub mod scoreboard;
    pub mod input;
    pub mod scene;
    pub mod hud;
}
pub mod prelude;
