//! Configuration for the `build` command.
//!
//! Values are resolved in priority order: dedicated CLI flags, `-S key=value`
//! settings, the TOML file, then [`defaults::DefaultsConfig`].

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
