//! Pebble Level - declarative level descriptors and world assembly
//!
//! A level file is JSON: world size, boundary settings, entity and trigger
//! descriptors. Loading is all-or-nothing; the assembler turns a parsed
//! file into live entities (boundary kill-boxes included), and the exporter
//! re-derives a level file from the live world.

pub mod assembler;
pub mod format;
pub mod saver;

pub use assembler::{assemble, AssembledLevel};
pub use format::{BoundarySettings, EntityDef, EntityKind, LevelFile, Overrides, TriggerDef, WorldSize};
pub use saver::export_level;
