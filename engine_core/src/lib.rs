//! Phi: a small view-switching game loop core.
//!
//! A single-threaded loop paces frames with [`clock::FrameClock`], snapshots
//! keyboard input into a [`Context`], and hands the context to the one active
//! [`View`]. The view answers with a [`ViewAction`]: keep going, stop, or
//! replace itself with another view. The context also carries a
//! load-once [`cache::ResourceCache`] shared by all views.

pub mod cache;
pub mod clock;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod game_loop;
pub mod input;
pub mod log;
pub mod machine;
pub mod signals;
pub mod surface;
pub mod telemetry;
pub mod view;

pub use config::EngineConfig;
pub use context::Context;
pub use engine::{run, Engine};
pub use error::{EngineError, LoadError};
pub use input::{InputSnapshot, Key};
pub use view::{QuitResponse, View, ViewAction};
