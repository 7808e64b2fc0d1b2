#![forbid(unsafe_code)]

//! Runtime: host loop, frame pacing, collaborator seams, and policy loading.
//!
//! # Role in Snapsheet
//! `snapsheet-runtime` wraps a [`snapsheet_core::SheetController`] with the
//! pieces an app embeds: a [`SheetHost`] that turns controller events into
//! haptic pulses and listener callbacks, a [`FramePacer`] that caps frame
//! deltas, and [`SheetPolicy`] for loading tuning from TOML or JSON.
//!
//! # Feature flags
//! - `subscriber` (default): [`logging::init`] with an `EnvFilter`.
//! - `tracing-json`: [`logging::init_json`] for JSON-lines output.
//! - `policy-config`: TOML/JSON loading for [`SheetPolicy`].

pub mod config;
pub mod error;
pub mod frame;
pub mod host;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod pacer;

pub use config::{DetailPolicy, FramePolicy, LayoutPolicy, SheetPolicy};
pub use error::ConfigError;
pub use frame::FrameOutput;
pub use host::{HapticFeedback, SheetHost, SheetListener, SheetRenderer};
pub use pacer::{DEFAULT_MAX_FRAME, FramePacer};

pub use snapsheet_core;
