#![forbid(unsafe_code)]

//! Core: gesture tracking, snap resolution, and spring settling for a
//! draggable bottom sheet.
//!
//! # Role in Snapsheet
//! `snapsheet-core` is the deterministic heart of the sheet. It owns no
//! clock, no renderer, and no platform hooks; callers feed it gesture
//! events and frame deltas and read back positions, visuals, and events.
//!
//! # Primary responsibilities
//! - **SheetController**: the drag / animate / rest state machine.
//! - **Geometry**: snap target computation from viewport and layout.
//! - **Gesture**: rubber-band resistance past the target range.
//! - **Snap**: release resolution by velocity, then proximity.
//! - **Animation**: spring physics with a bounded settle time.
//! - **Interpolate**: progress-driven visual channels.
//!
//! # How it fits in the system
//! The runtime (`snapsheet-runtime`) wraps a controller with a frame pacer,
//! policy loading, and the haptic/listener/renderer seams. Tests and benches
//! drive the controller directly with synthetic time.

pub mod animation;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod interpolate;
pub mod sheet;
pub mod snap;
pub mod state;

pub use animation::{AnimationDriver, Settle, Spring, SpringConfig};
pub use config::SheetConfig;
pub use error::{Result, SheetError};
pub use event::{GestureEvent, SheetEvent};
pub use geometry::{Insets, Orientation, SheetLayout, SnapTargets, Viewport, compute_targets};
pub use gesture::{GestureConfig, GestureSample, Release, rubber_band};
pub use interpolate::{Ramp, SheetVisuals, VisualChannel};
pub use sheet::SheetController;
pub use snap::{SnapDecision, SnapDirection, SnapPolicy, SnapRule, nearest_index};
pub use state::{ExpansionMachine, ExpansionState, Transition};
