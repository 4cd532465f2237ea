//! Aerohud Core
//!
//! Platform-independent projection and symbology layout for aviation
//! head-up displays. Given an orientation snapshot (from an AHRS) and a
//! traffic snapshot (from ADS-B), it produces the ordered list of polygons,
//! lines, arcs and text anchors a renderer paints for one frame.
//!
//! # Architecture
//!
//! - **angle**: normalization, declination, integer-degree trig tables
//! - **traffic**: reticle scaling, bearing projection, above/below reticles
//! - **heading**: precomputed compass strip and heading readout
//! - **attitude**: roll arc geometry and pitch/roll readout
//! - **layout**: the engine (read-only tables) and the per-frame orchestrator
//!
//! Nothing here performs I/O, spawns threads or blocks. Tables are built
//! once in [`HudEngine::new`] and never mutated afterwards.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aerohud_core::{HudConfig, HudEngine, Orientation, SymbologyLayout};
//!
//! let engine = Arc::new(HudEngine::new(800, 480, HudConfig::default())?);
//! let mut layout = SymbologyLayout::new(engine);
//!
//! let primitives = layout.layout(&orientation, &traffic);
//! ```

pub mod angle;
pub mod attitude;
pub mod config;
pub mod error;
pub mod heading;
pub mod layout;
pub mod primitive;
pub mod screen;
pub mod state;
pub mod traffic;

pub use angle::{normalize, AngleMath};
pub use attitude::AttitudeArcGeometry;
pub use config::{Elements, HudConfig, TrafficMode};
pub use error::HudError;
pub use heading::{HeadingStripEntry, HeadingStripGenerator};
pub use layout::{FrameStats, HudEngine, SymbologyLayout};
pub use primitive::{ArcBox, ArcSpec, CachedText, Primitive};
pub use screen::{Color, ScreenGeometry, ScreenPoint};
pub use state::{Orientation, TrafficReport};
pub use traffic::{BugError, ReticleGeometry, ReticleKind, ReticleScaler};
