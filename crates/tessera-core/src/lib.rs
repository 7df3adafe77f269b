#![forbid(unsafe_code)]

//! Core: grid item model, geometry, configuration, and errors.
//!
//! # Role in Tessera
//! `tessera-core` holds the data every other crate speaks: [`LayoutItem`]
//! records, the [`GridRect`] / [`PixelRect`] coordinate types, the
//! [`GridConfig`] a grid is driven with, and the error taxonomy.
//!
//! # How it fits in the system
//! `tessera-layout` consumes these types and implements collision detection,
//! compaction, cascading moves, and pointer-to-grid translation on top of
//! them. Nothing here performs layout work.

pub mod config;
pub mod error;
pub mod geometry;
pub mod item;

pub use config::{CompactType, GridConfig, RowHeight};
pub use error::{FieldType, LayoutError, ValidationError};
pub use geometry::{GridRect, PixelPoint, PixelRect};
pub use item::{Layout, LayoutItem, MIN_ITEM_SIZE};
