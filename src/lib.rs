//! bookmap
//!
//! A lightweight Rust library for fetching, filtering, and browsing a
//! bookstore directory on province map overlays. Pairs with the `bookmap`
//! CLI and the `bookmap-gui` desktop viewer.
//!
//! ### Features
//! - Fetch the store directory from the remote endpoint (one GET, no retry)
//! - Filter markers by store type and group co-located stores
//! - Derive a per-type legend with stable colors and counts
//! - Coordinate province layer switches against a map viewport
//! - Drive the detail modal's store/image navigation
//! - Export a snapshot as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use bookmap::{Client, legend, markers};
//!
//! let client = Client::default();
//! let snapshot = client.fetch_directory()?;
//! let visibility = markers::TypeVisibility::from_snapshot(&snapshot);
//! let shown = markers::filter_visible(&snapshot, &visibility);
//! let colors = legend::assign_colors(&legend::derive_types(&snapshot), &legend::DEFAULT_PALETTE);
//! println!("{} of {} stores shown, {} colors", shown.len(), snapshot.len(), colors.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod legend;
pub mod markers;
pub mod modal;
pub mod models;
pub mod region;
pub mod storage;

pub use api::{Client, DirectoryError};
pub use models::{Coordinate, DirectorySnapshot, StoreRecord, UNSPECIFIED_TYPE};
