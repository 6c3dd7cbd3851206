//! Horizon Sections - declarative sectioned list reconciliation.
//!
//! Describe what a list or grid should show as an immutable [`ModelTree`],
//! hand it to a [`ListDriver`], and the driver keeps a stateful, batch-updated
//! rendering surface in sync: it diffs each new tree against the last one it
//! committed, registers renderers on first use, applies the edits inside one
//! transaction, and answers the surface's content and size queries.
//!
//! The core crate's signal/slot, thread-affinity, and logging facilities are
//! re-exported at the root.
//!
//! # Example
//!
//! ```
//! use horizon_sections::prelude::*;
//!
//! let cell = ReuseDescriptor::new("ContactCell", "contact");
//! let tree = |names: &[&str]| {
//!     ModelTree::new(vec![Section::empty()
//!         .with_key("contacts")
//!         .with_items(names.iter().map(|name| {
//!             Item::new(cell.clone()).with_key(*name).with_label(*name)
//!         }))])
//! };
//!
//! let surface = RecordingSurface::new().with_default_size(ElementKind::Item, 44.0);
//! let mut driver = ListDriver::with_tree(surface, tree(&["ada", "grace"]), DriverConfig::default());
//!
//! driver.set_model_tree(tree(&["grace", "ada", "linus"]));
//!
//! assert_eq!(driver.item_count(0), 3);
//! assert_eq!(driver.size_for_item(IndexPath::new(0, 2)), 44.0);
//! ```

pub use horizon_sections_core::*;

pub mod diff;
pub mod driver;
pub mod error;
pub mod model;
pub mod prelude;
pub mod registry;
pub mod size;
pub mod surface;

pub use diff::{EditOp, EditScript, Shape, diff};
pub use driver::{DriverConfig, ListDriver};
pub use error::{ConfigError, ConsistencyError, ReconcileError, SurfaceError};
pub use model::ModelTree;
pub use surface::{DataSource, ListSurface};
