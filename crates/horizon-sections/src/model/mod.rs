//! Declarative view models for sectioned lists.
//!
//! A [`ModelTree`] describes everything a list surface should show: an
//! ordered run of [`Section`]s, each with optional header and footer models
//! and a sequence of item models. Trees are immutable snapshots. The driver
//! keeps the last committed tree and reconciles the surface whenever it is
//! handed a new one.
//!
//! # Core Types
//!
//! - [`IndexPath`]: Identifies an item slot by section and position
//! - [`ReuseDescriptor`]: How a model is rendered and pooled
//! - [`ViewModel`], [`ItemModel`], [`SupplementaryModel`]: Model capabilities
//! - [`Item`], [`Supplementary`]: Ready-made models with builder APIs
//! - [`Section`], [`ModelTree`]: The tree itself
//!
//! # Example
//!
//! ```
//! use horizon_sections::model::{
//!     Item, ModelTree, ReuseDescriptor, Section, Supplementary, SupplementaryKind,
//! };
//!
//! let cell = ReuseDescriptor::new("ContactCell", "contact");
//! let tree = ModelTree::new(vec![
//!     Section::empty()
//!         .with_key("favorites")
//!         .with_header(Supplementary::new(ReuseDescriptor::keyed(
//!             "TitleHeader",
//!             SupplementaryKind::Header,
//!             "favorites",
//!         )))
//!         .with_item(Item::new(cell.clone()).with_key("1").with_label("Ada"))
//!         .with_item(Item::new(cell).with_key("2").with_label("Grace")),
//! ]);
//!
//! assert_eq!(tree.item_count(0), 2);
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  ModelTree  │────>│    Diff     │────>│   Surface   │
//! │ (snapshot)  │     │ (EditScript)│     │  (batched)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                       │
//!       │         ┌─────────────┐               │
//!       └────────>│ ListDriver  │<──────────────┘
//!                 │  (queries)  │
//!                 └─────────────┘
//! ```

mod accessibility;
mod debug;
mod index;
mod item;
mod reuse;
mod section;
mod traits;
mod tree;

pub use accessibility::AccessibilityFormat;
pub use debug::TreeDebug;
pub use index::IndexPath;
pub use item::{Callback, Item, Supplementary};
pub use reuse::{
    ElementKind, HIDDEN_SUPPLEMENTARY_IDENTIFIER, HIDDEN_SUPPLEMENTARY_RENDERER, ReuseDescriptor,
    SupplementaryKind,
};
pub use section::Section;
pub use traits::{ItemModel, SupplementaryModel, ViewModel, fingerprint};
pub use tree::ModelTree;
