//! Core traits for view models.
//!
//! Models are immutable descriptions of what a slot should show. The diff
//! engine compares them through their identity ([`ViewModel::diffing_key`])
//! and their observable content ([`fingerprint`]); the driver reads the rest
//! of the capability set when the surface asks for content.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::accessibility::AccessibilityFormat;
use super::reuse::ReuseDescriptor;

/// Capabilities shared by item and supplementary models.
///
/// At minimum, implement [`reuse_descriptor`](ViewModel::reuse_descriptor).
/// Every other capability has a default.
///
/// # Example
///
/// ```
/// use std::hash::{Hash, Hasher};
/// use horizon_sections::model::{ItemModel, ReuseDescriptor, ViewModel};
///
/// struct Contact {
///     id: u64,
///     name: String,
///     reuse: ReuseDescriptor,
/// }
///
/// impl ViewModel for Contact {
///     fn reuse_descriptor(&self) -> &ReuseDescriptor {
///         &self.reuse
///     }
///
///     fn diffing_key(&self) -> Option<String> {
///         Some(self.id.to_string())
///     }
///
///     fn label(&self) -> Option<&str> {
///         Some(&self.name)
///     }
///
///     fn hash_content(&self, mut state: &mut dyn Hasher) {
///         self.name.hash(&mut state);
///     }
/// }
///
/// impl ItemModel for Contact {}
/// ```
pub trait ViewModel: Send + Sync {
    /// Returns how this model is rendered.
    fn reuse_descriptor(&self) -> &ReuseDescriptor;

    /// Returns the content identity used to match this model across trees.
    ///
    /// When `None`, the model's position within its sequence is its identity.
    fn diffing_key(&self) -> Option<String> {
        None
    }

    /// Returns an explicit presentation size (height for vertical lists).
    ///
    /// When `None`, the size resolver falls back to surface defaults.
    fn size(&self) -> Option<f32> {
        None
    }

    /// Returns the display label passed through to the rendering object.
    fn label(&self) -> Option<&str> {
        None
    }

    /// Returns the accessibility identifier template.
    fn accessibility_format(&self) -> Option<&AccessibilityFormat> {
        None
    }

    /// Feeds additional observable content into the model fingerprint.
    ///
    /// Override this when a model renders data that is not covered by the
    /// descriptor, size, label, or accessibility format. Two models with the
    /// same identity but different fingerprints are reloaded.
    fn hash_content(&self, _state: &mut dyn Hasher) {}
}

/// A model rendered in an item slot.
pub trait ItemModel: ViewModel {
    /// Returns whether the surface should highlight the item on touch.
    fn should_highlight(&self) -> bool {
        true
    }

    /// Called when the item is selected.
    fn on_select(&self) {}

    /// Called when the item is deselected.
    fn on_deselect(&self) {}
}

/// A model rendered in a header or footer slot.
pub trait SupplementaryModel: ViewModel {}

/// Computes the observable-content fingerprint of a model.
///
/// Covers the reuse descriptor, size, label, accessibility format, and
/// whatever the model adds through [`ViewModel::hash_content`].
pub fn fingerprint(model: &dyn ViewModel) -> u64 {
    let mut hasher = DefaultHasher::new();
    model.reuse_descriptor().hash(&mut hasher);
    model.size().map(f32::to_bits).hash(&mut hasher);
    model.label().hash(&mut hasher);
    model.accessibility_format().hash(&mut hasher);
    model.hash_content(&mut hasher);
    hasher.finish()
}
