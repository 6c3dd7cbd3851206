//! Ready-made item and supplementary models.
//!
//! [`Item`] and [`Supplementary`] cover the common case of a model that is
//! fully described by its reuse descriptor, label, size, and callbacks. Hosts
//! with richer content implement [`ItemModel`] or [`SupplementaryModel`]
//! on their own types instead.

use std::fmt;
use std::sync::Arc;

use super::accessibility::AccessibilityFormat;
use super::reuse::ReuseDescriptor;
use super::traits::{ItemModel, SupplementaryModel, ViewModel};

/// A zero-argument interaction callback.
///
/// Callbacks frequently capture the controller that owns the driver. Capture
/// a `Weak` handle in that case; the driver never breaks reference cycles.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// A general-purpose item model.
///
/// # Example
///
/// ```
/// use horizon_sections::model::{Item, ReuseDescriptor};
///
/// let item = Item::new(ReuseDescriptor::new("TextCell", "text"))
///     .with_key("row-1")
///     .with_label("First row")
///     .with_size(44.0)
///     .on_select(|| println!("selected"));
/// ```
#[derive(Clone)]
pub struct Item {
    reuse: ReuseDescriptor,
    key: Option<String>,
    label: Option<String>,
    size: Option<f32>,
    accessibility: Option<AccessibilityFormat>,
    highlight: bool,
    select: Option<Callback>,
    deselect: Option<Callback>,
}

impl Item {
    /// Creates an item rendered with the given descriptor.
    pub fn new(reuse: ReuseDescriptor) -> Self {
        Self {
            reuse,
            key: None,
            label: None,
            size: None,
            accessibility: None,
            highlight: true,
            select: None,
            deselect: None,
        }
    }

    /// Sets the content identity used for diffing.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets an explicit size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the accessibility identifier template.
    pub fn with_accessibility_format(mut self, format: impl Into<AccessibilityFormat>) -> Self {
        self.accessibility = Some(format.into());
        self
    }

    /// Sets whether the item highlights on touch.
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Sets the selection callback.
    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.select = Some(Arc::new(callback));
        self
    }

    /// Sets the deselection callback.
    pub fn on_deselect<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.deselect = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("reuse", &self.reuse)
            .field("key", &self.key)
            .field("label", &self.label)
            .field("size", &self.size)
            .field("accessibility", &self.accessibility)
            .field("highlight", &self.highlight)
            .field("on_select", &self.select.is_some())
            .field("on_deselect", &self.deselect.is_some())
            .finish()
    }
}

impl ViewModel for Item {
    fn reuse_descriptor(&self) -> &ReuseDescriptor {
        &self.reuse
    }

    fn diffing_key(&self) -> Option<String> {
        self.key.clone()
    }

    fn size(&self) -> Option<f32> {
        self.size
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn accessibility_format(&self) -> Option<&AccessibilityFormat> {
        self.accessibility.as_ref()
    }
}

impl ItemModel for Item {
    fn should_highlight(&self) -> bool {
        self.highlight
    }

    fn on_select(&self) {
        if let Some(callback) = &self.select {
            callback();
        }
    }

    fn on_deselect(&self) {
        if let Some(callback) = &self.deselect {
            callback();
        }
    }
}

/// A general-purpose header/footer model.
#[derive(Debug, Clone)]
pub struct Supplementary {
    reuse: ReuseDescriptor,
    key: Option<String>,
    label: Option<String>,
    size: Option<f32>,
    accessibility: Option<AccessibilityFormat>,
}

impl Supplementary {
    /// Creates a supplementary model rendered with the given descriptor.
    pub fn new(reuse: ReuseDescriptor) -> Self {
        Self {
            reuse,
            key: None,
            label: None,
            size: None,
            accessibility: None,
        }
    }

    /// Sets the content identity.
    ///
    /// Headers and footers keep their slot, so the key does not affect
    /// matching; a slot whose key changes is reloaded even if nothing it
    /// renders changed.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets an explicit size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets an optional explicit size.
    pub fn with_optional_size(mut self, size: Option<f32>) -> Self {
        self.size = size;
        self
    }

    /// Sets the accessibility identifier template.
    pub fn with_accessibility_format(mut self, format: impl Into<AccessibilityFormat>) -> Self {
        self.accessibility = Some(format.into());
        self
    }
}

impl ViewModel for Supplementary {
    fn reuse_descriptor(&self) -> &ReuseDescriptor {
        &self.reuse
    }

    fn diffing_key(&self) -> Option<String> {
        self.key.clone()
    }

    fn size(&self) -> Option<f32> {
        self.size
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn accessibility_format(&self) -> Option<&AccessibilityFormat> {
        self.accessibility.as_ref()
    }
}

impl SupplementaryModel for Supplementary {}
