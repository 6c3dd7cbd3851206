//! Reuse descriptor registration.
//!
//! Surfaces must know every renderer before they can dequeue one. The
//! [`ReuseRegistry`] remembers which `(kind, identifier)` pairs have been
//! registered with the driver's surface and issues each registration exactly
//! once. Records are never evicted.

use std::collections::HashMap;

use horizon_sections_core::logging::targets;
use tracing::{debug, warn};

use crate::model::{ElementKind, ModelTree, ReuseDescriptor, Section, SupplementaryKind};
use crate::surface::ListSurface;

/// Registration records keyed by slot kind and reuse identifier.
#[derive(Debug, Default)]
pub struct ReuseRegistry {
    registered: HashMap<(ElementKind, String), String>,
}

impl ReuseRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `descriptor` for `kind` unless it already is.
    ///
    /// Returns `true` if a registration command was issued.
    pub fn ensure_registered(
        &mut self,
        descriptor: &ReuseDescriptor,
        kind: ElementKind,
        surface: &mut dyn ListSurface,
    ) -> bool {
        let key = (kind, descriptor.identifier().to_string());
        if let Some(renderer) = self.registered.get(&key) {
            if renderer != descriptor.renderer() {
                warn!(
                    target: targets::REGISTRY,
                    %kind,
                    identifier = descriptor.identifier(),
                    registered = %renderer,
                    requested = descriptor.renderer(),
                    "reuse identifier already registered with another renderer"
                );
            }
            return false;
        }

        debug!(target: targets::REGISTRY, %kind, %descriptor, "registering");
        surface.register_reuse_descriptor(descriptor, kind);
        self.registered
            .insert(key, descriptor.renderer().to_string());
        true
    }

    /// Returns `true` if `identifier` is registered for `kind`.
    pub fn is_registered(&self, kind: ElementKind, identifier: &str) -> bool {
        self.registered.contains_key(&(kind, identifier.to_string()))
    }

    /// Returns the descriptor a section's header or footer slot renders with.
    ///
    /// Absent sections and absent supplementaries use the hidden placeholder.
    pub fn descriptor_for(section: Option<&Section>, kind: SupplementaryKind) -> ReuseDescriptor {
        section
            .and_then(|section| section.supplementary(kind))
            .map(|model| model.reuse_descriptor().clone())
            .unwrap_or_else(ReuseDescriptor::hidden)
    }

    /// Registers every descriptor a tree uses.
    ///
    /// Sections are walked in order: header, footer, then items. The hidden
    /// placeholder is registered last, for headers and then footers, even
    /// where a model asks for it explicitly.
    /// Returns the registrations issued, in order.
    pub fn register_tree(
        &mut self,
        tree: &ModelTree,
        surface: &mut dyn ListSurface,
    ) -> Vec<(ElementKind, String)> {
        let mut issued = Vec::new();
        let mut register = |registry: &mut Self, descriptor: &ReuseDescriptor, kind: ElementKind| {
            if registry.ensure_registered(descriptor, kind, &mut *surface) {
                issued.push((kind, descriptor.identifier().to_string()));
            }
        };

        for section in tree.sections() {
            for kind in SupplementaryKind::ALL {
                // Placeholder models are registered once the walk is done.
                if let Some(model) = section.supplementary(kind)
                    && !model.reuse_descriptor().is_hidden()
                {
                    register(self, model.reuse_descriptor(), kind.into());
                }
            }
            for item in section.items() {
                register(self, item.reuse_descriptor(), ElementKind::Item);
            }
        }

        let hidden = ReuseDescriptor::hidden();
        for kind in SupplementaryKind::ALL {
            register(self, &hidden, kind.into());
        }

        issued
    }

    /// Returns the number of registration records.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}
