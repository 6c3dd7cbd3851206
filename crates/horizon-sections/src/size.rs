//! Presentation size resolution.
//!
//! Sizes are resolved lazily on every surface query by walking a
//! [`SizePolicy`]: the first [`SizeSource`] that yields a value wins, and an
//! exhausted chain yields `0.0`.

use serde::{Deserialize, Serialize};

/// One step of a size policy chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSource {
    /// The model's own explicit size.
    Explicit,
    /// The surface layout's reference size for the element kind.
    SurfaceDefault,
    /// A constant.
    Fixed(f32),
}

/// An ordered chain of size sources.
///
/// # Example
///
/// ```
/// use horizon_sections::size::{SizePolicy, SizeSource};
///
/// let policy = SizePolicy::default();
/// assert_eq!(policy.resolve(Some(44.0), || Some(50.0)), 44.0);
/// assert_eq!(policy.resolve(None, || Some(50.0)), 50.0);
/// assert_eq!(policy.resolve(None, || None), 0.0);
///
/// let fixed = SizePolicy::new(vec![SizeSource::Explicit, SizeSource::Fixed(30.0)]);
/// assert_eq!(fixed.resolve(None, || Some(50.0)), 30.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizePolicy(Vec<SizeSource>);

impl Default for SizePolicy {
    fn default() -> Self {
        Self(vec![SizeSource::Explicit, SizeSource::SurfaceDefault])
    }
}

impl SizePolicy {
    /// Size used when no source yields a value.
    pub const FALLBACK: f32 = 0.0;

    /// Creates a policy from an ordered chain.
    pub fn new(sources: Vec<SizeSource>) -> Self {
        Self(sources)
    }

    /// Returns the chain.
    pub fn sources(&self) -> &[SizeSource] {
        &self.0
    }

    /// Resolves a size.
    ///
    /// `surface_default` is only called if the chain reaches
    /// [`SizeSource::SurfaceDefault`].
    pub fn resolve(&self, explicit: Option<f32>, surface_default: impl Fn() -> Option<f32>) -> f32 {
        self.0
            .iter()
            .find_map(|source| match *source {
                SizeSource::Explicit => explicit,
                SizeSource::SurfaceDefault => surface_default(),
                SizeSource::Fixed(size) => Some(size),
            })
            .unwrap_or(Self::FALLBACK)
    }
}

impl From<Vec<SizeSource>> for SizePolicy {
    fn from(sources: Vec<SizeSource>) -> Self {
        Self::new(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_surface_default_is_lazy() {
        let calls = Cell::new(0);
        let policy = SizePolicy::default();
        let size = policy.resolve(Some(12.0), || {
            calls.set(calls.get() + 1);
            Some(50.0)
        });
        assert_eq!(size, 12.0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_empty_policy_falls_back() {
        assert_eq!(SizePolicy::new(Vec::new()).resolve(Some(10.0), || Some(5.0)), 0.0);
    }

    #[test]
    fn test_serde_shape() {
        let policy = SizePolicy::new(vec![
            SizeSource::Explicit,
            SizeSource::Fixed(20.0),
            SizeSource::SurfaceDefault,
        ]);
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(json, r#"["explicit",{"fixed":20.0},"surface_default"]"#);
        assert_eq!(serde_json::from_str::<SizePolicy>(&json).unwrap(), policy);
    }
}
