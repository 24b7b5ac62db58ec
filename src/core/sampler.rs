//! Position sampling from the external object provider.

use super::path::Waypoint;
use super::skip::SkipReason;

/// A named object inside the 3D scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub position: Waypoint,
}

/// Anything that can look up scene objects by name.
///
/// The sequencer only polls this; it never drives the provider's lifecycle.
pub trait PositionProvider {
    fn find_object_by_name(&self, name: &str) -> Option<SceneObject>;
}

/// Polls one named object once per frame.
#[derive(Debug, Clone)]
pub struct PositionSampler {
    object_name: String,
}

impl PositionSampler {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
        }
    }

    /// Read the live position.  `provider` is `None` until the scene has
    /// finished loading; both that and a missing object are transient.
    pub fn sample<P>(&self, provider: Option<&P>) -> Result<Waypoint, SkipReason>
    where
        P: PositionProvider + ?Sized,
    {
        let provider = provider.ok_or(SkipReason::ProviderUnavailable)?;
        provider
            .find_object_by_name(&self.object_name)
            .map(|obj| obj.position)
            .ok_or_else(|| SkipReason::ObjectNotFound {
                name: self.object_name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneObject(&'static str, Waypoint);

    impl PositionProvider for OneObject {
        fn find_object_by_name(&self, name: &str) -> Option<SceneObject> {
            (name == self.0).then_some(SceneObject { position: self.1 })
        }
    }

    #[test]
    fn missing_provider_is_unavailable() {
        let sampler = PositionSampler::new("ori");
        assert_eq!(
            sampler.sample::<OneObject>(None),
            Err(SkipReason::ProviderUnavailable)
        );
    }

    #[test]
    fn missing_object_is_reported_by_name() {
        let sampler = PositionSampler::new("ori");
        let scene = OneObject("camera", Waypoint::default());
        assert_eq!(
            sampler.sample(Some(&scene)),
            Err(SkipReason::ObjectNotFound { name: "ori".into() })
        );
    }

    #[test]
    fn found_object_returns_its_position() {
        let sampler = PositionSampler::new("ori");
        let pos = Waypoint::new(1.0, 2.0, 3.0);
        let scene = OneObject("ori", pos);
        assert_eq!(sampler.sample(Some(&scene)), Ok(pos));
    }
}
