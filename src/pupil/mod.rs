//! Pupil glyph generators and their registry

mod modular;
mod rounded;
mod shield;
mod simple;

use std::sync::LazyLock;

pub use modular::{BarsHorizontal, BarsVertical, Pixels};
pub use rounded::{Leaf, RoundedOuter, RoundedPointingIn, RoundedPointingOut, RoundedRect, Teardrop};
pub use shield::Shield;
pub use simple::{Circle, Cross, Seal, SpikyCircle, Square, Squircle};

use crate::{
    common::{error::ShapeResult, settings::SettingsBag},
    generator::{configured, PupilShape},
    registry::{Descriptor, Registry, ShapeEnvelope},
};

static REGISTRY: LazyLock<Registry<dyn PupilShape>> = LazyLock::new(|| {
    Registry::new(
        "pupil",
        vec![
            descriptor::<BarsHorizontal>(),
            descriptor::<BarsVertical>(),
            descriptor::<Circle>(),
            descriptor::<Cross>(),
            descriptor::<Leaf>(),
            descriptor::<Pixels>(),
            descriptor::<RoundedOuter>(),
            descriptor::<RoundedPointingIn>(),
            descriptor::<RoundedPointingOut>(),
            descriptor::<RoundedRect>(),
            descriptor::<Seal>(),
            descriptor::<Shield>(),
            descriptor::<SpikyCircle>(),
            descriptor::<Square>(),
            descriptor::<Squircle>(),
            descriptor::<Teardrop>(),
        ],
    )
});

fn create<T: PupilShape + Default + 'static>(settings: Option<&SettingsBag>) -> Box<dyn PupilShape> {
    Box::new(configured::<T>(settings))
}

fn descriptor<T: PupilShape + Default + 'static>() -> Descriptor<dyn PupilShape> {
    let prototype = T::default();
    Descriptor::new(prototype.name(), prototype.title(), create::<T>)
}

pub fn registry() -> &'static Registry<dyn PupilShape> {
    &REGISTRY
}

/// Registered pupil names, alphabetical by title
pub fn names() -> Vec<&'static str> {
    REGISTRY.names()
}

pub fn named(name: &str, settings: Option<&SettingsBag>) -> ShapeResult<Box<dyn PupilShape>> {
    REGISTRY.named(name, settings)
}

pub fn create_from_envelope(envelope: &ShapeEnvelope) -> ShapeResult<Box<dyn PupilShape>> {
    REGISTRY.create(envelope)
}

pub fn create_from_json(json: &str) -> ShapeResult<Box<dyn PupilShape>> {
    REGISTRY.create_from_json(json)
}

#[cfg(test)]
mod pupil_registry_tests {
    use super::*;
    use crate::{
        common::{error::ShapeError, geometry::PUPIL_RECT},
        generator::ShapeGenerator,
    };

    #[test]
    fn test_all_registered() {
        assert_eq!(registry().len(), 16);
        assert!(registry().contains("seal"));
        assert!(!registry().contains("ufo"));
    }

    #[test]
    fn test_glyphs_confined_to_pupil_rect() {
        for name in names() {
            let pupil = named(name, None).unwrap();
            let bounds = pupil.glyph_path().bounds().unwrap();
            assert!(PUPIL_RECT.contains_rect(&bounds, 1e-6), "{name} exceeds the pupil region");
        }
    }

    #[test]
    fn test_from_json() {
        let pupil = create_from_json(r#"{"type":"roundedRect","settings":{"cornerRadiusFraction":1}}"#).unwrap();
        assert_eq!(pupil.name(), "roundedRect");
        let err = create_from_json(r#"{"type":"ufo"}"#).unwrap_err();
        assert_eq!(err, ShapeError::UnknownGeneratorName("ufo".to_string()));
    }
}
