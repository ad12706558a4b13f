//! Finder pattern ring generators and their registry

mod directional;
mod modular;
mod rounded;
mod shield;
mod simple;

use std::sync::LazyLock;

pub use directional::{Headlight, Ufo};
pub use modular::{BarsHorizontal, BarsVertical, CorneredPixels, DotDragHorizontal, Edges, Pixels};
pub use rounded::{Leaf, RoundedOuter, RoundedPointingIn, RoundedPointingOut, RoundedRect, Teardrop};
pub use shield::Shield;
pub use simple::{Circle, SpikyCircle, Square, Squircle};

use crate::{
    common::{
        error::ShapeResult,
        geometry::{rounded_rect, rounded_rect_with_radii, Corners, EYE_HOLE_RECT, EYE_RECT, MODULE_SIZE},
        path::Path,
        settings::SettingsBag,
    },
    generator::{configured, EyeShape},
    registry::{Descriptor, Registry, ShapeEnvelope},
};

// Registry
//------------------------------------------------------------------------------

static REGISTRY: LazyLock<Registry<dyn EyeShape>> = LazyLock::new(|| {
    Registry::new(
        "eye",
        vec![
            descriptor::<BarsHorizontal>(),
            descriptor::<BarsVertical>(),
            descriptor::<Circle>(),
            descriptor::<CorneredPixels>(),
            descriptor::<DotDragHorizontal>(),
            descriptor::<Edges>(),
            descriptor::<Headlight>(),
            descriptor::<Leaf>(),
            descriptor::<Pixels>(),
            descriptor::<RoundedOuter>(),
            descriptor::<RoundedPointingIn>(),
            descriptor::<RoundedPointingOut>(),
            descriptor::<RoundedRect>(),
            descriptor::<Shield>(),
            descriptor::<SpikyCircle>(),
            descriptor::<Square>(),
            descriptor::<Squircle>(),
            descriptor::<Teardrop>(),
            descriptor::<Ufo>(),
        ],
    )
});

fn create<T: EyeShape + Default + 'static>(settings: Option<&SettingsBag>) -> Box<dyn EyeShape> {
    Box::new(configured::<T>(settings))
}

fn descriptor<T: EyeShape + Default + 'static>() -> Descriptor<dyn EyeShape> {
    let prototype = T::default();
    Descriptor::new(prototype.name(), prototype.title(), create::<T>)
}

pub fn registry() -> &'static Registry<dyn EyeShape> {
    &REGISTRY
}

/// Registered eye names, alphabetical by title
pub fn names() -> Vec<&'static str> {
    REGISTRY.names()
}

pub fn named(name: &str, settings: Option<&SettingsBag>) -> ShapeResult<Box<dyn EyeShape>> {
    REGISTRY.named(name, settings)
}

pub fn create_from_envelope(envelope: &ShapeEnvelope) -> ShapeResult<Box<dyn EyeShape>> {
    REGISTRY.create(envelope)
}

pub fn create_from_json(json: &str) -> ShapeResult<Box<dyn EyeShape>> {
    REGISTRY.create_from_json(json)
}

// Shared ring constructions
//------------------------------------------------------------------------------

/// Ring whose outer and inner edges are rounded on the same corners. The inner radius
/// follows the outer one, one module tighter.
pub(crate) fn rounded_ring(corners: Corners, outer_radius: f64) -> Path {
    rounded_rect(EYE_RECT, outer_radius, corners).append(rounded_rect(
        EYE_HOLE_RECT,
        (outer_radius - MODULE_SIZE).max(0.0),
        corners,
    ))
}

pub(crate) fn rounded_ring_with_radii(outer: [f64; 4]) -> Path {
    let inner = outer.map(|r| (r - MODULE_SIZE).max(0.0));
    rounded_rect_with_radii(EYE_RECT, outer).append(rounded_rect_with_radii(EYE_HOLE_RECT, inner))
}

#[cfg(test)]
mod eye_registry_tests {
    use super::*;
    use crate::{
        common::{
            error::ShapeError,
            geometry::{Corners, Flip},
            settings::{keys, EyeInnerStyle, SettingDescriptor, SettingsBag, SettingsVisitor},
        },
        generator::ShapeGenerator,
    };

    #[test]
    fn test_all_registered() {
        assert_eq!(registry().len(), 19);
        let names = names();
        for name in ["circle", "shield", "pixels", "square", "roundedRect"] {
            assert!(names.contains(&name), "{name} not registered");
        }
    }

    #[test]
    fn test_names_in_title_order() {
        let titles = registry().titles();
        let mut sorted = titles.clone();
        sorted.sort();
        assert_eq!(titles, sorted);
    }

    #[test]
    fn test_descriptor_matches_instance() {
        for d in registry().descriptors() {
            let eye = d.instantiate(None);
            assert_eq!(eye.name(), d.name());
            assert_eq!(eye.title(), d.title());
        }
    }

    #[test]
    fn test_unknown() {
        let err = named("not-a-real-shape", None).unwrap_err();
        assert_eq!(err, ShapeError::UnknownGeneratorName("not-a-real-shape".to_string()));
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl SettingsVisitor for Recorder {
        fn visit_fraction(&mut self, setting: &SettingDescriptor, value: f64) {
            self.0.push(format!("fraction {}={value}", setting.key));
        }

        fn visit_bool(&mut self, setting: &SettingDescriptor, value: bool) {
            self.0.push(format!("bool {}={value}", setting.key));
        }

        fn visit_flip(&mut self, setting: &SettingDescriptor, value: Flip) {
            self.0.push(format!("flip {}={value:?}", setting.key));
        }

        fn visit_corners(&mut self, setting: &SettingDescriptor, value: Corners) {
            self.0.push(format!("corners {}={}", setting.key, value.bits()));
        }

        fn visit_eye_inner_style(&mut self, setting: &SettingDescriptor, value: EyeInnerStyle) {
            self.0.push(format!("inner {}={value:?}", setting.key));
        }
    }

    fn visited(name: &str, settings: SettingsBag) -> Vec<String> {
        let eye = named(name, Some(&settings)).unwrap();
        let mut recorder = Recorder::default();
        eye.visit_settings(&mut recorder);
        recorder.0
    }

    #[test]
    fn test_visit_settings_typed() {
        let corners = Corners::TOP_LEFT | Corners::BOTTOM_RIGHT;
        assert_eq!(visited("shield", SettingsBag::new().with(keys::CORNERS, corners)), vec!["corners corners=9"]);
        assert_eq!(
            visited("dotDragHorizontal", SettingsBag::new().with(keys::EYE_INNER_STYLE, 2i64)),
            vec!["inner eyeInnerStyle=RightOnly"]
        );
        assert_eq!(visited("ufo", SettingsBag::new().with(keys::FLIP, Flip::Vertical)), vec!["flip flip=Vertical"]);
        assert_eq!(visited("leaf", SettingsBag::new().with(keys::IS_FLIPPED, true)), vec!["bool isFlipped=true"]);
        assert_eq!(visited("pixels", SettingsBag::new()), vec!["fraction cornerRadiusFraction=0"]);
        assert!(visited("square", SettingsBag::new()).is_empty());
    }
}
