use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    common::{
        error::{ShapeError, ShapeResult},
        settings::SettingsBag,
    },
    generator::ShapeGenerator,
};

// Envelope
//------------------------------------------------------------------------------

/// Persisted form of one configured generator: `{ "type": <name>, "settings": {...} }`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeEnvelope {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub settings: SettingsBag,
}

impl ShapeEnvelope {
    pub fn new(name: &str, settings: SettingsBag) -> Self {
        Self { kind: Some(name.to_string()), settings }
    }

    /// Captures the name and current settings of `generator`
    pub fn of<G: ShapeGenerator + ?Sized>(generator: &G) -> Self {
        Self::new(generator.name(), generator.settings())
    }

    pub fn from_json(json: &str) -> ShapeResult<Self> {
        serde_json::from_str(json).map_err(ShapeError::malformed)
    }

    pub fn to_json(&self) -> ShapeResult<String> {
        serde_json::to_string(self).map_err(ShapeError::malformed)
    }
}

// Descriptor
//------------------------------------------------------------------------------

pub type CreateFn<T> = fn(Option<&SettingsBag>) -> Box<T>;

/// Registry entry: identity of a generator type plus its constructor
pub struct Descriptor<T: ?Sized> {
    name: &'static str,
    title: &'static str,
    create: CreateFn<T>,
}

impl<T: ?Sized> Clone for Descriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Descriptor<T> {}

impl<T: ?Sized> Descriptor<T> {
    pub const fn new(name: &'static str, title: &'static str, create: CreateFn<T>) -> Self {
        Self { name, title, create }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn instantiate(&self, settings: Option<&SettingsBag>) -> Box<T> {
        (self.create)(settings)
    }
}

impl<T: ?Sized> std::fmt::Debug for Descriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descriptor").field("name", &self.name).field("title", &self.title).finish()
    }
}

// Registry
//------------------------------------------------------------------------------

/// Immutable table of generator types, enumerated alphabetically by title and looked up
/// by name. Built once and only read afterwards, so it can be shared across threads freely.
pub struct Registry<T: ?Sized + 'static> {
    kind: &'static str,
    descriptors: Vec<Descriptor<T>>,
    index: HashMap<&'static str, usize>,
}

impl<T: ?Sized + 'static> Registry<T> {
    pub fn new(kind: &'static str, mut descriptors: Vec<Descriptor<T>>) -> Self {
        descriptors.sort_by(|a, b| a.title.cmp(b.title).then(a.name.cmp(b.name)));

        let mut index = HashMap::with_capacity(descriptors.len());
        for (i, d) in descriptors.iter().enumerate() {
            let prev = index.insert(d.name, i);
            assert!(prev.is_none(), "Duplicate {kind} generator name {}", d.name);
        }

        tracing::trace!(kind, count = descriptors.len(), "Registered shape generators");
        Self { kind, descriptors, index }
    }

    /// Generator names in title order
    pub fn names(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.name).collect()
    }

    pub fn titles(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.title).collect()
    }

    pub fn descriptors(&self) -> &[Descriptor<T>] {
        &self.descriptors
    }

    pub fn descriptor(&self, name: &str) -> Option<&Descriptor<T>> {
        self.index.get(name).map(|&i| &self.descriptors[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Instantiates the generator registered as `name`. An unknown name is an error rather
    /// than a fallback shape, as substituting a style would silently alter a saved design.
    pub fn named(&self, name: &str, settings: Option<&SettingsBag>) -> ShapeResult<Box<T>> {
        match self.descriptor(name) {
            Some(d) => {
                tracing::trace!(kind = self.kind, name, "Instantiating shape generator");
                Ok(d.instantiate(settings))
            }
            None => {
                tracing::debug!(kind = self.kind, name, "Unknown shape generator");
                Err(ShapeError::UnknownGeneratorName(name.to_string()))
            }
        }
    }

    pub fn create(&self, envelope: &ShapeEnvelope) -> ShapeResult<Box<T>> {
        let name = envelope
            .kind
            .as_deref()
            .ok_or_else(|| ShapeError::malformed(format!("{} envelope has no type", self.kind)))?;
        self.named(name, Some(&envelope.settings))
    }

    pub fn create_from_json(&self, json: &str) -> ShapeResult<Box<T>> {
        self.create(&ShapeEnvelope::from_json(json)?)
    }

    pub fn create_from_value(&self, value: serde_json::Value) -> ShapeResult<Box<T>> {
        let envelope: ShapeEnvelope = serde_json::from_value(value).map_err(ShapeError::malformed)?;
        self.create(&envelope)
    }
}

/// Persisted form of `generator`, accepted back by [`Registry::create`]
pub fn to_envelope<G: ShapeGenerator + ?Sized>(generator: &G) -> ShapeEnvelope {
    ShapeEnvelope::of(generator)
}

pub fn to_json<G: ShapeGenerator + ?Sized>(generator: &G) -> ShapeResult<String> {
    to_envelope(generator).to_json()
}

#[cfg(test)]
mod registry_tests {
    use super::*;
    use crate::common::settings::{keys, SettingValue, CORNER_RADIUS_FRACTION};

    impl std::fmt::Debug for dyn ShapeGenerator {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ShapeGenerator")
                .field("name", &self.name())
                .field("settings", &self.settings())
                .finish()
        }
    }

    #[derive(Clone, Default)]
    struct Stub {
        weight: f64,
    }

    impl ShapeGenerator for Stub {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn title(&self) -> &'static str {
            "Stub"
        }

        fn setting_descriptors(&self) -> &'static [crate::common::settings::SettingDescriptor] {
            &[CORNER_RADIUS_FRACTION]
        }

        fn settings(&self) -> SettingsBag {
            SettingsBag::new().with(keys::CORNER_RADIUS_FRACTION, self.weight)
        }

        fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
            match (key, value.as_fraction()) {
                (keys::CORNER_RADIUS_FRACTION, Some(v)) => {
                    self.weight = v;
                    true
                }
                _ => false,
            }
        }

        fn reset(&mut self) {
            *self = Self::default();
        }
    }

    fn create_stub(settings: Option<&SettingsBag>) -> Box<dyn ShapeGenerator> {
        Box::new(crate::generator::configured::<Stub>(settings))
    }

    fn registry() -> Registry<dyn ShapeGenerator> {
        Registry::new(
            "test",
            vec![
                Descriptor::new("zeta", "Alpha", create_stub),
                Descriptor::new("stub", "Stub", create_stub),
                Descriptor::new("alpha", "Zeta", create_stub),
            ],
        )
    }

    #[test]
    fn test_enumeration_by_title() {
        let registry = registry();
        assert_eq!(registry.names(), vec!["zeta", "stub", "alpha"]);
        assert_eq!(registry.titles(), vec!["Alpha", "Stub", "Zeta"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("alpha"));
    }

    #[test]
    #[should_panic(expected = "Duplicate test generator name stub")]
    fn test_duplicate_name_rejected() {
        Registry::<dyn ShapeGenerator>::new(
            "test",
            vec![Descriptor::new("stub", "Stub", create_stub), Descriptor::new("stub", "Other", create_stub)],
        );
    }

    #[test]
    fn test_unknown_name() {
        let err = registry().named("nope", None).unwrap_err();
        assert_eq!(err, ShapeError::UnknownGeneratorName("nope".to_string()));
    }

    #[test]
    fn test_create_from_envelope() {
        let json = r#"{"type":"stub","settings":{"cornerRadiusFraction":0.25,"unknown":3}}"#;
        let stub = registry().create_from_json(json).unwrap();
        assert_eq!(stub.settings()[keys::CORNER_RADIUS_FRACTION], SettingValue::Float(0.25));
    }

    #[test]
    fn test_envelope_without_type() {
        let err = registry().create_from_json(r#"{"settings":{}}"#).unwrap_err();
        assert!(matches!(err, ShapeError::MalformedSettingsEnvelope(_)));
        let err = registry().create_from_json("not json").unwrap_err();
        assert!(matches!(err, ShapeError::MalformedSettingsEnvelope(_)));
    }

    #[test]
    fn test_envelope_without_settings() {
        let stub = registry().create_from_value(serde_json::json!({ "type": "stub" })).unwrap();
        assert_eq!(stub.settings()[keys::CORNER_RADIUS_FRACTION], SettingValue::Float(0.0));
    }

    #[test]
    fn test_envelope_json() {
        let stub = Stub { weight: 0.5 };
        assert_eq!(to_json(&stub).unwrap(), r#"{"type":"stub","settings":{"cornerRadiusFraction":0.5}}"#);
        let restored = registry().create(&to_envelope(&stub)).unwrap();
        assert_eq!(restored.settings(), stub.settings());
    }
}
