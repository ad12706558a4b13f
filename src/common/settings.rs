use std::{
    collections::{btree_map, BTreeMap},
    ops::Index,
};

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::geometry::{clamp_fraction, Corners, Flip};

// Keys
//------------------------------------------------------------------------------

/// Setting keys understood by the bundled generators. Keys are part of the persisted format.
pub mod keys {
    pub const CORNER_RADIUS_FRACTION: &str = "cornerRadiusFraction";
    pub const FLIP: &str = "flip";
    pub const CORNERS: &str = "corners";
    pub const IS_FLIPPED: &str = "isFlipped";
    pub const EYE_INNER_STYLE: &str = "eyeInnerStyle";
}

// Setting value
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl SettingValue {
    /// Finite number, whether stored as int or float
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(v) if v.is_finite() => Some(v),
            Self::Int(v) => v.to_f64(),
            _ => None,
        }
    }

    /// Whole number, accepting floats without a fractional part
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => v.to_i64(),
            _ => None,
        }
    }

    /// Bool, accepting 0 and 1
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(v) => Some(v),
            Self::Int(0) => Some(false),
            Self::Int(1) => Some(true),
            _ => None,
        }
    }

    /// Number clamped to the unit interval
    pub fn as_fraction(&self) -> Option<f64> {
        self.as_f64().map(clamp_fraction)
    }

    pub fn as_flip(&self) -> Option<Flip> {
        self.as_i64().and_then(Flip::from_raw)
    }

    pub fn as_corners(&self) -> Option<Corners> {
        self.as_i64().and_then(Corners::from_raw)
    }

    pub fn as_eye_inner_style(&self) -> Option<EyeInnerStyle> {
        self.as_i64().and_then(EyeInnerStyle::from_raw)
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_i64().map(Self::Int).or_else(|| n.as_f64().map(Self::Float)),
            _ => None,
        }
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Flip> for SettingValue {
    fn from(v: Flip) -> Self {
        Self::Int(v.raw())
    }
}

impl From<Corners> for SettingValue {
    fn from(v: Corners) -> Self {
        Self::Int(v.raw())
    }
}

impl From<EyeInnerStyle> for SettingValue {
    fn from(v: EyeInnerStyle) -> Self {
        Self::Int(v.raw())
    }
}

// Eye inner style
//------------------------------------------------------------------------------

/// Which inner columns of an eye's ring are broken up into dots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EyeInnerStyle {
    #[default]
    Both = 0,
    LeftOnly = 1,
    RightOnly = 2,
}

impl EyeInnerStyle {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::Both),
            1 => Some(Self::LeftOnly),
            2 => Some(Self::RightOnly),
            _ => None,
        }
    }

    pub fn raw(self) -> i64 {
        self as i64
    }

    pub fn left(self) -> bool {
        matches!(self, Self::Both | Self::LeftOnly)
    }

    pub fn right(self) -> bool {
        matches!(self, Self::Both | Self::RightOnly)
    }
}

// Settings bag
//------------------------------------------------------------------------------

/// String keyed tunables of one generator. Loading is lenient: entries that are not a number
/// or a bool are dropped so that documents written by other versions stay readable, and a
/// document that is not an object at all loads as an empty bag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct SettingsBag(BTreeMap<String, SettingValue>);

impl SettingsBag {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<SettingValue>) -> Option<SettingValue> {
        self.0.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SettingValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Value> for SettingsBag {
    fn from(raw: Value) -> Self {
        let entries = match raw {
            Value::Object(entries) => entries,
            Value::Null => return Self::new(),
            other => {
                tracing::debug!(settings = %other, "Dropping settings that are not an object");
                return Self::new();
            }
        };

        let mut bag = Self::new();
        for (key, value) in entries {
            match SettingValue::from_json(&value) {
                Some(v) => {
                    bag.0.insert(key, v);
                }
                None => tracing::debug!(%key, %value, "Dropping non-scalar setting"),
            }
        }
        bag
    }
}

impl Index<&str> for SettingsBag {
    type Output = SettingValue;

    fn index(&self, key: &str) -> &Self::Output {
        match self.0.get(key) {
            Some(v) => v,
            None => panic!("No setting named {key}"),
        }
    }
}

impl<'a> IntoIterator for &'a SettingsBag {
    type Item = (&'a String, &'a SettingValue);
    type IntoIter = btree_map::Iter<'a, String, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, SettingValue)> for SettingsBag {
    fn from_iter<I: IntoIterator<Item = (K, SettingValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// Setting descriptors
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    /// Float in 0..=1
    Fraction,
    Bool,
    Flip,
    Corners,
    EyeInnerStyle,
}

/// Static description of one tunable, used to enumerate a generator's settings without
/// knowing its concrete type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingDescriptor {
    pub key: &'static str,
    pub title: &'static str,
    pub kind: SettingKind,
}

pub const CORNER_RADIUS_FRACTION: SettingDescriptor = SettingDescriptor {
    key: keys::CORNER_RADIUS_FRACTION,
    title: "Corner radius",
    kind: SettingKind::Fraction,
};

pub const FLIP: SettingDescriptor =
    SettingDescriptor { key: keys::FLIP, title: "Flip", kind: SettingKind::Flip };

pub const CORNERS: SettingDescriptor =
    SettingDescriptor { key: keys::CORNERS, title: "Corners", kind: SettingKind::Corners };

pub const IS_FLIPPED: SettingDescriptor =
    SettingDescriptor { key: keys::IS_FLIPPED, title: "Flipped", kind: SettingKind::Bool };

pub const EYE_INNER_STYLE: SettingDescriptor = SettingDescriptor {
    key: keys::EYE_INNER_STYLE,
    title: "Inner style",
    kind: SettingKind::EyeInnerStyle,
};

// Visitor
//------------------------------------------------------------------------------

/// Receives a generator's tunables with their current typed values. Every method defaults to
/// doing nothing so visitors only implement the kinds they care about.
pub trait SettingsVisitor {
    fn visit_fraction(&mut self, _setting: &SettingDescriptor, _value: f64) {}
    fn visit_bool(&mut self, _setting: &SettingDescriptor, _value: bool) {}
    fn visit_flip(&mut self, _setting: &SettingDescriptor, _value: Flip) {}
    fn visit_corners(&mut self, _setting: &SettingDescriptor, _value: Corners) {}
    fn visit_eye_inner_style(&mut self, _setting: &SettingDescriptor, _value: EyeInnerStyle) {}
}

/// Dispatches every described setting present in `bag` to `visitor`
pub fn visit(descriptors: &[SettingDescriptor], bag: &SettingsBag, visitor: &mut dyn SettingsVisitor) {
    for setting in descriptors {
        let Some(value) = bag.get(setting.key) else {
            continue;
        };
        match setting.kind {
            SettingKind::Fraction => {
                if let Some(v) = value.as_fraction() {
                    visitor.visit_fraction(setting, v);
                }
            }
            SettingKind::Bool => {
                if let Some(v) = value.as_bool() {
                    visitor.visit_bool(setting, v);
                }
            }
            SettingKind::Flip => {
                if let Some(v) = value.as_flip() {
                    visitor.visit_flip(setting, v);
                }
            }
            SettingKind::Corners => {
                if let Some(v) = value.as_corners() {
                    visitor.visit_corners(setting, v);
                }
            }
            SettingKind::EyeInnerStyle => {
                if let Some(v) = value.as_eye_inner_style() {
                    visitor.visit_eye_inner_style(setting, v);
                }
            }
        }
    }
}

#[cfg(test)]
mod settings_tests {
    use test_case::test_case;

    use super::*;

    #[test_case(SettingValue::Float(0.25), Some(0.25))]
    #[test_case(SettingValue::Int(2), Some(2.0))]
    #[test_case(SettingValue::Float(f64::NAN), None)]
    #[test_case(SettingValue::Float(f64::INFINITY), None)]
    #[test_case(SettingValue::Bool(true), None)]
    fn test_as_f64(value: SettingValue, exp: Option<f64>) {
        assert_eq!(value.as_f64(), exp);
    }

    #[test_case(SettingValue::Int(3), Some(3))]
    #[test_case(SettingValue::Float(2.0), Some(2))]
    #[test_case(SettingValue::Float(2.5), None)]
    #[test_case(SettingValue::Float(1e300), None)]
    #[test_case(SettingValue::Bool(false), None)]
    fn test_as_i64(value: SettingValue, exp: Option<i64>) {
        assert_eq!(value.as_i64(), exp);
    }

    #[test_case(SettingValue::Bool(true), Some(true))]
    #[test_case(SettingValue::Int(0), Some(false))]
    #[test_case(SettingValue::Int(1), Some(true))]
    #[test_case(SettingValue::Int(7), None)]
    #[test_case(SettingValue::Float(1.0), None)]
    fn test_as_bool(value: SettingValue, exp: Option<bool>) {
        assert_eq!(value.as_bool(), exp);
    }

    #[test_case(SettingValue::Float(-1.0), Some(0.0))]
    #[test_case(SettingValue::Float(2.0), Some(1.0))]
    #[test_case(SettingValue::Int(1), Some(1.0))]
    fn test_as_fraction(value: SettingValue, exp: Option<f64>) {
        assert_eq!(value.as_fraction(), exp);
    }

    #[test]
    fn test_typed_enums() {
        assert_eq!(SettingValue::Int(2).as_flip(), Some(Flip::Vertical));
        assert_eq!(SettingValue::Int(9).as_corners(), Some(Corners::TOP_LEFT | Corners::BOTTOM_RIGHT));
        assert_eq!(SettingValue::Int(2).as_eye_inner_style(), Some(EyeInnerStyle::RightOnly));
        assert_eq!(SettingValue::Int(3).as_eye_inner_style(), None);
        assert_eq!(SettingValue::from(Flip::Both), SettingValue::Int(3));
    }

    #[test]
    fn test_bag_json() {
        let bag = SettingsBag::new()
            .with(keys::CORNER_RADIUS_FRACTION, 0.5)
            .with(keys::FLIP, Flip::Horizontal)
            .with(keys::IS_FLIPPED, true);
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"{"cornerRadiusFraction":0.5,"flip":1,"isFlipped":true}"#);
        let back: SettingsBag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bag);
    }

    #[test]
    fn test_bag_keeps_whole_floats_as_floats() {
        let bag = SettingsBag::new().with(keys::CORNER_RADIUS_FRACTION, 1.0);
        let json = serde_json::to_string(&bag).unwrap();
        let back: SettingsBag = serde_json::from_str(&json).unwrap();
        assert_eq!(back[keys::CORNER_RADIUS_FRACTION], SettingValue::Float(1.0));
    }

    #[test]
    fn test_bag_drops_non_scalars() {
        let json = r#"{"flip":2,"color":"red","nested":{"a":1},"list":[1],"none":null}"#;
        let bag: SettingsBag = serde_json::from_str(json).unwrap();
        assert_eq!(bag.len(), 1);
        assert_eq!(bag[keys::FLIP], SettingValue::Int(2));
    }

    #[test_case("null")]
    #[test_case("[1]")]
    #[test_case("0.5")]
    #[test_case(r#""flip""#)]
    fn test_bag_from_non_object(json: &str) {
        let bag: SettingsBag = serde_json::from_str(json).unwrap();
        assert!(bag.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_bag_index_missing() {
        let _value = SettingsBag::new()["missing"];
    }

    #[derive(Default)]
    struct Collect(Vec<String>);

    impl SettingsVisitor for Collect {
        fn visit_fraction(&mut self, setting: &SettingDescriptor, value: f64) {
            self.0.push(format!("{}={value}", setting.key));
        }

        fn visit_corners(&mut self, setting: &SettingDescriptor, value: Corners) {
            self.0.push(format!("{}={}", setting.key, value.bits()));
        }
    }

    #[test]
    fn test_visit() {
        let bag = SettingsBag::new()
            .with(keys::CORNER_RADIUS_FRACTION, 0.5)
            .with(keys::CORNERS, 3i64)
            .with(keys::IS_FLIPPED, true);
        let mut visitor = Collect::default();
        visit(&[CORNER_RADIUS_FRACTION, CORNERS, IS_FLIPPED, FLIP], &bag, &mut visitor);
        assert_eq!(visitor.0, vec!["cornerRadiusFraction=0.5", "corners=3"]);
    }
}
