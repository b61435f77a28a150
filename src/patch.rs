use std::fmt;

use serde::Serialize;

pub const BRIGHTNESS_MAX: i64 = 254;
pub const SATURATION_MAX: i64 = 254;
pub const HUE_MAX: i64 = 65535;

/// State fields a command can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Power,
    Brightness,
    Saturation,
    Hue,
}

impl Field {
    /// Inclusive range accepted by the bridge.
    pub fn range(self) -> (i64, i64) {
        match self {
            Field::Power => (0, 1),
            Field::Brightness => (0, BRIGHTNESS_MAX),
            Field::Saturation => (0, SATURATION_MAX),
            Field::Hue => (0, HUE_MAX),
        }
    }

    /// Saturate `value` into [`Field::range`].
    pub fn clamp(self, value: i64) -> i64 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Power => write!(f, "on/off"),
            Field::Brightness => write!(f, "brightness"),
            Field::Saturation => write!(f, "saturation"),
            Field::Hue => write!(f, "color (hue)"),
        }
    }
}

/// Partial group update. Only fields that are set are sent to the bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(rename = "bri", skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    #[serde(rename = "sat", skip_serializing_if = "Option::is_none")]
    pub saturation: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
}

impl StatePatch {
    /// Patch from already-typed values, as supplied by command-line flags.
    pub fn from_values(
        on: Option<bool>,
        brightness: Option<i64>,
        saturation: Option<i64>,
        hue: Option<i64>,
    ) -> Self {
        let mut patch = Self {
            on,
            ..Self::default()
        };
        for (field, value) in [
            (Field::Brightness, brightness),
            (Field::Saturation, saturation),
            (Field::Hue, hue),
        ] {
            if let Some(value) = value {
                patch.set(field, value);
            }
        }
        patch
    }

    /// Set `field`, clamping the value into its valid range.
    pub fn set(&mut self, field: Field, value: i64) {
        let value = field.clamp(value);
        // Clamped values always fit the narrower wire types.
        match field {
            Field::Power => self.on = Some(value != 0),
            Field::Brightness => self.brightness = u8::try_from(value).ok(),
            Field::Saturation => self.saturation = u8::try_from(value).ok(),
            Field::Hue => self.hue = u16::try_from(value).ok(),
        }
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.on.is_none()
            && self.brightness.is_none()
            && self.saturation.is_none()
            && self.hue.is_none()
    }
}
