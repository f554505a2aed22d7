//! Three-stop color themes and their resolution into engine uniforms.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_THEME_LABEL, DEFAULT_THEME_STOPS};
use crate::error::ThemeError;

/// An sRGB color parsed from a hex triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB`; the leading `#` is required.
    pub fn parse_hex(text: &str) -> Result<Self, ThemeError> {
        let invalid = || ThemeError::InvalidHex(text.to_string());
        let digits = text.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |c: u8| c * 17;
                Ok(Self::new(
                    expand(channel(&digits[0..1])?),
                    expand(channel(&digits[1..2])?),
                    expand(channel(&digits[2..3])?),
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// Components in [0, 1], still sRGB encoded.
    pub fn to_srgb_f32(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32) / 255.0
    }

    /// Components converted to linear light for shading.
    pub fn to_linear(self) -> Vec3 {
        let s = self.to_srgb_f32();
        Vec3::new(srgb_to_linear(s.x), srgb_to_linear(s.y), srgb_to_linear(s.z))
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

/// Which stop of the gradient a manual edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeStop {
    Near,
    Mid,
    Far,
}

impl FromStr for ThemeStop {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "near" | "core" | "start" => Ok(Self::Near),
            "mid" => Ok(Self::Mid),
            "far" | "outer" | "end" => Ok(Self::Far),
            _ => Err(ThemeError::UnknownStop(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTheme {
    pub label: String,
    pub color_near: Rgb,
    pub color_mid: Rgb,
    pub color_far: Rgb,
}

impl Default for ColorTheme {
    fn default() -> Self {
        let [near, mid, far] = DEFAULT_THEME_STOPS.map(|hex| {
            Rgb::parse_hex(hex).unwrap_or(Rgb::new(0, 0, 0))
        });
        Self {
            label: DEFAULT_THEME_LABEL.to_string(),
            color_near: near,
            color_mid: mid,
            color_far: far,
        }
    }
}

impl ColorTheme {
    /// A copy of this theme with one stop replaced.
    pub fn with_stop(&self, stop: ThemeStop, color: Rgb) -> Self {
        let mut theme = self.clone();
        match stop {
            ThemeStop::Near => theme.color_near = color,
            ThemeStop::Mid => theme.color_mid = color,
            ThemeStop::Far => theme.color_far = color,
        }
        theme
    }

    /// Linear-light stops in gradient order.
    pub fn linear_stops(&self) -> ThemeColors {
        ThemeColors {
            near: self.color_near.to_linear(),
            mid: self.color_mid.to_linear(),
            far: self.color_far.to_linear(),
        }
    }
}

/// Resolved gradient stops handed to the deformation engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeColors {
    pub near: Vec3,
    pub mid: Vec3,
    pub far: Vec3,
}

impl ThemeColors {
    /// Piecewise-linear color at gradient position `t` in [0, 1].
    #[inline]
    pub fn sample(&self, t: f32) -> Vec3 {
        if t < 0.5 {
            self.near.lerp(self.mid, t * 2.0)
        } else {
            self.mid.lerp(self.far, (t - 0.5) * 2.0)
        }
    }
}

/// Palette payload as returned by the generation service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPalette {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub mid: String,
    #[serde(default)]
    pub end: String,
}

impl GeneratedPalette {
    /// Parse the raw JSON text of a service response.
    pub fn from_json(text: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(text.trim())?)
    }

    /// Validate every field and build a theme.
    pub fn into_theme(self) -> Result<ColorTheme, ThemeError> {
        let hex = |value: &str, field: &'static str| {
            if value.trim().is_empty() {
                Err(ThemeError::MissingField(field))
            } else {
                Rgb::parse_hex(value)
            }
        };
        let color_near = hex(&self.start, "start")?;
        let color_mid = hex(&self.mid, "mid")?;
        let color_far = hex(&self.end, "end")?;
        let label = match self.name.trim() {
            "" => "Generated".to_string(),
            name => name.to_string(),
        };
        Ok(ColorTheme {
            label,
            color_near,
            color_mid,
            color_far,
        })
    }
}

/// Where a replacement theme comes from.
#[derive(Clone, Debug)]
pub enum ThemeSource {
    /// A full theme edited by hand; installed as is.
    Manual(ColorTheme),
    /// A single stop changed by a color picker.
    ManualStop(ThemeStop, Rgb),
    /// Palette produced by the generation service; validated before use.
    Generated(GeneratedPalette),
}

/// Owns the active theme and only ever replaces it with a valid one.
#[derive(Clone, Debug, Default)]
pub struct ThemeResolver {
    active: ColorTheme,
    colors: Option<ThemeColors>,
}

impl ThemeResolver {
    pub fn new(theme: ColorTheme) -> Self {
        Self {
            active: theme,
            colors: None,
        }
    }

    pub fn active(&self) -> &ColorTheme {
        &self.active
    }

    /// Resolve `source` into a theme without installing it.
    pub fn resolve(&self, source: ThemeSource) -> Result<ColorTheme, ThemeError> {
        match source {
            ThemeSource::Manual(theme) => Ok(theme),
            ThemeSource::ManualStop(stop, color) => Ok(self.active.with_stop(stop, color)),
            ThemeSource::Generated(palette) => palette.into_theme(),
        }
    }

    /// Resolve and install. On error the active theme is left untouched.
    pub fn apply(&mut self, source: ThemeSource) -> Result<&ColorTheme, ThemeError> {
        let theme = self.resolve(source)?;
        log::info!(
            "[theme] installed '{}' {} {} {}",
            theme.label,
            theme.color_near,
            theme.color_mid,
            theme.color_far
        );
        self.active = theme;
        self.colors = None;
        Ok(&self.active)
    }

    /// Linear stops for the engine, cached until the theme changes.
    pub fn colors(&mut self) -> ThemeColors {
        *self.colors.get_or_insert_with(|| self.active.linear_stops())
    }
}
