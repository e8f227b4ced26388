//! Color samples and luminance weighting functions

use serde::{Deserialize, Serialize};

/// One pixel read from an image: 16 bits per channel, alpha-premultiplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorSample {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub alpha: u16,
}

impl ColorSample {
    /// Build a sample from already-premultiplied 16-bit channels
    #[must_use]
    pub const fn new(red: u16, green: u16, blue: u16, alpha: u16) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Fully opaque sample from 16-bit channels
    #[must_use]
    pub const fn opaque(red: u16, green: u16, blue: u16) -> Self {
        Self::new(red, green, blue, u16::MAX)
    }

    /// Widen straight (non-premultiplied) 8-bit channels and premultiply by alpha
    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        let a = u32::from(alpha);
        let widen = |c: u8| (u32::from(c) * 257 * a / 255) as u16;
        Self {
            red: widen(red),
            green: widen(green),
            blue: widen(blue),
            alpha: u16::from(alpha) * 257,
        }
    }

    /// Premultiply straight 16-bit channels by alpha
    #[must_use]
    pub fn from_rgba16(red: u16, green: u16, blue: u16, alpha: u16) -> Self {
        let a = u32::from(alpha);
        let scale = |c: u16| (u32::from(c) * a / u32::from(u16::MAX)) as u16;
        Self {
            red: scale(red),
            green: scale(green),
            blue: scale(blue),
            alpha,
        }
    }
}

/// A pure luminance weighting applied to every pixel
///
/// Plain function pointers are `Copy + Send + Sync + 'static`, so the same
/// strategy can be handed to every partition task without synchronization.
pub type LuminanceFn = fn(ColorSample) -> f64;

/// ITU-R BT.709 relative luminance, alpha ignored
#[must_use]
pub fn relative_luminance_rec709(sample: ColorSample) -> f64 {
    0.2126 * f64::from(sample.red) + 0.7152 * f64::from(sample.green) + 0.0722 * f64::from(sample.blue)
}

/// ITU-R BT.601 luma weights, alpha ignored
#[must_use]
pub fn relative_luminance_rec601(sample: ColorSample) -> f64 {
    0.299 * f64::from(sample.red) + 0.587 * f64::from(sample.green) + 0.114 * f64::from(sample.blue)
}

/// Named luminance weightings selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuminanceWeights {
    /// ITU-R BT.709 (sRGB primaries)
    #[default]
    Rec709,
    /// ITU-R BT.601 (SD video)
    Rec601,
}

impl LuminanceWeights {
    /// Resolve to the weighting function
    #[must_use]
    pub fn function(self) -> LuminanceFn {
        match self {
            Self::Rec709 => relative_luminance_rec709,
            Self::Rec601 => relative_luminance_rec601,
        }
    }
}

impl std::fmt::Display for LuminanceWeights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rec709 => write!(f, "rec709"),
            Self::Rec601 => write!(f, "rec601"),
        }
    }
}

impl std::str::FromStr for LuminanceWeights {
    type Err = crate::error::BrightnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rec709" | "bt709" => Ok(Self::Rec709),
            "rec601" | "bt601" => Ok(Self::Rec601),
            other => Err(crate::error::BrightnessError::invalid_config(format!(
                "Unknown luminance weights '{}' (expected rec709 or rec601)",
                other
            ))),
        }
    }
}
