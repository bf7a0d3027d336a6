use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Art style presets offered for the concept image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StylePreset {
    #[default]
    Default,
    Photorealistic,
    Anime,
    LowPoly,
    Steampunk,
    Cyberpunk,
}

impl StylePreset {
    pub const ALL: [StylePreset; 6] = [
        StylePreset::Default,
        StylePreset::Photorealistic,
        StylePreset::Anime,
        StylePreset::LowPoly,
        StylePreset::Steampunk,
        StylePreset::Cyberpunk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StylePreset::Default => "Default",
            StylePreset::Photorealistic => "Photorealistic",
            StylePreset::Anime => "Anime",
            StylePreset::LowPoly => "Low Poly",
            StylePreset::Steampunk => "Steampunk",
            StylePreset::Cyberpunk => "Cyberpunk",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            StylePreset::Default => "default",
            StylePreset::Photorealistic => "photorealistic",
            StylePreset::Anime => "cel shaded anime style",
            StylePreset::LowPoly => "low poly, vibrant colors",
            StylePreset::Steampunk => "steampunk, intricate gears, brass and copper",
            StylePreset::Cyberpunk => "cyberpunk, neon lighting, futuristic",
        }
    }

    /// The clause appended to image prompts; `None` for the default style.
    pub fn clause(&self) -> Option<&'static str> {
        match self {
            StylePreset::Default => None,
            other => Some(other.value()),
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StylePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StylePreset::ALL
            .iter()
            .copied()
            .find(|style| {
                style.name().eq_ignore_ascii_case(wanted)
                    || style.value().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown style preset: {}", wanted))
    }
}
