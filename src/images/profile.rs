//! Image size profiles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named size preset mapping to a target width and compression quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Thumbnail,
    Small,
    #[default]
    Medium,
    Large,
    Hero,
}

impl ImageSize {
    pub const ALL: [ImageSize; 5] = [
        ImageSize::Thumbnail,
        ImageSize::Small,
        ImageSize::Medium,
        ImageSize::Large,
        ImageSize::Hero,
    ];

    /// Target width in pixels.
    pub fn width(self) -> u32 {
        match self {
            ImageSize::Thumbnail => 200,
            ImageSize::Small => 400,
            ImageSize::Medium => 800,
            ImageSize::Large => 1200,
            ImageSize::Hero => 1400,
        }
    }

    /// Compression quality (0-100).
    pub fn quality(self) -> u8 {
        match self {
            ImageSize::Thumbnail => 70,
            ImageSize::Small => 75,
            ImageSize::Medium => 80,
            ImageSize::Large => 85,
            ImageSize::Hero => 82,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::Thumbnail => "thumbnail",
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
            ImageSize::Hero => "hero",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageSize::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown image size '{}'", s))
    }
}
