//! Colours on a 16-bit channel scale.

use std::fmt;
use std::path::Path;

use crate::{Error, Result};

/// Largest channel value.
pub const CHANNEL_MAX: f64 = 65535.0;

/// Factor between the 16-bit and 8-bit channel scales.
pub const EIGHT_BIT_SCALE: f64 = 257.0;

/// A colour with floating point channels from 0 to 65535.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Frgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`; the `#` is optional.
    pub fn from_hex(text: &str) -> Result<Self> {
        let hex = text.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::BadHex(text.to_string()));
        }

        let channel = |i: usize| -> Result<f64> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f64 * EIGHT_BIT_SCALE)
                .map_err(|_| Error::BadHex(text.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels as an array.
    #[inline]
    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn from_channels(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }

    /// Euclidean distance between two colours.
    pub fn distance(&self, other: &Frgb) -> f64 {
        self.channels()
            .iter()
            .zip(other.channels())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// The nearest 8-bit `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self
            .channels()
            .map(|c| (c / EIGHT_BIT_SCALE).round().clamp(0.0, 255.0) as u8);
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl fmt::Display for Frgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0}, {:.0}, {:.0})", self.to_hex(), self.r, self.g, self.b)
    }
}

/// The average colour of every pixel in an image file.
pub fn average_colour<P: AsRef<Path>>(path: P) -> Result<Frgb> {
    let img = image::open(path.as_ref())?.to_rgb16();
    let count = img.width() as usize * img.height() as usize;
    if count == 0 {
        return Err(Error::EmptyImage);
    }

    let mut sum = [0.0_f64; 3];
    for pixel in img.pixels() {
        for (acc, v) in sum.iter_mut().zip(pixel.0) {
            *acc += v as f64;
        }
    }
    let avg = sum.map(|s| s / count as f64);
    log::debug!("average of {} pixels in {}", count, path.as_ref().display());
    Ok(Frgb::from_channels(avg))
}
