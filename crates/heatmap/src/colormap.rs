//! Named colormaps built from linearly interpolated color stops.

use serde::Serialize;

use crate::error::HeatmapError;

/// An 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the color as `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn lerp(&self, other: &Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t).round() as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

type Stop = (f64, Rgb);

const SEISMIC: &[Stop] = &[
    (0.0, Rgb::new(0, 0, 77)),
    (0.25, Rgb::new(0, 0, 255)),
    (0.5, Rgb::new(255, 255, 255)),
    (0.75, Rgb::new(255, 0, 0)),
    (1.0, Rgb::new(128, 0, 0)),
];

const BWR: &[Stop] = &[
    (0.0, Rgb::new(0, 0, 255)),
    (0.5, Rgb::new(255, 255, 255)),
    (1.0, Rgb::new(255, 0, 0)),
];

const COOLWARM: &[Stop] = &[
    (0.0, Rgb::new(59, 76, 192)),
    (0.5, Rgb::new(221, 221, 221)),
    (1.0, Rgb::new(180, 4, 38)),
];

const BLUES: &[Stop] = &[
    (0.0, Rgb::new(247, 251, 255)),
    (0.25, Rgb::new(198, 219, 239)),
    (0.5, Rgb::new(107, 174, 214)),
    (0.75, Rgb::new(33, 113, 181)),
    (1.0, Rgb::new(8, 48, 107)),
];

const GREYS: &[Stop] = &[(0.0, Rgb::new(255, 255, 255)), (1.0, Rgb::new(0, 0, 0))];

const VIRIDIS: &[Stop] = &[
    (0.0, Rgb::new(68, 1, 84)),
    (0.25, Rgb::new(59, 82, 139)),
    (0.5, Rgb::new(33, 145, 140)),
    (0.75, Rgb::new(94, 201, 98)),
    (1.0, Rgb::new(253, 231, 37)),
];

/// Colormap used to paint heatmap cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// Diverging dark blue / white / dark red.
    #[default]
    Seismic,
    /// Diverging blue / white / red.
    Bwr,
    /// Diverging blue / grey / red.
    Coolwarm,
    /// Sequential white to blue.
    Blues,
    /// Sequential white to black.
    Greys,
    /// Perceptually uniform purple to yellow.
    Viridis,
}

impl Colormap {
    /// Every supported colormap.
    pub const ALL: [Colormap; 6] = [
        Self::Seismic,
        Self::Bwr,
        Self::Coolwarm,
        Self::Blues,
        Self::Greys,
        Self::Viridis,
    ];

    /// Looks up a colormap by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError::UnknownColormap`] for unknown names.
    pub fn from_name(name: &str) -> Result<Self, HeatmapError> {
        let key = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == key)
            .ok_or_else(|| HeatmapError::UnknownColormap(name.to_string()))
    }

    /// Returns the colormap's name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Seismic => "seismic",
            Self::Bwr => "bwr",
            Self::Coolwarm => "coolwarm",
            Self::Blues => "blues",
            Self::Greys => "greys",
            Self::Viridis => "viridis",
        }
    }

    fn stops(&self) -> &'static [Stop] {
        match self {
            Self::Seismic => SEISMIC,
            Self::Bwr => BWR,
            Self::Coolwarm => COOLWARM,
            Self::Blues => BLUES,
            Self::Greys => GREYS,
            Self::Viridis => VIRIDIS,
        }
    }

    /// Samples the colormap at `t`, clamped to `[0, 1]`. NaN samples the
    /// low end.
    pub fn at(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let stops = self.stops();
        for pair in stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                return c0.lerp(&c1, (t - t0) / (t1 - t0));
            }
        }
        stops[stops.len() - 1].1
    }
}
