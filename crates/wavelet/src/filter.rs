//! Wavelet filter definitions.

use std::f64::consts::FRAC_1_SQRT_2;

use crate::error::WaveletError;

const HAAR: [f64; 2] = [FRAC_1_SQRT_2, FRAC_1_SQRT_2];

const DB2: [f64; 4] = [
    0.482_962_913_144_690_25,
    0.836_516_303_737_469,
    0.224_143_868_041_857_35,
    -0.129_409_522_550_921_45,
];

const DB3: [f64; 6] = [
    0.332_670_552_950_956_9,
    0.806_891_509_313_338_8,
    0.459_877_502_119_331_3,
    -0.135_011_020_010_390_84,
    -0.085_441_273_882_241_49,
    0.035_226_291_882_100_656,
];

const DB4: [f64; 8] = [
    0.230_377_813_308_855_23,
    0.714_846_570_552_541_5,
    0.630_880_767_929_590_4,
    -0.027_983_769_416_983_85,
    -0.187_034_811_718_881_14,
    0.030_841_381_835_986_965,
    0.032_883_011_666_982_945,
    -0.010_597_401_784_997_278,
];

const SYM4: [f64; 8] = [
    0.032_223_100_604_042_7,
    -0.012_603_967_262_037_833,
    -0.099_219_543_576_847_22,
    0.297_857_795_605_277_36,
    0.803_738_751_805_916_1,
    0.497_618_667_632_015_45,
    -0.029_635_527_645_998_51,
    -0.075_765_714_789_273_33,
];

/// Supported orthogonal wavelet filters.
///
/// Names follow the usual `dbN` / `symN` convention, with the
/// `D(L)` / `LA(L)` filter-length aliases also accepted.
///
/// # Example
///
/// ```
/// use dwtviz_wavelet::WaveletFilter;
///
/// let filter = WaveletFilter::from_name("db2").unwrap();
/// assert_eq!(filter.length(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaveletFilter {
    /// Haar wavelet, also `db1` (length 2).
    #[default]
    Haar,
    /// Daubechies db2 / D4 (length 4).
    Db2,
    /// Daubechies db3 / D6 (length 6).
    Db3,
    /// Daubechies db4 / D8 (length 8).
    Db4,
    /// Symlet sym4 / LA(8) (length 8).
    Sym4,
}

impl WaveletFilter {
    /// Returns the filter length (number of coefficients).
    pub fn length(&self) -> usize {
        self.scaling_coeffs().len()
    }

    /// Returns the canonical name of the filter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Haar => "haar",
            Self::Db2 => "db2",
            Self::Db3 => "db3",
            Self::Db4 => "db4",
            Self::Sym4 => "sym4",
        }
    }

    /// Returns the scaling (father wavelet) coefficients `h[0..L]`.
    ///
    /// Normalised so that `sum(h) = sqrt(2)` and `sum(h^2) = 1`.
    pub fn scaling_coeffs(&self) -> &'static [f64] {
        match self {
            Self::Haar => &HAAR,
            Self::Db2 => &DB2,
            Self::Db3 => &DB3,
            Self::Db4 => &DB4,
            Self::Sym4 => &SYM4,
        }
    }

    /// Returns the wavelet (mother wavelet) coefficients.
    ///
    /// Derived from the scaling coefficients via the quadrature mirror
    /// filter relationship `g[k] = (-1)^k h[L - 1 - k]`.
    pub fn wavelet_coeffs(&self) -> Vec<f64> {
        let h = self.scaling_coeffs();
        let l = h.len();
        (0..l)
            .map(|k| {
                let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                sign * h[l - 1 - k]
            })
            .collect()
    }

    /// Returns the decomposition low-pass filter (time-reversed scaling
    /// coefficients), as applied by the convolution in the transforms.
    pub fn dec_lo(&self) -> Vec<f64> {
        self.scaling_coeffs().iter().rev().copied().collect()
    }

    /// Returns the decomposition high-pass filter (time-reversed wavelet
    /// coefficients).
    pub fn dec_hi(&self) -> Vec<f64> {
        self.wavelet_coeffs().into_iter().rev().collect()
    }

    /// Parses a wavelet filter from a case-insensitive name string.
    ///
    /// # Supported Names
    ///
    /// | Input | Filter |
    /// |-------|--------|
    /// | `"haar"`, `"db1"` | [`WaveletFilter::Haar`] |
    /// | `"db2"`, `"d4"` | [`WaveletFilter::Db2`] |
    /// | `"db3"`, `"d6"` | [`WaveletFilter::Db3`] |
    /// | `"db4"`, `"d8"` | [`WaveletFilter::Db4`] |
    /// | `"sym4"`, `"la8"` | [`WaveletFilter::Sym4`] |
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::UnsupportedFilter`] if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, WaveletError> {
        match name.trim().to_lowercase().as_str() {
            "haar" | "db1" => Ok(Self::Haar),
            "db2" | "d4" => Ok(Self::Db2),
            "db3" | "d6" => Ok(Self::Db3),
            "db4" | "d8" => Ok(Self::Db4),
            "sym4" | "la8" => Ok(Self::Sym4),
            _ => Err(WaveletError::UnsupportedFilter(name.to_string())),
        }
    }
}
