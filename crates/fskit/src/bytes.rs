//! Human-readable byte sizes in binary (1024-based) units

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display unit for byte counts. The discriminant is the power of 1024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpaceUnit {
    #[default]
    Byte = 0,
    KB = 1,
    MB = 2,
    GB = 3,
    TB = 4,
    PB = 5,
    EB = 6,
    ZB = 7,
    YB = 8,
}

impl SpaceUnit {
    /// Every unit in ascending order.
    pub const ALL: [SpaceUnit; 9] = [
        Self::Byte,
        Self::KB,
        Self::MB,
        Self::GB,
        Self::TB,
        Self::PB,
        Self::EB,
        Self::ZB,
        Self::YB,
    ];

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Byte => "Byte",
            Self::KB => "KB",
            Self::MB => "MB",
            Self::GB => "GB",
            Self::TB => "TB",
            Self::PB => "PB",
            Self::EB => "EB",
            Self::ZB => "ZB",
            Self::YB => "YB",
        }
    }

    /// Power of 1024 this unit represents.
    pub fn level(self) -> u32 {
        self as u32
    }

    /// Largest unit whose scaled value of `bytes` is at least 1.
    ///
    /// Zero maps to [`SpaceUnit::Byte`].
    pub fn fit(bytes: u64) -> Self {
        let bytes = u128::from(bytes);
        let mut level = 0;
        let mut threshold: u128 = 1024;
        while level + 1 < Self::ALL.len() && bytes >= threshold {
            level += 1;
            threshold *= 1024;
        }
        Self::ALL[level]
    }
}

impl fmt::Display for SpaceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpaceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "byte" | "bytes" | "b" => Ok(Self::Byte),
            "kb" => Ok(Self::KB),
            "mb" => Ok(Self::MB),
            "gb" => Ok(Self::GB),
            "tb" => Ok(Self::TB),
            "pb" => Ok(Self::PB),
            "eb" => Ok(Self::EB),
            "zb" => Ok(Self::ZB),
            "yb" => Ok(Self::YB),
            _ => Err(format!("Unknown space unit: {s}")),
        }
    }
}

impl TryFrom<String> for SpaceUnit {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SpaceUnit> for String {
    fn from(unit: SpaceUnit) -> Self {
        unit.as_str().to_string()
    }
}

/// Options for [`format_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Fractional digits in the output.
    pub decimals: usize,
    /// Unit used when `auto` is off.
    pub unit: SpaceUnit,
    /// Pick the largest unit that keeps the value at or above 1.
    pub auto: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimals: 2,
            unit: SpaceUnit::Byte,
            auto: true,
        }
    }
}

impl FormatOptions {
    /// Fixed-unit options.
    pub fn with_unit(unit: SpaceUnit) -> Self {
        Self {
            unit,
            auto: false,
            ..Self::default()
        }
    }
}

/// Format `bytes` as `"<value> <unit>"`, e.g. `"1.00 KB"`.
pub fn format_bytes(bytes: u64, opts: FormatOptions) -> String {
    let unit = if opts.auto {
        SpaceUnit::fit(bytes)
    } else {
        opts.unit
    };
    let value = bytes as f64 / 1024f64.powi(unit.level() as i32);
    format!("{:.*} {}", opts.decimals, value, unit)
}

/// [`format_bytes`] with two decimals and automatic unit selection.
pub fn format_bytes_default(bytes: u64) -> String {
    format_bytes(bytes, FormatOptions::default())
}
