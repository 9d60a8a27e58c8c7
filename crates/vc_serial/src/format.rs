use core::fmt;
use core::str::FromStr;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Format

/// A wire format known to the host.
///
/// `yml` is an output format: handlers subscribe to both directions for it,
/// but the host rejects deserialization before any handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Format {
    Json,
    Xml,
    Yaml,
}

impl Format {
    /// Every format, in subscription order.
    pub const ALL: [Format; 3] = [Format::Json, Format::Xml, Format::Yaml];

    /// The short format name used in subscriptions.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_serial::Format;
    ///
    /// assert_eq!(Format::Yaml.name(), "yml");
    /// assert_eq!("xml".parse::<Format>().unwrap(), Format::Xml);
    /// ```
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Yaml => "yml",
        }
    }

    /// Returns `true` for tree/DOM based formats.
    ///
    /// Scalar values are emitted as text nodes in these formats.
    #[inline]
    pub const fn is_dom(self) -> bool {
        matches!(self, Format::Xml)
    }
}

impl fmt::Display for Format {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The name is not one of `json`, `xml`, `yml` or `yaml`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unknown format name")]
pub struct UnknownFormat;

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            "yml" | "yaml" => Ok(Format::Yaml),
            _ => Err(UnknownFormat),
        }
    }
}

// -----------------------------------------------------------------------------
// Direction

/// The direction of a (de)serialization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Serialization = 1,
    Deserialization = 2,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Serialization => "serialization",
            Direction::Deserialization => "deserialization",
        })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{Format, UnknownFormat};

    #[test]
    fn parse_names() {
        assert_eq!("json".parse::<Format>(), Ok(Format::Json));
        assert_eq!("yaml".parse::<Format>(), Ok(Format::Yaml));
        assert_eq!("toml".parse::<Format>(), Err(UnknownFormat));
        assert_eq!(UnknownFormat.to_string(), "unknown format name");
    }
}
