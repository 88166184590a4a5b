//! Host platform classification.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Operating system class that decides compiler and library naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformClass {
    Windows,
    Darwin,
    /// Linux and every other Unix-like host
    OtherUnix,
}

impl PlatformClass {
    /// Detect the host platform class. Never fails.
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Classify a `std::env::consts::OS` value.
    ///
    /// Unrecognized hosts are treated as Linux-like.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => PlatformClass::Windows,
            "macos" => PlatformClass::Darwin,
            _ => PlatformClass::OtherUnix,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformClass::Windows => "windows",
            PlatformClass::Darwin => "darwin",
            PlatformClass::OtherUnix => "other-unix",
        }
    }

    /// File extension of shared libraries on this platform.
    pub fn shared_lib_extension(&self) -> &'static str {
        match self {
            PlatformClass::Windows => "dll",
            // The makefile builds `.so` on macOS too; the loader looks for that name.
            PlatformClass::Darwin | PlatformClass::OtherUnix => "so",
        }
    }
}

impl fmt::Display for PlatformClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win" => Ok(PlatformClass::Windows),
            "darwin" | "macos" => Ok(PlatformClass::Darwin),
            "unix" | "linux" | "other-unix" => Ok(PlatformClass::OtherUnix),
            _ => Err(format!(
                "invalid platform '{}'; expected 'windows', 'darwin', or 'unix'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os() {
        assert_eq!(PlatformClass::from_os("windows"), PlatformClass::Windows);
        assert_eq!(PlatformClass::from_os("macos"), PlatformClass::Darwin);
        assert_eq!(PlatformClass::from_os("linux"), PlatformClass::OtherUnix);
        assert_eq!(PlatformClass::from_os("freebsd"), PlatformClass::OtherUnix);
        assert_eq!(PlatformClass::from_os(""), PlatformClass::OtherUnix);
    }

    #[test]
    fn test_detect_matches_host() {
        let detected = PlatformClass::detect();
        if cfg!(target_os = "windows") {
            assert_eq!(detected, PlatformClass::Windows);
        } else if cfg!(target_os = "macos") {
            assert_eq!(detected, PlatformClass::Darwin);
        } else {
            assert_eq!(detected, PlatformClass::OtherUnix);
        }
    }

    #[test]
    fn test_parse_round_trips_display() {
        for platform in [
            PlatformClass::Windows,
            PlatformClass::Darwin,
            PlatformClass::OtherUnix,
        ] {
            assert_eq!(platform.to_string().parse::<PlatformClass>(), Ok(platform));
        }
        assert_eq!("MacOS".parse::<PlatformClass>(), Ok(PlatformClass::Darwin));
        assert!("amiga".parse::<PlatformClass>().is_err());
    }
}
