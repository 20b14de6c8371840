//! Host platform detection

use crate::system::System;
use std::fmt;
use tracing::info;

/// Host operating system family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other(String),
}

impl Platform {
    /// Map an OS identifier such as `std::env::consts::OS` to a platform
    #[must_use]
    pub fn from_os_name(os_name: &str) -> Self {
        match os_name {
            "linux" => Self::Linux,
            "macos" | "darwin" => Self::MacOs,
            "windows" => Self::Windows,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => f.write_str("linux"),
            Self::MacOs => f.write_str("macos"),
            Self::Windows => f.write_str("windows"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Report the host platform
pub fn detect_platform(system: &dyn System) -> Platform {
    let platform = Platform::from_os_name(&system.os_name());
    info!("Detected system platform: {}", platform);
    platform
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn maps_known_os_names() {
        assert_eq!(Platform::from_os_name("linux"), Platform::Linux);
        assert_eq!(Platform::from_os_name("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os_name("darwin"), Platform::MacOs);
        assert_eq!(Platform::from_os_name("windows"), Platform::Windows);
        assert_eq!(
            Platform::from_os_name("freebsd"),
            Platform::Other("freebsd".to_owned())
        );
    }

    #[test]
    fn detect_uses_system_os_name() {
        let system = MockSystem::new().with_os("macos");
        assert_eq!(detect_platform(&system), Platform::MacOs);
        assert_eq!(Platform::Other("haiku".to_owned()).to_string(), "haiku");
    }
}
