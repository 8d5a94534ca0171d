use serde::Serialize;
use strum_macros::Display;

/// Lifecycle phase of the engine.
///
/// Phases are ordered and monotonic: the ordinal only ever increases, apart
/// from the `Failed` escape hatch, and an explicit reset recreates the
/// engine rather than rewinding it.
///
/// ```text
/// Idle --boot()--> BootingEarly --(plugins signal)--> BootingPlugins
///      --(last-boot signal)--> BootingThemes --> Booted
/// any non-terminal --fatal failure--> Failed (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Idle,
    BootingEarly,
    BootingPlugins,
    BootingThemes,
    Booted,
    Failed,
}

impl Status {
    pub fn ordinal(self) -> u8 {
        match self {
            Status::Idle => 0,
            Status::BootingEarly => 1,
            Status::BootingPlugins => 2,
            Status::BootingThemes => 3,
            Status::Booted => 4,
            Status::Failed => 5,
        }
    }

    pub fn is_early(self) -> bool {
        self == Status::BootingEarly
    }

    pub fn is_plugins_step(self) -> bool {
        self == Status::BootingPlugins
    }

    pub fn is_themes_step(self) -> bool {
        self == Status::BootingThemes
    }

    pub fn is_booted(self) -> bool {
        self == Status::Booted
    }

    pub fn is_failed(self) -> bool {
        self == Status::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_ordering() {
        assert!(Status::Idle < Status::BootingEarly);
        assert!(Status::BootingEarly < Status::BootingPlugins);
        assert!(Status::BootingPlugins < Status::BootingThemes);
        assert!(Status::BootingThemes < Status::Booted);
        assert_eq!(Status::Booted.ordinal(), 4);
    }

    #[test]
    fn test_helpers() {
        assert!(Status::BootingEarly.is_early());
        assert!(Status::BootingPlugins.is_plugins_step());
        assert!(Status::BootingThemes.is_themes_step());
        assert!(Status::Booted.is_booted());
        assert!(Status::Failed.is_failed());
        assert!(!Status::Idle.is_booted());
    }

    #[test]
    fn test_display_is_kebab_case() {
        assert_eq!(Status::BootingEarly.to_string(), "booting-early");
        assert_eq!(Status::Booted.to_string(), "booted");
    }
}
