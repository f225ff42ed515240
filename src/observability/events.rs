//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events during attribute compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file loaded
    ConfigLoaded,
    /// Type registry populated
    RegistryLoaded,
    /// A preset option table was derived
    PresetDerived,
    /// Constraints validated against a type schema
    ConstraintsResolved,
    /// An attribute definition was normalized
    AttributeTransformed,
    /// An attribute definition was rejected
    AttributeRejected,
    /// A default specification was rejected
    DefaultRejected,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RegistryLoaded => "REGISTRY_LOADED",
            Event::PresetDerived => "PRESET_DERIVED",
            Event::ConstraintsResolved => "CONSTRAINTS_RESOLVED",
            Event::AttributeTransformed => "ATTRIBUTE_TRANSFORMED",
            Event::AttributeRejected => "ATTRIBUTE_REJECTED",
            Event::DefaultRejected => "DEFAULT_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ConfigLoaded | Event::RegistryLoaded => Severity::Info,
            Event::PresetDerived | Event::ConstraintsResolved | Event::AttributeTransformed => {
                Severity::Trace
            }
            Event::AttributeRejected | Event::DefaultRejected => Severity::Warn,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::AttributeRejected.as_str(), "ATTRIBUTE_REJECTED");
        assert_eq!(Event::PresetDerived.to_string(), "PRESET_DERIVED");
    }

    #[test]
    fn test_rejections_are_warnings() {
        assert_eq!(Event::AttributeRejected.severity(), Severity::Warn);
        assert_eq!(Event::DefaultRejected.severity(), Severity::Warn);
        assert_eq!(Event::ConstraintsResolved.severity(), Severity::Trace);
    }
}
