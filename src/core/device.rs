//! Device class profiles.

use super::constants::{PHONE_GRAVITY, TABLET_GRAVITY};
use serde::{Deserialize, Serialize};

/// Which gravity tuning profile to use once play starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    #[default]
    Phone,
    Tablet,
}

impl DeviceClass {
    /// Vertical gravity applied on entering Play, in m/s².
    pub fn gravity(&self) -> f32 {
        match self {
            Self::Phone => PHONE_GRAVITY,
            Self::Tablet => TABLET_GRAVITY,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "phone" => Some(Self::Phone),
            "tablet" | "ipad" => Some(Self::Tablet),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_profiles() {
        assert!((DeviceClass::Phone.gravity() - (-5.0)).abs() < f32::EPSILON);
        assert!((DeviceClass::Tablet.gravity() - (-10.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse() {
        assert_eq!(DeviceClass::parse("Tablet"), Some(DeviceClass::Tablet));
        assert_eq!(DeviceClass::parse("phone"), Some(DeviceClass::Phone));
        assert_eq!(DeviceClass::parse("watch"), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DeviceClass::Tablet).unwrap();
        assert_eq!(json, "\"tablet\"");
        let parsed: DeviceClass = serde_json::from_str("\"phone\"").unwrap();
        assert_eq!(parsed, DeviceClass::Phone);
    }
}
