//! All setting definitions with their default values.

/// A single setting definition.
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Every environment setting the server understands.
pub const DEFAULT_SETTINGS: &[SettingDef] = &[
    SettingDef {
        key: "BIND_ADDRESS",
        default: "0.0.0.0",
        description: "Interface address the HTTP server binds to",
    },
    SettingDef {
        key: "SERVER_PORT",
        default: "5000",
        description: "TCP port the HTTP server listens on",
    },
    SettingDef {
        key: "MAX_UPLOAD_BYTES",
        default: "67108864",
        description: "Maximum accepted request body size in bytes",
    },
];

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS
        .iter()
        .find(|def| def.key == key)
        .map(|def| def.default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::validate_setting;

    #[test]
    fn every_default_passes_validation() {
        for def in DEFAULT_SETTINGS {
            assert!(
                validate_setting(def.key, def.default).is_ok(),
                "default for {} is invalid",
                def.key
            );
        }
    }

    #[test]
    fn unknown_key_has_no_default() {
        assert_eq!(get_default("SERVER_PORT"), Some("5000"));
        assert_eq!(get_default("NOPE"), None);
    }
}
