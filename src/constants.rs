//! Application-wide constants.

/// Human-readable application name
pub const APP_NAME: &str = "keypadgen";

/// Directory name under the platform config dir
pub const APP_CONFIG_DIR_NAME: &str = "keypadgen";

/// Environment variable that overrides the config directory (used by tests)
pub const CONFIG_DIR_ENV: &str = "KEYPADGEN_CONFIG_DIR";
