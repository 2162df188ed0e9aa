/// Application name
pub const APP_NAME: &str = "Scriptstore";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of an owner's main configuration, relative to its data directory
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Separator splitting hierarchical keys into path segments
pub const DEFAULT_PATH_SEPARATOR: char = '.';

/// Where a main configuration that failed to parse is copied before the
/// owner starts over with an empty one
pub const BROKEN_CONFIG_FILE: &str = "config.broken.yml";
