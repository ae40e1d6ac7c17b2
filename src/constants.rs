// src/constants.rs
//
// Application-wide constants.

/// Directory name used below the platform config and data directories.
pub const APP_DIR_NAME: &str = "cloudnotes";

/// File name of the TOML configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Request timeout for the HTTP collaborators, in seconds.
///
/// No local timeout is imposed on the workflow itself; this only bounds a
/// single HTTP exchange.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User name of a session when the config does not name one.
pub const DEFAULT_USER: &str = "local";

/// Delay in milliseconds after writing HTML file before opening browser.
///
/// The browser needs a brief moment for the file to be fully written
/// before it is opened. Without this delay, the browser may open an empty
/// or incomplete file.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
