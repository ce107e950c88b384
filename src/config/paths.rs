//! Canonical local paths for shiksha.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! | Location | Purpose |
//! |----------|---------|
//! | `~/.shiksha/` | Home (overridable via SHIKSHA_HOME or config file) |
//! | `~/.shiksha/session.json` | Access/refresh tokens from `shiksha login` |
//! | `<project>/.shiksha/config.yaml` | Config file, discovered upward from cwd |

/// Directory holding the config file inside a project
pub const CONFIG_DIR: &str = ".shiksha";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Session file name inside the home directory
pub const SESSION_FILE: &str = "session.json";
