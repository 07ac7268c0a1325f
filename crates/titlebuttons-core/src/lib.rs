//! titlebuttons-core - stylesheet generation for GTK window controls.
//!
//! The crate turns a [`Config`] snapshot into two override stylesheets, one
//! for GTK 4 and one for GTK 3. Generation is a pure function of the config
//! (plus a timestamp banner); loading and validating the config also lives
//! here so the binary and the tests share one schema.

pub mod color;
pub mod config;
pub mod error;
pub mod logging;
pub mod stylesheet;
pub mod svg;

pub use config::{Button, ButtonConfig, Config, TitleMode};
pub use error::{Error, Result};
pub use stylesheet::{Dialect, GeneratedStylesheet, Stylesheets, generate, generate_at};
