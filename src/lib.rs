//! Stage, validate and push APIMock configuration bundles.
//!
//! An APIMock bundle is a `config.json` descriptor plus a `mock/` directory of
//! JSON response files. `apimock` generates a default bundle, checks that it
//! is structurally sound, and copies it onto an attached Android device with
//! `adb`.
//!
//! # Pipeline
//!
//! A push is all-or-nothing up to the first transfer: the bundle is validated
//! fail-fast, a device is chosen (prompting only when several are attached),
//! and only then are the config file and mock directory copied to the
//! `remote` path recorded in the bundle.
//!
//! # Modules
//!
//! - [`api`]: One orchestration function per command (`init`, `push`, `clean`)
//! - [`bundle`]: Bundle layout, template, store and validator
//! - [`config`]: Tool settings with layered precedence (CLI > env > file > defaults)
//! - [`device`]: Device discovery, selection and the `adb` bridge
//! - [`error`]: Semantic error types for the application
//! - [`reporter`]: Leveled, user-facing console output

pub mod api;
pub mod bundle;
pub mod config;
pub mod device;
pub mod error;
pub mod reporter;
