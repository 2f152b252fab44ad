//! SDF friction patcher.
//!
//! Rewrites a Simulation Description Format (SDF) robot model so that the
//! configured wheel and caster links carry ODE friction coefficients on
//! their collision geometry, and strips `<surface>` tags that were placed
//! directly under `<link>` (where the physics engine does not accept them).
//!
//! Typically run after URDF to SDF conversion:
//!
//! ```text
//! xacro k9.urdf.xacro > /tmp/k9.urdf
//! gz sdf -p /tmp/k9.urdf > /tmp/k9_raw.sdf
//! patch-friction /tmp/k9_raw.sdf /tmp/k9.sdf
//! ```
//!
//! # Example
//!
//! ```
//! use sdf_friction::{patch_document, FrictionProfile, XmlDocument};
//!
//! let mut doc = XmlDocument::parse(r#"<sdf><model name="k9_robot"/></sdf>"#).unwrap();
//! let report = patch_document(&mut doc, &FrictionProfile::default()).unwrap();
//! assert_eq!(report.models_matched, 1);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Friction profiles, built-in defaults and YAML loading
//! - [`error`]: Error types and Result alias
//! - [`format`]: Compact coefficient formatting
//! - [`xml`]: Owned XML tree, lookup helpers and serializer
//! - [`patch`]: Model selection, surface removal and friction writing
//! - [`patcher`]: File-to-file driver
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod patch;
pub mod patcher;
pub mod xml;

pub use patcher::patch_file;

pub use config::{FrictionPair, FrictionProfile, LinkFriction};
pub use error::{PatchError, Result};
pub use patch::{patch_document, PatchReport};
pub use xml::XmlDocument;
