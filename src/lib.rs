//! buildprops - layered build configuration for library publishing.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── get           # Resolve a single key
//! │   ├── show          # Every key with its origin
//! │   ├── repos         # Custom Maven repositories
//! │   ├── version       # Git-derived version and tag
//! │   ├── signing       # Signing key check
//! │   ├── name          # Archive file names
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── key           # Configuration keys and their lookup names
//!     ├── source        # Lookup strategies (env, document, properties)
//!     ├── document      # project.toml discovery and dotted lookup
//!     ├── properties    # key=value property files
//!     ├── resolver      # Priority-ordered resolution
//!     ├── repository    # Custom repository entries
//!     ├── signing       # PGP key normalization and the signing gate
//!     ├── version       # Revision, tag and publish suffix from git
//!     ├── process       # Subprocesses with a deadline
//!     └── naming        # Archive and artifact names
//! ```
//!
//! # Resolution order
//!
//! 1. Environment variable
//! 2. `project.toml` in the project directory or up to three parents
//! 3. `local.properties`, then `gradle.properties` in the project root
//! 4. `gradle.properties` in `$GRADLE_USER_HOME` or `~/.gradle`
//!
//! The first non-blank value wins and is returned as written.

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::key::ConfigKey;
pub use crate::core::resolver::{ConfigResolver, Resolved, ResolvedConfig};
pub use crate::core::signing::{prepare, PreparedSigningKey, SigningPlan};
pub use crate::core::version::{VersionDeriver, VersionInfo};
