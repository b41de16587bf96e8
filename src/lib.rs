//! Piecewise-linear fuzzy sets and single input max-min inference.
//!
//! Terms are defined by ordered `(breakpoint, is_core)` points. Membership is
//! linear between consecutive breakpoints and saturates outside them. A
//! [`FuzzySystem`] maps each temperature term to one regulator term and picks
//! the regulator value where the clipped, aggregated output is highest.
//!
//! ```
//! use fuzzy_regulator::{defaults, InferenceConfig};
//!
//! let system = defaults::system(InferenceConfig::default()).unwrap();
//!
//! assert_eq!(system.calculate_output(23.), 8.);
//! ```

mod config;
pub mod defaults;
mod error;
mod linspace;
mod outputs;
mod range;
mod rules;
mod set;
mod system;
mod terms;
mod variable;

pub use config::{DuplicatePolicy, InferenceConfig, ScanMode, DEFAULT_STEP};
pub use error::{ConfigError, Result, TermKind};
pub use linspace::Linspace;
pub use outputs::Outputs;
pub use range::{FuzzyRange, Shape};
pub use rules::{Rule, Rules};
pub use set::FuzzySet;
pub use system::FuzzySystem;
pub use terms::{TermDefinition, TermGroups};
pub use variable::{TermKey, Variable};
