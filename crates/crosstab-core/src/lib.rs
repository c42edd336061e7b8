//! # crosstab-core
//!
//! **Chi-square family hypothesis tests with a serialization-safe wire
//! contract.**
//!
//! crosstab-core is the computation engine behind the crosstab service.
//! Four procedures over raw categorical counts:
//!
//! - **Goodness-of-fit**: 1-D observed counts against a uniform or custom
//!   expected distribution
//! - **Independence**: association between the row and column variables of
//!   a 2-D contingency table
//! - **Homogeneity**: the same numeric core as independence, framed as
//!   distribution equality across groups
//! - **Fisher's exact**: exact conditional inference for 2x2 tables
//!
//! Every run produces a result record carrying the statistic, p-value,
//! degrees of freedom, effect size where defined, both hypotheses, and a
//! plain-language interpretation.
//!
//! ## Quick Start
//!
//! ```
//! use crosstab_core::{TestRequest, dispatch, sanitize};
//!
//! let request: TestRequest = serde_json::from_str(
//!     r#"{
//!         "testType": "chi-square",
//!         "subtype": "goodness-of-fit",
//!         "observed": [12, 9, 11, 8],
//!         "distribution": {"type": "uniform"},
//!         "categoryLabels": ["spring", "summer", "autumn", "winter"]
//!     }"#,
//! )
//! .unwrap();
//!
//! let report = dispatch(&request).unwrap();
//! assert!(report.p_value().unwrap() > 0.05);
//!
//! let wire = sanitize::to_wire(&report).unwrap();
//! assert_eq!(wire["df"], 3);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! TestRequest ──► dispatch ──► computor ──► TestReport ──► sanitize::to_wire
//!                    │            │
//!                    │            ├── table      (validation, expected counts)
//!                    │            ├── stat       (chi-square sf, hypergeometric)
//!                    │            ├── effect     (Cramér's V)
//!                    │            └── interpret  (decision narrative)
//!                    │
//!                    └── EngineError (unsupported / validation / internal)
//! ```
//!
//! The engine is pure and synchronous, with no I/O and no shared state.
//! Bad input never panics; it comes back as an
//! [`EngineError`] variant. Non-finite numbers never reach the wire:
//! scalars pass through [`sanitize::finite`] and whole records leave
//! through [`sanitize::to_wire`].

pub mod computor;
pub mod dispatch;
pub mod effect;
pub mod error;
pub mod interpret;
pub mod report;
pub mod request;
pub mod sanitize;
pub mod stat;
pub mod table;

pub use dispatch::{SUBTYPES, TEST_FAMILY, dispatch};
pub use error::EngineError;
pub use report::{
    ContingencyReport, Df, FisherExactReport, GoodnessOfFitReport, TestReport,
};
pub use request::{CodeId, Distribution, Observed, TestRequest};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
