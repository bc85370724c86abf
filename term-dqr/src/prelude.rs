//! Prelude for commonly used types and traits in term-dqr.

pub use crate::categorical::CategoricalSummary;
pub use crate::classifier::{ColumnClassification, FeatureCategory};
pub use crate::config::{ExportConfig, ModeTieBreak, ReportConfig};
pub use crate::continuous::{ContinuousSummary, StatValue};
pub use crate::error::{ErrorContext, ReportError, Result};
pub use crate::report::{generate_report, DataQualityReport};
pub use crate::sources::DataSource;
pub use crate::values::ValueKind;
