//! Core of the forecast configuration wizard.
//!
//! Everything here is plain data and pure functions so it runs the same in the
//! browser and in host tests. The Yew components only call the named
//! operations of [`ForecastWizard`].

pub mod catalog;
pub mod controller;
pub mod error;
pub mod granularity;
pub mod payload;
pub mod projection;
pub mod sequencer;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{AbcClass, Line, Process};
pub use controller::{ForecastWizard, Submission};
pub use error::{Result, WizardError};
pub use granularity::{line_ordinal, resolve_target};
pub use payload::build_payload;
pub use projection::{
    AccuracyBand, AppliedFilter, ChartPoint, InfluenceFactor, ProjectedResult, ResultSummary,
    accuracy_band, applied_filters, chart_series, feature_label, project, top_influences,
};
pub use sequencer::{StepSequencer, WizardStep};
pub use state::{ForecastModel, GranularityLevel, WizardState};
