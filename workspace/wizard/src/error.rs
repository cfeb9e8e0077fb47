use thiserror::Error;

/// Error types for the forecast wizard
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    /// Horizon outside the supported set (or zero)
    #[error("Invalid forecast horizon: {0} months")]
    InvalidHorizon(u32),

    /// Model tag with no wire mapping
    #[error("Unknown forecasting model: {0}")]
    UnknownModel(String),

    /// Granularity tag with no target-set descriptor
    #[error("Unknown granularity level: {0}")]
    UnknownGranularity(String),

    #[error("Unknown production line: {0}")]
    UnknownLine(String),

    #[error("Unknown process: {0}")]
    UnknownProcess(String),

    #[error("Unknown ABC class: {0}")]
    UnknownClass(String),

    /// SKU granularity selected without any SKU
    #[error("No SKU selected")]
    MissingSku,

    /// Combination granularity with no usable line, process or class filter
    #[error("Combination requires at least one line, process or class filter")]
    EmptyCombination,

    /// The result step does not accept edits
    #[error("The wizard is showing a result and cannot be edited")]
    ReadOnlyStep,

    /// A prediction request is already in flight
    #[error("A forecast request is already pending")]
    SubmissionPending,

    #[error("Forecasts can only be submitted from the review step")]
    NotOnReviewStep,
}

/// Type alias for Result with WizardError
pub type Result<T> = std::result::Result<T, WizardError>;
