//! Error types with diagnostics using miette
//!
//! Only engine invocation failures are errors. Structural problems in the
//! family data (dangling ids, too many parents) are reported through
//! [`ValidationResult`](crate::model::ValidationResult) instead.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while building or overriding a [`PedigreeConfig`](crate::config::PedigreeConfig)
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {reason}")]
    #[diagnostic(
        code(pedigree::config::invalid_value),
        help("sizes and spacings must be finite; symbol size, stroke widths and vertical spacing must be positive")
    )]
    InvalidValue {
        field: &'static str,
        reason: NumericError,
    },

    #[error("unknown configuration key: {key}")]
    #[diagnostic(
        code(pedigree::config::unknown_key),
        help("keys look like `symbols.size` or `connections.marriageLineLength`")
    )]
    UnknownKey { key: String },
}

// ============================================================================
// Layout Errors
// ============================================================================

/// Errors that abort a layout pass
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("cycle detected in parent graph at individual `{individual}`")]
    #[diagnostic(
        code(pedigree::layout::cycle_detected),
        help("an individual cannot be its own ancestor; check the parent ids along this line")
    )]
    CycleDetected { individual: String },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors raised by rendering collaborators
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("renderer used before initialize()")]
    #[diagnostic(code(pedigree::render::not_initialized))]
    NotInitialized,

    #[error("nothing has been rendered yet")]
    #[diagnostic(
        code(pedigree::render::nothing_rendered),
        help("call render() with a layout before exporting")
    )]
    NothingRendered,
}
