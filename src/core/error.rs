//=========================================================================
// Error Types
//=========================================================================
//
// Failure taxonomy for the UI subsystem.
//
// Errors are produced internally and absorbed at the orchestrator
// boundary, where they are logged. Nothing here is ever surfaced to the
// update loop as a panic.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== ScreenError =========================================================

/// Configuration and lifecycle failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    /// The key was never registered (or screens are not created yet).
    #[error("screen {0} is not registered")]
    UnknownScreen(String),

    /// A second registration for a key that already has metadata.
    #[error("screen {0} is already registered")]
    DuplicateRegistration(String),

    /// `initialize_screens()` was called before a render root was bound.
    #[error("render root not bound, call initialize() first")]
    RootNotBound,

    /// Template could not be resolved for a screen.
    #[error("template for screen {screen} unavailable: {source}")]
    Template {
        screen: String,
        #[source]
        source: TemplateError,
    },
}

//=== TemplateError =======================================================

/// Structural template lookup failures. Always non-fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template path is empty")]
    EmptyPath,

    #[error("template '{0}' not found")]
    NotFound(String),
}

//=========================================================================
// Unit Tests
//=========================================================================
