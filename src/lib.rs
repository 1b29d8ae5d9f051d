pub mod behaviors;
pub mod companion;
pub mod config;
pub mod context;
pub mod interfaces;
pub mod logging;
pub mod suite;
use contract_mock::MockError;
use miette::Diagnostic;

pub use companion::CompanionMode;
pub use config::HarnessConfig;
pub use context::{MockRegistry, MockSet, TestContext};
pub use suite::{Scope, Suite, SuiteReport};

/// Result type alias for the harness
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Error types for the harness
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum HarnessError {
    #[error("Mock '{0}' is not registered")]
    #[diagnostic(
        code(harness::missing_mock),
        help("Declare the collaborator in the suite's MockSet, e.g. `MockSet::exchanger()`, before applying behaviors that program it.")
    )]
    MissingMock(String),

    #[error("Invalid parameter: {0}")]
    #[diagnostic(
        code(harness::invalid_parameter),
        help("Setting values are decimal integers such as \"180\"; scale fixed-point values before passing them.")
    )]
    InvalidParameter(String),

    #[error("Mock call failed: {0}")]
    #[diagnostic(
        code(harness::mock_failed),
        help("Check the method name and argument count against the collaborator's interface descriptor.")
    )]
    Mock(#[from] MockError),

    #[error("Hook '{hook}' failed: {reason}")]
    #[diagnostic(code(harness::hook_failed))]
    HookFailed { hook: String, reason: String },

    #[error("Test failed: {0}")]
    #[diagnostic(code(harness::test_failed))]
    TestFailed(String),

    #[error("No case named '{0}'")]
    #[diagnostic(code(harness::unknown_case))]
    UnknownCase(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(harness::config_error),
        help("Check .exchanger-behaviors.toml; companion mode is \"single-instance\" or \"per-key\".")
    )]
    ConfigError(String),

    #[error("Report error: {0}")]
    #[diagnostic(code(harness::report_error))]
    ReportError(String),
}
