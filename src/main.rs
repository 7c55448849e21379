//! Binary entrypoint that starts the suggestion server.

use std::process::ExitCode;

use search_suggestions::start_suggestions;

/// Start the suggestion HTTP server.
fn main() -> ExitCode {
    start_suggestions::run()
}
