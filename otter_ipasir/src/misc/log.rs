/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, always with one of the [targets] below.
Rejected protocol calls are logged at `debug`, solve outcomes at `info`, and engine internals at `trace`.

Note, no log implementation is provided.
For a quick look at what's happening, the test suite and the inspect binary install `env_logger`, so something like `RUST_LOG=state=debug` will do.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [state machine](crate::context::ContextState), and rejected calls in particular.
    pub const STATE: &str = "state";

    /// Logs related to the [option registry](crate::config::registry).
    pub const OPTIONS: &str = "options";

    /// Logs related to [BCP](crate::procedures::bcp).
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [analysis](crate::procedures::analysis).
    pub const ANALYSIS: &str = "analysis";

    /// Logs related to [backjumping](crate::procedures::backjump).
    pub const BACKJUMP: &str = "backjump";

    /// Logs related to clause deletion.
    pub const REDUCTION: &str = "reduction";

    /// Logs related to the [clause database](crate::db::clause).
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to [callbacks](crate::context::callbacks).
    pub const CALLBACKS: &str = "callbacks";

    /// Logs related to clauses arriving through the import callback.
    pub const IMPORT: &str = "import";

    /// Logs related to the [C bindings](crate::ipasir::ipasir_two).
    pub const FFI: &str = "ffi";
}
