//! The IPASIR-2 protocol, as a Rust trait and as C bindings.
//!
//! - [Ipasir2] is the protocol surface, implemented by each [GenericContext] by way of the inherent methods of a context.
//! - [ipasir_two] contains C bindings to the protocol, for linking the library to a C program.
//!
//! Information about the protocol may be found at <https://github.com/ipasir2/ipasir2>.
//!
//! Note, 'solver' and 'context' are synonymous in this module.\
//! Though, strictly, 'solver' is only used as, or when referring to, the parameter of a C function, and 'context' is only used to refer to an instance of the context structure.
//!
//! # Compiling a library
//!
//! By default, cargo does not build a library suitable for to linking to a C program.\
//! For details on building a suitable library, see: <https://doc.rust-lang.org/reference/linkage.html>
//!
//! # Literals
//!
//! Literals added through the protocol are used as given, so the literal -83 requires internal structures to grow to allow for 83 atoms.
//! Atoms absent from every clause and assumption still have a value in a model, and are free to take either value.
//!
//! # Implementation details
//!
//! ## Bundles
//!
//! For interaction through C a context is bundled together with a few structures in a [ContextBundle].
//! These structures hold foreign callbacks, the C view of the option registry, and the state needed to accept calls made from within a callback during a solve.

use std::{ffi::CString, sync::OnceLock};

use crate::{
    config::registry::{OptionDescriptor, OptionValue},
    context::{callbacks::Callback, ContextState, GenericContext},
    reports::Report,
    structures::{literal::CLiteral, Redundancy},
    types::err::ErrorKind,
};

mod context_bundle;
pub use context_bundle::{ContextBundle, Reentry};

pub mod ipasir_two;

/// The signature of the solver, written (once) when needed using [env!].
pub static IPASIR_SIGNATURE: OnceLock<CString> = OnceLock::new();

/// The name and version of the library.
pub fn signature() -> &'static CString {
    IPASIR_SIGNATURE.get_or_init(|| {
        let text = format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        // The package name and version never contain a nul byte.
        CString::new(text).unwrap_or_default()
    })
}

/// The operations of the IPASIR-2 protocol.
///
/// Each operation is legal in some [states](ContextState), and returns [InvalidState](ErrorKind::InvalidState) without effect in others.
/// Release is by [Drop], and so a solver cannot be released during a solve.
///
/// ```rust
/// # use otter_ipasir::context::Context;
/// # use otter_ipasir::ipasir::Ipasir2;
/// # use otter_ipasir::reports::Report;
/// # use otter_ipasir::structures::Redundancy;
/// fn first_model<S: Ipasir2>(solver: &mut S) -> Vec<i32> {
///     assert!(solver.add(&[1, -2], Redundancy::None).is_ok());
///     assert!(solver.add(&[2, 3], Redundancy::None).is_ok());
///     assert_eq!(solver.solve(&[]), Ok(Report::Satisfiable));
///     (1..=3).filter_map(|atom| solver.val(atom).ok()).collect()
/// }
///
/// let model = first_model(&mut Context::default());
/// assert_eq!(model.len(), 3);
/// assert!(model.contains(&1) || model.contains(&-2));
/// ```
pub trait Ipasir2 {
    /// The name and version of the solver.
    fn signature() -> &'static str
    where
        Self: Sized,
    {
        signature().to_str().unwrap_or_default()
    }

    /// The state of the solver.
    fn state(&self) -> ContextState;

    /// Descriptors of every option supported.
    fn options(&self) -> Result<&[OptionDescriptor], ErrorKind>;

    /// The descriptor of the option named `name`.
    fn option_handle(&self, name: &str) -> Result<OptionDescriptor, ErrorKind>;

    /// Sets the option of `descriptor` to `value`, at `index` for indexed options.
    fn set_option(
        &mut self,
        descriptor: &OptionDescriptor,
        value: OptionValue,
        index: i64,
    ) -> Result<(), ErrorKind>;

    /// The value of the option of `descriptor`, at `index` for indexed options.
    fn option_value(
        &self,
        descriptor: &OptionDescriptor,
        index: i64,
    ) -> Result<OptionValue, ErrorKind>;

    /// Adds `clause`, declared to have redundancy `redundancy`.
    fn add(&mut self, clause: &[i32], redundancy: Redundancy) -> Result<(), ErrorKind>;

    /// Stages `literal` as an assumption of the next solve.
    fn assume(&mut self, literal: i32) -> Result<(), ErrorKind>;

    /// Solves under the staged assumptions, followed by `assumptions`.
    fn solve(&mut self, assumptions: &[i32]) -> Result<Report, ErrorKind>;

    /// The value of `literal` in the model of the last solve.
    fn val(&self, literal: i32) -> Result<i32, ErrorKind>;

    /// Whether the assumption on the atom of `literal` is part of the failure core of the last solve.
    fn failed(&self, literal: i32) -> Result<bool, ErrorKind>;

    /// The size of the assignment stack.
    fn assignment_size(&self) -> Result<usize, ErrorKind>;

    /// The literal at `index` of the assignment stack.
    fn assignment(&self, index: usize) -> Result<CLiteral, ErrorKind>;

    /// Registers a callback, replacing any of the same kind.
    fn register_callback(&mut self, callback: Callback) -> Result<(), ErrorKind>;
}

impl<R: rand::Rng + rand::SeedableRng> Ipasir2 for GenericContext<R> {
    fn state(&self) -> ContextState {
        GenericContext::state(self)
    }

    fn options(&self) -> Result<&[OptionDescriptor], ErrorKind> {
        GenericContext::options(self)
    }

    fn option_handle(&self, name: &str) -> Result<OptionDescriptor, ErrorKind> {
        GenericContext::option_handle(self, name)
    }

    fn set_option(
        &mut self,
        descriptor: &OptionDescriptor,
        value: OptionValue,
        index: i64,
    ) -> Result<(), ErrorKind> {
        GenericContext::set_option(self, descriptor, value, index)
    }

    fn option_value(
        &self,
        descriptor: &OptionDescriptor,
        index: i64,
    ) -> Result<OptionValue, ErrorKind> {
        GenericContext::option_value(self, descriptor, index)
    }

    fn add(&mut self, clause: &[i32], redundancy: Redundancy) -> Result<(), ErrorKind> {
        GenericContext::add(self, clause, redundancy)
    }

    fn assume(&mut self, literal: i32) -> Result<(), ErrorKind> {
        GenericContext::assume(self, literal)
    }

    fn solve(&mut self, assumptions: &[i32]) -> Result<Report, ErrorKind> {
        GenericContext::solve(self, assumptions)
    }

    fn val(&self, literal: i32) -> Result<i32, ErrorKind> {
        GenericContext::val(self, literal)
    }

    fn failed(&self, literal: i32) -> Result<bool, ErrorKind> {
        GenericContext::failed(self, literal)
    }

    fn assignment_size(&self) -> Result<usize, ErrorKind> {
        GenericContext::assignment_size(self)
    }

    fn assignment(&self, index: usize) -> Result<CLiteral, ErrorKind> {
        GenericContext::assignment(self, index)
    }

    fn register_callback(&mut self, callback: Callback) -> Result<(), ErrorKind> {
        GenericContext::register_callback(self, callback)
    }
}
