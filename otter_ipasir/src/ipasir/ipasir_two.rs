//! Bindings for the IPASIR-2 API.
//!
//! Every function returns an [ipasir2_errorcode], and any value is written through an out-parameter.
//! A null solver, or a null out-parameter, is [IPASIR2_E_INVALID_ARGUMENT](ipasir2_errorcode::IPASIR2_E_INVALID_ARGUMENT).
//!
//! # Calls during a solve
//!
//! While [ipasir2_solve] is in progress the solver may be called from within a callback:
//! - [ipasir2_add], from within the import callback, offers a clause to the solve. At most one clause may be offered per call of the import callback, and the declared redundancy of the clause must satisfy the pledge of the callback.
//! - The `ipasir2_set_*` functions replace the foreign callback, which takes effect from the next invocation.
//! - [ipasir2_options] and [ipasir2_get_option_handle] read the (fixed) option table.
//!
//! Any other call is [IPASIR2_E_INVALID_STATE](ipasir2_errorcode::IPASIR2_E_INVALID_STATE), including [ipasir2_release].
//!
//! # Options
//!
//! Only integer options are listed by [ipasir2_options], as the bounds of an [ipasir2_option] are integers.
//! Options with floating point values are available through the [Rust interface](crate::ipasir::Ipasir2).

use crate::{
    config::registry::{OptionDescriptor, OptionValue},
    context::{callbacks::MINIMUM_IMPORT_PLEDGE, legality::Operation, Context, ContextState},
    ipasir::{signature, ContextBundle, Reentry},
    misc::log::targets::{self},
    structures::{
        literal::{checked_literal, CLiteral},
        Redundancy,
    },
    types::err::ErrorKind,
};

use std::ffi::{c_char, c_int, c_void, CStr};

/// Called during a solve, with a non-zero return requesting the solve stop.
pub type TerminateFn = extern "C" fn(data: *mut c_void) -> c_int;

/// Called with a zero-terminated learnt clause.
pub type ExportFn = extern "C" fn(data: *mut c_void, clause: *const i32);

/// Called for a clause, which may be offered by a call to [ipasir2_add].
pub type ImportFn = extern "C" fn(data: *mut c_void, pledge: c_int);

/// Called with zero-terminated sets of newly assigned and newly unassigned literals.
pub type NotifyFn = extern "C" fn(data: *mut c_void, assigned: *const i32, unassigned: *const i32);

/// Codes used to indicate the success or failure of a function call.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub enum ipasir2_errorcode {
    IPASIR2_E_OK = 0,
    IPASIR2_E_UNKNOWN = 1,
    IPASIR2_E_UNSUPPORTED,
    IPASIR2_E_UNSUPPORTED_ARGUMENT,
    IPASIR2_E_UNSUPPORTED_OPTION,
    IPASIR2_E_INVALID_STATE,
    IPASIR2_E_INVALID_ARGUMENT,
    IPASIR2_E_INVALID_OPTION_VALUE,
}

impl From<ErrorKind> for ipasir2_errorcode {
    fn from(value: ErrorKind) -> Self {
        match value {
            ErrorKind::Unknown => Self::IPASIR2_E_UNKNOWN,
            ErrorKind::Unsupported => Self::IPASIR2_E_UNSUPPORTED,
            ErrorKind::UnsupportedArgument => Self::IPASIR2_E_UNSUPPORTED_ARGUMENT,
            ErrorKind::OptionUnknown => Self::IPASIR2_E_UNSUPPORTED_OPTION,
            ErrorKind::InvalidState => Self::IPASIR2_E_INVALID_STATE,
            ErrorKind::InvalidArgument => Self::IPASIR2_E_INVALID_ARGUMENT,
            ErrorKind::OptionInvalidValue => Self::IPASIR2_E_INVALID_OPTION_VALUE,
        }
    }
}

impl<T> From<Result<T, ErrorKind>> for ipasir2_errorcode {
    fn from(value: Result<T, ErrorKind>) -> Self {
        match value {
            Ok(_) => Self::IPASIR2_E_OK,
            Err(e) => e.into(),
        }
    }
}

/// States of the context, matching [ContextState].
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub enum ipasir2_state {
    IPASIR2_S_CONFIG = 0,
    IPASIR2_S_INPUT = 1,
    IPASIR2_S_SAT,
    IPASIR2_S_UNSAT,
    IPASIR2_S_SOLVING,
}

impl From<ContextState> for ipasir2_state {
    fn from(value: ContextState) -> Self {
        match value {
            ContextState::Configuration => Self::IPASIR2_S_CONFIG,
            ContextState::Input => Self::IPASIR2_S_INPUT,
            ContextState::Satisfiable => Self::IPASIR2_S_SAT,
            ContextState::Unsatisfiable => Self::IPASIR2_S_UNSAT,
            ContextState::Solving => Self::IPASIR2_S_SOLVING,
        }
    }
}

/// IPASIR Configuration Options
#[allow(non_camel_case_types)]
#[derive(Debug)]
#[repr(C)]
pub struct ipasir2_option {
    /// Unique option identifier.
    pub name: *const c_char,

    /// Minimum allowed value for the option.
    pub min: i64,

    /// Maximum allowed value for the option.
    pub max: i64,

    /// Maximal state in which the option may be set.
    pub max_state: ipasir2_state,

    /// Specifies if the option is eligible for use by automatic tuners.
    pub tunable: c_int,

    /// Specifies if the option may be set per variable.
    pub indexed: c_int,

    /// An opaque pointer for internal use in the setter function.
    pub handle: *const c_void,
}

impl ipasir2_option {
    /// The option which terminates an option table.
    pub(crate) fn terminator() -> Self {
        ipasir2_option {
            name: std::ptr::null(),
            min: 0,
            max: 0,
            max_state: ipasir2_state::IPASIR2_S_CONFIG,
            tunable: 0,
            indexed: 0,
            handle: std::ptr::null(),
        }
    }
}

use ipasir2_errorcode::*;

/// The reentry state of the bundle at `solver`, if `solver` is not null.
///
/// # Safety
/// `solver` must be null or a solver from [ipasir2_init] which has not been released.
/// Only the boxed reentry state is borrowed, and so a solve may be in progress.
unsafe fn reentry<'a>(solver: *mut c_void) -> Option<&'a Reentry> {
    let bundle = solver as *const ContextBundle;
    if bundle.is_null() {
        return None;
    }
    Some(&*(*bundle).reentry)
}

/// The bundle at `solver`, so long as no solve is in progress.
///
/// # Safety
/// As [reentry].
unsafe fn idle_bundle<'a>(solver: *mut c_void) -> Result<&'a mut ContextBundle, ipasir2_errorcode> {
    let reentry = reentry(solver).ok_or(IPASIR2_E_INVALID_ARGUMENT)?;
    if reentry.solving.get() {
        log::debug!(target: targets::FFI, "Call rejected during a solve");
        return Err(IPASIR2_E_INVALID_STATE);
    }
    Ok(&mut *(solver as *mut ContextBundle))
}

/// A slice from a pointer and length, with a null pointer allowed only for an empty slice.
///
/// # Safety
/// If not null, `pointer` must point to `length` readable values.
unsafe fn slice_from<'a>(
    pointer: *const i32,
    length: c_int,
) -> Result<&'a [i32], ipasir2_errorcode> {
    let length = usize::try_from(length).map_err(|_| IPASIR2_E_INVALID_ARGUMENT)?;
    match (pointer.is_null(), length) {
        (true, 0) => Ok(&[]),
        (true, _) => Err(IPASIR2_E_INVALID_ARGUMENT),
        (false, _) => Ok(std::slice::from_raw_parts(pointer, length)),
    }
}

macro_rules! try_code {
    ($e:expr) => {
        match $e {
            Ok(value) => value,
            Err(code) => return code,
        }
    };
}

/// Writes the name and version of this library to the given pointer.
///
/// # Safety
/// Writes the signature to a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_signature(signature_ptr: *mut *const c_char) -> ipasir2_errorcode {
    if signature_ptr.is_null() {
        return IPASIR2_E_INVALID_ARGUMENT;
    }
    std::ptr::write(signature_ptr, signature().as_ptr());
    IPASIR2_E_OK
}

/// Initialises a solver and binds the given pointer to its address.
///
/// # Safety
/// Releases the initialised solver to a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_init(solver: *mut *mut c_void) -> ipasir2_errorcode {
    if solver.is_null() {
        return IPASIR2_E_INVALID_ARGUMENT;
    }
    let the_bundle = Box::new(ContextBundle::default());
    log::trace!(target: targets::FFI, "Initialised a solver");
    std::ptr::write(solver, Box::into_raw(the_bundle) as *mut c_void);
    IPASIR2_E_OK
}

/// Releases the bound solver, so long as it is not solving.
///
/// # Safety
/// Recovers a context bundle from a raw pointer, and drops it.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_release(solver: *mut c_void) -> ipasir2_errorcode {
    let bundle = try_code!(idle_bundle(solver));
    if let Err(e) = bundle.context.check(Operation::Release) {
        return e.into();
    }
    drop(Box::from_raw(solver as *mut ContextBundle));
    log::trace!(target: targets::FFI, "Released a solver");
    IPASIR2_E_OK
}

/// Writes a pointer to the supported options, terminated by an option whose name is null.
///
/// The options remain valid until the solver is released.
///
/// # Safety
/// Reads the option table of a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_options(
    solver: *mut c_void,
    options: *mut *const ipasir2_option,
) -> ipasir2_errorcode {
    let bundle = solver as *const ContextBundle;
    if bundle.is_null() || options.is_null() {
        return IPASIR2_E_INVALID_ARGUMENT;
    }
    let table: &[ipasir2_option] = &(*bundle).c_options;
    std::ptr::write(options, table.as_ptr());
    IPASIR2_E_OK
}

/// Writes the handle to the option with the given name.
///
/// # Safety
/// Reads the option table of a context bundle from a raw pointer, and a name from a C string.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_get_option_handle(
    solver: *mut c_void,
    name: *const c_char,
    handle: *mut *const ipasir2_option,
) -> ipasir2_errorcode {
    let bundle = solver as *const ContextBundle;
    if bundle.is_null() || name.is_null() || handle.is_null() {
        return IPASIR2_E_INVALID_ARGUMENT;
    }
    let name = CStr::from_ptr(name);
    let names: &[std::ffi::CString] = &(*bundle).c_names;
    match names.iter().position(|known| known.as_c_str() == name) {
        Some(index) => {
            let table: &[ipasir2_option] = &(*bundle).c_options;
            std::ptr::write(handle, &table[index]);
            IPASIR2_E_OK
        }
        None => {
            log::debug!(target: targets::OPTIONS, "Unknown option: {name:?}");
            IPASIR2_E_UNSUPPORTED_OPTION
        }
    }
}

/// Sets the value of the option of the given handle, at `index` if the option is indexed.
///
/// # Safety
/// Recovers a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_set_option(
    solver: *mut c_void,
    handle: *const ipasir2_option,
    value: i64,
    index: i64,
) -> ipasir2_errorcode {
    let bundle = solver as *mut ContextBundle;
    if bundle.is_null() || handle.is_null() {
        return IPASIR2_E_INVALID_ARGUMENT;
    }

    let table: &[ipasir2_option] = &(*bundle).c_options;
    let descriptors: &[OptionDescriptor] = &(*bundle).descriptors;
    let Some(position) = table[..descriptors.len()]
        .iter()
        .position(|option| std::ptr::eq(option, handle))
    else {
        return IPASIR2_E_UNSUPPORTED_OPTION;
    };
    let descriptor = &descriptors[position];
    let value = OptionValue::Int(value);

    if (*bundle).reentry.solving.get() {
        return match descriptor.admits(value) {
            false => IPASIR2_E_INVALID_OPTION_VALUE,
            true => IPASIR2_E_INVALID_STATE,
        };
    }

    let context: &mut Context = &mut (*bundle).context;
    context.set_option(descriptor, value, index).into()
}

/// Adds a clause to the solver, or offers a clause from within the import callback.
///
/// # Safety
/// Recovers a context bundle and takes a clause from raw pointers.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_add(
    solver: *mut c_void,
    clause: *const i32,
    clause_len: c_int,
    redundancy: c_int,
) -> ipasir2_errorcode {
    let reentry = try_code!(reentry(solver).ok_or(IPASIR2_E_INVALID_ARGUMENT));
    let clause = try_code!(slice_from(clause, clause_len));
    let Some(redundancy) = Redundancy::from_int(redundancy) else {
        return IPASIR2_E_INVALID_ARGUMENT;
    };

    if reentry.solving.get() {
        return offer(reentry, clause, redundancy).into();
    }

    let bundle = try_code!(idle_bundle(solver));
    bundle.context.add(clause, redundancy).into()
}

/// Notes `clause` as the offer of the current call of the import callback.
fn offer(reentry: &Reentry, clause: &[i32], redundancy: Redundancy) -> Result<(), ErrorKind> {
    if !reentry.import_window.get() {
        log::debug!(target: targets::FFI, "Add during a solve outside of the import callback");
        return Err(ErrorKind::InvalidState);
    }
    let mut pending = reentry.pending.borrow_mut();
    if pending.is_some() {
        return Err(ErrorKind::InvalidState);
    }
    if !Redundancy::satisfies(reentry.pledge.get(), redundancy) {
        return Err(ErrorKind::UnsupportedArgument);
    }
    let clause = clause
        .iter()
        .map(|&literal| checked_literal(literal))
        .collect::<Result<Vec<CLiteral>, _>>()?;
    *pending = Some((clause, redundancy));
    Ok(())
}

/// Stages an assumption for the next solve.
///
/// # Safety
/// Recovers a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_assume(solver: *mut c_void, lit: i32) -> ipasir2_errorcode {
    let bundle = try_code!(idle_bundle(solver));
    bundle.context.assume(lit).into()
}

/// Solves the formula under the staged assumptions followed by the given assumptions, and writes 10 (satisfiable), 20 (unsatisfiable), or 0 (unknown) to `result`.
///
/// # Safety
/// Recovers a context bundle and takes assumptions from raw pointers.
/// The context is borrowed for the duration of the solve, and calls from within callbacks go through the reentry state.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_solve(
    solver: *mut c_void,
    result: *mut c_int,
    assumptions: *const i32,
    assumptions_len: c_int,
) -> ipasir2_errorcode {
    let reentry = try_code!(reentry(solver).ok_or(IPASIR2_E_INVALID_ARGUMENT));
    if reentry.solving.get() {
        return IPASIR2_E_INVALID_STATE;
    }
    if result.is_null() {
        return IPASIR2_E_INVALID_ARGUMENT;
    }
    let assumptions = try_code!(slice_from(assumptions, assumptions_len));

    let bundle = solver as *mut ContextBundle;
    let context: &mut Context = &mut (*bundle).context;

    reentry.solving.set(true);
    let outcome = context.solve(assumptions);
    reentry.solving.set(false);

    match outcome {
        Ok(report) => {
            std::ptr::write(result, report.code() as c_int);
            IPASIR2_E_OK
        }
        Err(e) => e.into(),
    }
}

/// Writes the value of `lit` in the model of the last solve: `lit` if true, `-lit` if false, and 0 if unknown to the solver.
///
/// # Safety
/// Recovers a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_val(
    solver: *mut c_void,
    lit: i32,
    result: *mut i32,
) -> ipasir2_errorcode {
    let bundle = try_code!(idle_bundle(solver));
    if result.is_null() {
        return IPASIR2_E_INVALID_ARGUMENT;
    }
    let value = try_code!(bundle.context.val(lit).map_err(ipasir2_errorcode::from));
    std::ptr::write(result, value);
    IPASIR2_E_OK
}

/// Writes 1 if the assumption on the atom of `lit` is part of the failure core of the last solve, and 0 otherwise.
///
/// # Safety
/// Recovers a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_failed(
    solver: *mut c_void,
    lit: i32,
    result: *mut c_int,
) -> ipasir2_errorcode {
    let bundle = try_code!(idle_bundle(solver));
    if result.is_null() {
        return IPASIR2_E_INVALID_ARGUMENT;
    }
    let failed = try_code!(bundle.context.failed(lit).map_err(ipasir2_errorcode::from));
    std::ptr::write(result, failed as c_int);
    IPASIR2_E_OK
}

/// Writes the size of the assignment stack.
///
/// # Safety
/// Recovers a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_assignment_size(
    solver: *mut c_void,
    result: *mut i32,
) -> ipasir2_errorcode {
    let bundle = try_code!(idle_bundle(solver));
    if result.is_null() {
        return IPASIR2_E_INVALID_ARGUMENT;
    }
    let size = try_code!(bundle.context.assignment_size().map_err(ipasir2_errorcode::from));
    let Ok(size) = i32::try_from(size) else {
        return IPASIR2_E_UNKNOWN;
    };
    std::ptr::write(result, size);
    IPASIR2_E_OK
}

/// Writes the literal at `index` of the assignment stack.
///
/// # Safety
/// Recovers a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_assignment(
    solver: *mut c_void,
    index: i32,
    result: *mut i32,
) -> ipasir2_errorcode {
    let bundle = try_code!(idle_bundle(solver));
    if result.is_null() {
        return IPASIR2_E_INVALID_ARGUMENT;
    }
    let Ok(index) = usize::try_from(index) else {
        return IPASIR2_E_INVALID_ARGUMENT;
    };
    let literal = try_code!(bundle.context.assignment(index).map_err(ipasir2_errorcode::from));
    std::ptr::write(result, literal);
    IPASIR2_E_OK
}

/// Sets (or, with a null callback, clears) the terminate callback.
///
/// # Safety
/// Recovers the reentry state of a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_set_terminate(
    solver: *mut c_void,
    data: *mut c_void,
    callback: Option<TerminateFn>,
) -> ipasir2_errorcode {
    let reentry = try_code!(reentry(solver).ok_or(IPASIR2_E_INVALID_ARGUMENT));
    reentry.terminate.set(callback.map(|callback| (callback, data)));
    IPASIR2_E_OK
}

/// Sets (or, with a null callback, clears) the export callback.
///
/// Clauses longer than `max_length` are not exported, and a `max_length` of -1 exports clauses of any length.
///
/// # Safety
/// Recovers the reentry state of a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_set_export(
    solver: *mut c_void,
    data: *mut c_void,
    max_length: c_int,
    callback: Option<ExportFn>,
) -> ipasir2_errorcode {
    let reentry = try_code!(reentry(solver).ok_or(IPASIR2_E_INVALID_ARGUMENT));
    let max_length = match max_length {
        -1 => None,
        length => match usize::try_from(length) {
            Ok(length) => Some(length),
            Err(_) => return IPASIR2_E_INVALID_ARGUMENT,
        },
    };
    reentry.max_length.set(max_length);
    reentry.export.set(callback.map(|callback| (callback, data)));
    IPASIR2_E_OK
}

/// Sets (or, with a null callback, clears) the import callback.
///
/// Each clause offered by the callback must have a redundancy satisfying `pledge`.
///
/// # Safety
/// Recovers the reentry state of a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_set_import(
    solver: *mut c_void,
    data: *mut c_void,
    pledge: c_int,
    callback: Option<ImportFn>,
) -> ipasir2_errorcode {
    let reentry = try_code!(reentry(solver).ok_or(IPASIR2_E_INVALID_ARGUMENT));
    let Some(pledge) = Redundancy::from_int(pledge) else {
        return IPASIR2_E_INVALID_ARGUMENT;
    };
    if callback.is_some() && pledge < MINIMUM_IMPORT_PLEDGE {
        log::debug!(target: targets::CALLBACKS, "Import pledge {pledge} is unsupported");
        return IPASIR2_E_UNSUPPORTED_ARGUMENT;
    }
    reentry.pledge.set(pledge);
    reentry.import.set(callback.map(|callback| (callback, data)));
    IPASIR2_E_OK
}

/// Sets (or, with a null callback, clears) the notify callback.
///
/// Outside of a solve, the callback starts from an empty view of the assignment, and so is first called with every assigned literal.
/// During a solve, the callback continues from the view of the callback it replaces.
///
/// # Safety
/// Recovers the reentry state of a context bundle from a raw pointer.
#[no_mangle]
pub unsafe extern "C" fn ipasir2_set_notify(
    solver: *mut c_void,
    data: *mut c_void,
    callback: Option<NotifyFn>,
) -> ipasir2_errorcode {
    let reentry = try_code!(reentry(solver).ok_or(IPASIR2_E_INVALID_ARGUMENT));
    reentry.notify.set(callback.map(|callback| (callback, data)));

    if !reentry.solving.get() && callback.is_some() {
        let bundle = try_code!(idle_bundle(solver));
        return bundle.register_notify_dispatcher().into();
    }
    IPASIR2_E_OK
}
