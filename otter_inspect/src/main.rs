//! Probes an instance of the solver for the functionality it makes available through the C bindings.
//!
//! Each probed function is reported as `[available]`, `[unsupported]`, or `[error]`, followed by the option table of the solver.

use std::ffi::{c_int, c_void, CStr};

use crossterm::style::Stylize;

use otter_ipasir::ipasir::ipasir_two::*;

mod cli;

/// Prints the availability of `function`, as indicated by `code`.
fn print_available(function: &str, code: ipasir2_errorcode) {
    use ipasir2_errorcode::*;
    match code {
        IPASIR2_E_OK => println!("{} {function} ({code:?})", "[available]".green()),
        IPASIR2_E_UNSUPPORTED | IPASIR2_E_UNSUPPORTED_ARGUMENT => {
            println!("{} {function} ({code:?})", "[unsupported]".blue())
        }
        _ => println!("{} {function} ({code:?})", "[error]".red()),
    }
}

fn critical(message: &str) -> ! {
    println!("{} {message}", "[critical]".red());
    std::process::exit(1);
}

extern "C" fn terminate_never(_data: *mut c_void) -> c_int {
    0
}

extern "C" fn export_count(data: *mut c_void, _clause: *const i32) {
    // Safety: The data pointer is always a counter owned by main.
    unsafe { *(data as *mut usize) += 1 };
}

extern "C" fn import_nothing(_data: *mut c_void, _pledge: c_int) {}

extern "C" fn notify_nothing(_data: *mut c_void, _assigned: *const i32, _unassigned: *const i32) {}

/// Adds a clause, solves, and reads the results of the solve.
///
/// # Safety
/// `solver` must be a live solver.
unsafe fn probe_basic_functionality(solver: *mut c_void) -> Result<(), ipasir2_errorcode> {
    let mut result: c_int = 0;
    let mut value: i32 = 0;
    let check = |function: &str, code: ipasir2_errorcode| {
        print_available(function, code);
        match code {
            ipasir2_errorcode::IPASIR2_E_OK => Ok(()),
            _ => Err(code),
        }
    };

    let clause = [1];
    check("ipasir2_add()", ipasir2_add(solver, clause.as_ptr(), 1, 0))?;
    check("ipasir2_solve()", ipasir2_solve(solver, &mut result, std::ptr::null(), 0))?;
    check("ipasir2_val()", ipasir2_val(solver, 1, &mut value))?;

    let mut size: i32 = 0;
    check("ipasir2_assignment_size()", ipasir2_assignment_size(solver, &mut size))?;
    check("ipasir2_assignment()", ipasir2_assignment(solver, 0, &mut value))?;

    check("ipasir2_assume()", ipasir2_assume(solver, -1))?;
    let code = ipasir2_solve(solver, &mut result, std::ptr::null(), 0);
    if code != ipasir2_errorcode::IPASIR2_E_OK {
        return check("ipasir2_solve()", code);
    }
    check("ipasir2_failed()", ipasir2_failed(solver, 1, &mut result))
}

/// Registers each kind of callback, with each supported mode.
///
/// # Safety
/// `solver` must be a live solver, and `counter` must outlive the solver.
unsafe fn probe_callbacks(solver: *mut c_void, counter: *mut usize) {
    let data = counter as *mut c_void;

    let code = ipasir2_set_terminate(solver, data, Some(terminate_never));
    print_available("ipasir2_set_terminate()", code);

    let code = ipasir2_set_export(solver, data, 2, Some(export_count));
    print_available("ipasir2_set_export(LENGTH RESTRICTED)", code);

    let code = ipasir2_set_export(solver, data, -1, Some(export_count));
    print_available("ipasir2_set_export(ANY LENGTH)", code);

    for (pledge, name) in [
        (0, "IPASIR2_R_NONE"),
        (1, "IPASIR2_R_FORGETTABLE"),
        (2, "IPASIR2_R_EQUISATISFIABLE"),
        (3, "IPASIR2_R_EQUIVALENT"),
    ] {
        let code = ipasir2_set_import(solver, data, pledge, Some(import_nothing));
        print_available(&format!("ipasir2_set_import({name})"), code);
    }

    let code = ipasir2_set_notify(solver, data, Some(notify_nothing));
    print_available("ipasir2_set_notify()", code);
}

/// The option table of `solver`.
///
/// # Safety
/// `solver` must be a live solver, and the table is valid only until the solver is released.
unsafe fn option_table<'a>(
    solver: *mut c_void,
) -> Result<Vec<&'a ipasir2_option>, ipasir2_errorcode> {
    let mut option: *const ipasir2_option = std::ptr::null();
    let code = ipasir2_options(solver, &mut option);
    if code != ipasir2_errorcode::IPASIR2_E_OK {
        return Err(code);
    }

    let mut table = Vec::default();
    while !option.is_null() && !(*option).name.is_null() {
        table.push(&*option);
        option = option.add(1);
    }
    Ok(table)
}

/// Sets the first option to its least value.
///
/// # Safety
/// `solver` must be a live solver.
unsafe fn probe_options(solver: *mut c_void) -> Result<(), ipasir2_errorcode> {
    let table = option_table(solver);
    let code = match &table {
        Ok(_) => ipasir2_errorcode::IPASIR2_E_OK,
        Err(code) => *code,
    };
    print_available("ipasir2_options()", code);

    match table?.first() {
        Some(option) => {
            let code = ipasir2_set_option(solver, *option, option.min, 0);
            print_available("ipasir2_set_option()", code);
            match code {
                ipasir2_errorcode::IPASIR2_E_OK => Ok(()),
                _ => Err(code),
            }
        }
        None => {
            println!("{} no actual options to set", "[unavailable]".blue());
            Err(ipasir2_errorcode::IPASIR2_E_UNSUPPORTED)
        }
    }
}

/// Prints each option of the table of `solver`.
///
/// # Safety
/// `solver` must be a live solver.
unsafe fn print_options(solver: *mut c_void) {
    let table = match option_table(solver) {
        Ok(table) => table,
        Err(code) => {
            println!("ipasir2_options() returned {code:?}");
            return;
        }
    };

    for option in table {
        let name = CStr::from_ptr(option.name).to_string_lossy().into_owned();
        let mut flags = String::default();
        if option.tunable != 0 {
            flags.push_str(" tunable");
        }
        if option.indexed != 0 {
            flags.push_str(" indexed");
        }
        println!(
            "  {}: [{}, {}] up to {:?}{flags}",
            name.as_str().bold(),
            option.min,
            option.max,
            option.max_state
        );
    }
}

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let matches = cli::cli().get_matches();
    let options_only = matches.get_flag("options_only");

    let mut signature: *const std::ffi::c_char = std::ptr::null();
    // Safety: The signature is written to a local pointer, and is static.
    let code = unsafe { ipasir2_signature(&mut signature) };
    if code != ipasir2_errorcode::IPASIR2_E_OK || signature.is_null() {
        critical(&format!("ipasir2_signature() returned {code:?}"));
    }
    // Safety: As above.
    let signature = unsafe { CStr::from_ptr(signature) }.to_string_lossy();
    println!("Inspecting IPASIR-2 Solver: {signature}");

    let mut exports: usize = 0;

    // Safety: Each probe is given a solver from init, which is released only after the probes are done.
    unsafe {
        let mut solver: *mut c_void = std::ptr::null_mut();
        let code = ipasir2_init(&mut solver);
        if code != ipasir2_errorcode::IPASIR2_E_OK {
            critical(&format!("ipasir2_init() returned {code:?}"));
        }

        if !options_only {
            if probe_basic_functionality(solver).is_err() {
                critical("basic functionality not available");
            }
            probe_callbacks(solver, &mut exports);
        }

        // Options are probed on a fresh solver, as most may only be set during configuration.
        let mut fresh: *mut c_void = std::ptr::null_mut();
        if ipasir2_init(&mut fresh) == ipasir2_errorcode::IPASIR2_E_OK {
            if probe_options(fresh).is_ok() || options_only {
                print_options(fresh);
            }
            ipasir2_release(fresh);
        }

        let code = ipasir2_release(solver);
        if code != ipasir2_errorcode::IPASIR2_E_OK {
            critical(&format!("ipasir2_release() returned {code:?}"));
        }
    }
}
