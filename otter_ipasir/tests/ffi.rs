use std::ffi::{c_int, c_void, CStr, CString};

use otter_ipasir::ipasir::ipasir_two::{ipasir2_errorcode::*, *};

fn init() -> *mut c_void {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut solver: *mut c_void = std::ptr::null_mut();
    assert_eq!(unsafe { ipasir2_init(&mut solver) }, IPASIR2_E_OK);
    assert!(!solver.is_null());
    solver
}

fn add(solver: *mut c_void, clause: &[i32]) -> ipasir2_errorcode {
    unsafe { ipasir2_add(solver, clause.as_ptr(), clause.len() as c_int, 0) }
}

fn solve(solver: *mut c_void, assumptions: &[i32]) -> (ipasir2_errorcode, c_int) {
    let mut result: c_int = -1;
    let code = unsafe { ipasir2_solve(solver, &mut result, assumptions.as_ptr(), assumptions.len() as c_int) };
    (code, result)
}

fn val(solver: *mut c_void, literal: i32) -> (ipasir2_errorcode, i32) {
    let mut value: i32 = 0;
    let code = unsafe { ipasir2_val(solver, literal, &mut value) };
    (code, value)
}

/// The literals of a zero-terminated array.
///
/// # Safety
/// `literals` must be zero-terminated.
unsafe fn terminated(mut literals: *const i32) -> Vec<i32> {
    let mut collected = Vec::default();
    while *literals != 0 {
        collected.push(*literals);
        literals = literals.add(1);
    }
    collected
}

/// The clauses placing `holes + 1` pigeons in `holes` holes.
fn pigeonhole(holes: i32) -> Vec<Vec<i32>> {
    let atom = |pigeon: i32, hole: i32| pigeon * holes + hole + 1;
    let mut clauses: Vec<Vec<i32>> = (0..=holes)
        .map(|pigeon| (0..holes).map(|hole| atom(pigeon, hole)).collect())
        .collect();
    for hole in 0..holes {
        for a in 0..=holes {
            for b in (a + 1)..=holes {
                clauses.push(vec![-atom(a, hole), -atom(b, hole)]);
            }
        }
    }
    clauses
}

mod lifecycle {
    use super::*;

    #[test]
    fn signature() {
        let mut signature: *const std::ffi::c_char = std::ptr::null();
        assert_eq!(unsafe { ipasir2_signature(&mut signature) }, IPASIR2_E_OK);
        let signature = unsafe { CStr::from_ptr(signature) }.to_string_lossy();
        assert!(signature.starts_with("otter_ipasir"));

        assert_eq!(unsafe { ipasir2_signature(std::ptr::null_mut()) }, IPASIR2_E_INVALID_ARGUMENT);
    }

    #[test]
    fn init_and_release() {
        let solver = init();
        assert_eq!(add(solver, &[1, 2]), IPASIR2_E_OK);
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);

        assert_eq!(unsafe { ipasir2_init(std::ptr::null_mut()) }, IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(unsafe { ipasir2_release(std::ptr::null_mut()) }, IPASIR2_E_INVALID_ARGUMENT);
    }

    #[test]
    fn null_arguments() {
        let solver = init();
        let null = std::ptr::null_mut();

        assert_eq!(add(null, &[1]), IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(unsafe { ipasir2_add(solver, std::ptr::null(), 2, 0) }, IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(unsafe { ipasir2_add(solver, [1].as_ptr(), -1, 0) }, IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(unsafe { ipasir2_add(solver, [1].as_ptr(), 1, 4) }, IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(
            unsafe { ipasir2_solve(solver, std::ptr::null_mut(), std::ptr::null(), 0) },
            IPASIR2_E_INVALID_ARGUMENT
        );
        assert_eq!(unsafe { ipasir2_options(solver, std::ptr::null_mut()) }, IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(unsafe { ipasir2_set_terminate(null, null, None) }, IPASIR2_E_INVALID_ARGUMENT);

        // An empty assumption array may be null.
        assert_eq!(solve(solver, &[]).0, IPASIR2_E_OK);
        assert_eq!(unsafe { ipasir2_val(solver, 1, std::ptr::null_mut()) }, IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
    }
}

mod solving {
    use super::*;

    #[test]
    fn results() {
        let solver = init();
        assert_eq!(add(solver, &[1, 2]), IPASIR2_E_OK);
        assert_eq!(add(solver, &[-1]), IPASIR2_E_OK);

        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 10));
        assert_eq!(val(solver, 1), (IPASIR2_E_OK, -1));
        assert_eq!(val(solver, -2), (IPASIR2_E_OK, 2));
        assert_eq!(val(solver, 0).0, IPASIR2_E_INVALID_ARGUMENT);

        let mut size: i32 = 0;
        assert_eq!(unsafe { ipasir2_assignment_size(solver, &mut size) }, IPASIR2_E_OK);
        assert_eq!(size, 2);
        let mut literal: i32 = 0;
        assert_eq!(unsafe { ipasir2_assignment(solver, 0, &mut literal) }, IPASIR2_E_OK);
        assert_eq!(literal, -1);
        assert_eq!(unsafe { ipasir2_assignment(solver, -1, &mut literal) }, IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(unsafe { ipasir2_assignment(solver, 2, &mut literal) }, IPASIR2_E_INVALID_ARGUMENT);

        assert_eq!(unsafe { ipasir2_assume(solver, -2) }, IPASIR2_E_OK);
        assert_eq!(unsafe { ipasir2_assume(solver, 0) }, IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(val(solver, 1).0, IPASIR2_E_INVALID_STATE);
        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 20));
        let mut failed: c_int = -1;
        assert_eq!(unsafe { ipasir2_failed(solver, -2, &mut failed) }, IPASIR2_E_OK);
        assert_eq!(failed, 1);
        assert_eq!(val(solver, 1).0, IPASIR2_E_INVALID_STATE);

        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
    }

    #[test]
    fn unsatisfiable() {
        let solver = init();
        for clause in pigeonhole(3) {
            assert_eq!(add(solver, &clause), IPASIR2_E_OK);
        }
        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 20));

        let mut failed: c_int = 0;
        assert_eq!(unsafe { ipasir2_failed(solver, 1, &mut failed) }, IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
    }
}

mod options {
    use super::*;

    /// The option table of `solver`, up to the terminating option.
    fn table<'a>(solver: *mut c_void) -> Vec<&'a ipasir2_option> {
        let mut option: *const ipasir2_option = std::ptr::null();
        assert_eq!(unsafe { ipasir2_options(solver, &mut option) }, IPASIR2_E_OK);

        let mut table = Vec::default();
        unsafe {
            while !(*option).name.is_null() {
                table.push(&*option);
                option = option.add(1);
            }
        }
        table
    }

    #[test]
    fn listed() {
        let solver = init();
        let names = table(solver)
            .iter()
            .map(|option| unsafe { CStr::from_ptr(option.name) }.to_string_lossy().into_owned())
            .collect::<Vec<_>>();

        assert!(names.contains(&"ipasir.limits.decisions".to_string()));
        assert!(names.contains(&"ipasir.limits.conflicts".to_string()));
        assert!(!names.contains(&"otter.activity_decay".to_string()));
        assert!(table(solver).iter().all(|option| !option.handle.is_null() && option.min <= option.max));

        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
    }

    #[test]
    fn bounds() {
        let solver = init();
        for option in table(solver) {
            if let Some(over) = option.max.checked_add(1) {
                assert_eq!(unsafe { ipasir2_set_option(solver, option, over, 0) }, IPASIR2_E_INVALID_OPTION_VALUE);
            }
            assert_eq!(unsafe { ipasir2_set_option(solver, option, option.min, 0) }, IPASIR2_E_OK);
        }
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
    }

    #[test]
    fn handles() {
        let solver = init();
        let name = CString::new("ipasir.limits.conflicts").expect("name");
        let mut handle: *const ipasir2_option = std::ptr::null();
        assert_eq!(unsafe { ipasir2_get_option_handle(solver, name.as_ptr(), &mut handle) }, IPASIR2_E_OK);
        assert_eq!(unsafe { CStr::from_ptr((*handle).name) }, name.as_c_str());
        assert_eq!(unsafe { (*handle).max_state }, ipasir2_state::IPASIR2_S_INPUT);

        let unknown = CString::new("otter.nothing").expect("name");
        assert_eq!(
            unsafe { ipasir2_get_option_handle(solver, unknown.as_ptr(), &mut handle) },
            IPASIR2_E_UNSUPPORTED_OPTION
        );

        let forged = ipasir2_option {
            name: name.as_ptr(),
            min: -1,
            max: 10,
            max_state: ipasir2_state::IPASIR2_S_INPUT,
            tunable: 0,
            indexed: 0,
            handle: std::ptr::null(),
        };
        assert_eq!(unsafe { ipasir2_set_option(solver, &forged, 1, 0) }, IPASIR2_E_UNSUPPORTED_OPTION);

        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
    }

    #[test]
    fn config_only() {
        let solver = init();
        let name = CString::new("otter.seed").expect("name");
        let mut handle: *const ipasir2_option = std::ptr::null();
        assert_eq!(unsafe { ipasir2_get_option_handle(solver, name.as_ptr(), &mut handle) }, IPASIR2_E_OK);

        assert_eq!(unsafe { ipasir2_set_option(solver, handle, 11, 0) }, IPASIR2_E_OK);
        assert_eq!(add(solver, &[1]), IPASIR2_E_OK);
        assert_eq!(unsafe { ipasir2_set_option(solver, handle, 12, 0) }, IPASIR2_E_INVALID_STATE);

        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
    }
}

mod callbacks {
    use super::*;

    extern "C" fn stop(_data: *mut c_void) -> c_int {
        1
    }

    extern "C" fn import_nothing(_data: *mut c_void, _pledge: c_int) {}

    extern "C" fn collect_exports(data: *mut c_void, clause: *const i32) {
        let exported = unsafe { &mut *(data as *mut Vec<Vec<i32>>) };
        exported.push(unsafe { terminated(clause) });
    }

    #[test]
    fn terminate() {
        let solver = init();
        for clause in pigeonhole(5) {
            assert_eq!(add(solver, &clause), IPASIR2_E_OK);
        }
        let null = std::ptr::null_mut();

        assert_eq!(unsafe { ipasir2_set_terminate(solver, null, Some(stop)) }, IPASIR2_E_OK);
        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 0));
        assert_eq!(add(solver, &[1, 2]), IPASIR2_E_OK);

        assert_eq!(unsafe { ipasir2_set_terminate(solver, null, None) }, IPASIR2_E_OK);
        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 20));
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
    }

    #[test]
    fn export() {
        let solver = init();
        for clause in pigeonhole(4) {
            assert_eq!(add(solver, &clause), IPASIR2_E_OK);
        }

        let mut exported: Vec<Vec<i32>> = Vec::default();
        let data = &mut exported as *mut Vec<Vec<i32>> as *mut c_void;
        assert_eq!(unsafe { ipasir2_set_export(solver, data, -2, Some(collect_exports)) }, IPASIR2_E_INVALID_ARGUMENT);
        assert_eq!(unsafe { ipasir2_set_export(solver, data, 3, Some(collect_exports)) }, IPASIR2_E_OK);

        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 20));
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);

        assert!(exported.iter().all(|clause| clause.len() <= 3));
    }

    #[test]
    fn import_pledges() {
        let solver = init();
        let null = std::ptr::null_mut();

        assert_eq!(
            unsafe { ipasir2_set_import(solver, null, 0, Some(import_nothing)) },
            IPASIR2_E_UNSUPPORTED_ARGUMENT
        );
        assert_eq!(
            unsafe { ipasir2_set_import(solver, null, 4, Some(import_nothing)) },
            IPASIR2_E_INVALID_ARGUMENT
        );
        for pledge in 1..=3 {
            assert_eq!(unsafe { ipasir2_set_import(solver, null, pledge, Some(import_nothing)) }, IPASIR2_E_OK);
        }
        assert_eq!(unsafe { ipasir2_set_import(solver, null, 0, None) }, IPASIR2_E_OK);
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
    }

    /// A record of the assignment, built from notify calls.
    #[derive(Default)]
    struct NotifyRecord {
        calls: usize,
        view: Vec<i32>,
    }

    extern "C" fn record_notify(data: *mut c_void, assigned: *const i32, unassigned: *const i32) {
        let record = unsafe { &mut *(data as *mut NotifyRecord) };
        record.calls += 1;
        let unassigned = unsafe { terminated(unassigned) };
        record.view.retain(|literal| !unassigned.contains(literal));
        record.view.extend(unsafe { terminated(assigned) });
    }

    #[test]
    fn notify() {
        let solver = init();
        let mut record = NotifyRecord::default();
        let data = &mut record as *mut NotifyRecord as *mut c_void;

        assert_eq!(add(solver, &[1]), IPASIR2_E_OK);
        assert_eq!(unsafe { ipasir2_set_notify(solver, data, Some(record_notify)) }, IPASIR2_E_OK);
        assert_eq!(add(solver, &[-1, 2]), IPASIR2_E_OK);
        assert_eq!(add(solver, &[3, 4]), IPASIR2_E_OK);

        assert_eq!(solve(solver, &[-3]), (IPASIR2_E_OK, 10));
        assert_eq!(unsafe { ipasir2_set_notify(solver, std::ptr::null_mut(), None) }, IPASIR2_E_OK);
        let mut model = (1..=4).map(|atom| val(solver, atom).1).collect::<Vec<_>>();
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);

        assert!(record.calls > 0);
        record.view.sort_by_key(|literal| literal.abs());
        model.sort_by_key(|literal| literal.abs());
        assert_eq!(record.view, model);
        assert_eq!(model, vec![1, 2, -3, 4]);
    }

    #[test]
    fn no_notify_under_decision_limit() {
        let solver = init();
        let mut record = NotifyRecord::default();
        let data = &mut record as *mut NotifyRecord as *mut c_void;
        assert_eq!(unsafe { ipasir2_set_notify(solver, data, Some(record_notify)) }, IPASIR2_E_OK);

        let name = CString::new("ipasir.limits.decisions").expect("name");
        let mut handle: *const ipasir2_option = std::ptr::null();
        assert_eq!(unsafe { ipasir2_get_option_handle(solver, name.as_ptr(), &mut handle) }, IPASIR2_E_OK);
        assert_eq!(unsafe { ipasir2_set_option(solver, handle, 0, 0) }, IPASIR2_E_OK);

        assert_eq!(add(solver, &[1, 2]), IPASIR2_E_OK);
        assert_eq!(add(solver, &[3, 4]), IPASIR2_E_OK);
        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 10));

        assert_eq!(add(solver, &[-1, -2]), IPASIR2_E_OK);
        assert_eq!(add(solver, &[-3, -4]), IPASIR2_E_OK);
        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 10));
        let model = (1..=4).map(|atom| val(solver, atom).1).collect::<Vec<_>>();
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);

        assert_eq!(record.calls, 0);
        assert!(record.view.is_empty());
        assert_eq!(model.iter().filter(|literal| **literal > 0).count(), 2);
        assert!(model[0].signum() != model[1].signum() && model[2].signum() != model[3].signum());
    }
}

mod reentrance {
    use super::*;

    /// Data shared with callbacks, recording the codes of calls made from within the callbacks.
    struct Probe {
        solver: *mut c_void,
        pledge: c_int,
        calls: usize,
        codes: Vec<(&'static str, ipasir2_errorcode)>,
    }

    impl Probe {
        fn new(solver: *mut c_void) -> Self {
            Probe {
                solver,
                pledge: -1,
                calls: 0,
                codes: Vec::default(),
            }
        }

        fn code(&self, name: &str) -> Option<ipasir2_errorcode> {
            self.codes.iter().find(|(call, _)| *call == name).map(|(_, code)| *code)
        }
    }

    extern "C" fn probing_import(data: *mut c_void, pledge: c_int) {
        let probe = unsafe { &mut *(data as *mut Probe) };
        probe.calls += 1;
        if probe.calls > 1 {
            return;
        }
        probe.pledge = pledge;
        let solver = probe.solver;

        unsafe {
            let unit = [-1];
            let other = [-2];
            let mut result: c_int = 0;
            let mut value: i32 = 0;
            let mut options: *const ipasir2_option = std::ptr::null();

            probe.codes.push(("add", ipasir2_add(solver, unit.as_ptr(), 1, 3)));
            probe.codes.push(("add again", ipasir2_add(solver, other.as_ptr(), 1, 3)));
            probe.codes.push(("val", ipasir2_val(solver, 1, &mut value)));
            probe.codes.push(("solve", ipasir2_solve(solver, &mut result, std::ptr::null(), 0)));
            probe.codes.push(("release", ipasir2_release(solver)));
            probe.codes.push(("assume", ipasir2_assume(solver, 1)));
            probe.codes.push(("assignment_size", ipasir2_assignment_size(solver, &mut value)));
            probe.codes.push(("options", ipasir2_options(solver, &mut options)));
            probe.codes.push(("set_option", ipasir2_set_option(solver, options, 0, 0)));
            probe.codes.push(("set_option over", ipasir2_set_option(solver, options, i64::MAX, 0)));
        }
    }

    extern "C" fn weak_import(data: *mut c_void, _pledge: c_int) {
        let probe = unsafe { &mut *(data as *mut Probe) };
        probe.calls += 1;
        if probe.calls == 1 {
            let clause = [-1, -2];
            let code = unsafe { ipasir2_add(probe.solver, clause.as_ptr(), 2, 1) };
            probe.codes.push(("add", code));
        }
    }

    extern "C" fn stop_in_export(data: *mut c_void, _clause: *const i32) {
        let probe = unsafe { &mut *(data as *mut Probe) };
        probe.calls += 1;
        let clause = [5];
        unsafe {
            probe.codes.push(("add", ipasir2_add(probe.solver, clause.as_ptr(), 1, 3)));
            probe.codes.push(("set_terminate", ipasir2_set_terminate(probe.solver, data, Some(callbacks_stop))));
        }
    }

    extern "C" fn callbacks_stop(_data: *mut c_void) -> c_int {
        1
    }

    #[test]
    fn calls_from_import() {
        let solver = init();
        assert_eq!(add(solver, &[1, 2]), IPASIR2_E_OK);

        let mut probe = Probe::new(solver);
        let data = &mut probe as *mut Probe as *mut c_void;
        assert_eq!(unsafe { ipasir2_set_import(solver, data, 2, Some(probing_import)) }, IPASIR2_E_OK);

        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 10));
        assert_eq!(val(solver, 1), (IPASIR2_E_OK, -1));
        assert_eq!(val(solver, 2), (IPASIR2_E_OK, 2));
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);

        assert_eq!(probe.pledge, 2);
        assert_eq!(probe.code("add"), Some(IPASIR2_E_OK));
        assert_eq!(probe.code("add again"), Some(IPASIR2_E_INVALID_STATE));
        assert_eq!(probe.code("val"), Some(IPASIR2_E_INVALID_STATE));
        assert_eq!(probe.code("solve"), Some(IPASIR2_E_INVALID_STATE));
        assert_eq!(probe.code("release"), Some(IPASIR2_E_INVALID_STATE));
        assert_eq!(probe.code("assume"), Some(IPASIR2_E_INVALID_STATE));
        assert_eq!(probe.code("assignment_size"), Some(IPASIR2_E_INVALID_STATE));
        assert_eq!(probe.code("options"), Some(IPASIR2_E_OK));
        assert_eq!(probe.code("set_option"), Some(IPASIR2_E_INVALID_STATE));
        assert_eq!(probe.code("set_option over"), Some(IPASIR2_E_INVALID_OPTION_VALUE));
    }

    #[test]
    fn offer_below_pledge() {
        let solver = init();
        assert_eq!(add(solver, &[1, 2]), IPASIR2_E_OK);

        let mut probe = Probe::new(solver);
        let data = &mut probe as *mut Probe as *mut c_void;
        assert_eq!(unsafe { ipasir2_set_import(solver, data, 3, Some(weak_import)) }, IPASIR2_E_OK);

        assert_eq!(solve(solver, &[1, 2]), (IPASIR2_E_OK, 10));
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
        assert_eq!(probe.code("add"), Some(IPASIR2_E_UNSUPPORTED_ARGUMENT));
    }

    #[test]
    fn calls_from_export() {
        let solver = init();
        for clause in pigeonhole(4) {
            assert_eq!(add(solver, &clause), IPASIR2_E_OK);
        }

        let mut probe = Probe::new(solver);
        let data = &mut probe as *mut Probe as *mut c_void;
        assert_eq!(unsafe { ipasir2_set_export(solver, data, -1, Some(stop_in_export)) }, IPASIR2_E_OK);

        // The terminate callback set during the solve stops the solve.
        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 0));
        assert_eq!(probe.code("add"), Some(IPASIR2_E_INVALID_STATE));
        assert_eq!(probe.code("set_terminate"), Some(IPASIR2_E_OK));

        assert_eq!(unsafe { ipasir2_set_terminate(solver, std::ptr::null_mut(), None) }, IPASIR2_E_OK);
        assert_eq!(unsafe { ipasir2_set_export(solver, std::ptr::null_mut(), -1, None) }, IPASIR2_E_OK);
        assert_eq!(solve(solver, &[]), (IPASIR2_E_OK, 20));
        assert_eq!(unsafe { ipasir2_release(solver) }, IPASIR2_E_OK);
    }
}
