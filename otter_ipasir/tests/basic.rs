use otter_ipasir::{
    config::registry::OptionValue,
    context::{Context, ContextState},
    reports::Report,
    structures::Redundancy,
    types::err::ErrorKind,
};

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

mod basic {
    use super::*;

    #[test]
    fn empty_formula() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut ctx = Context::default();

        assert_eq!(ctx.solve(&[]), Ok(Report::Satisfiable));
        assert_eq!(ctx.state(), ContextState::Satisfiable);
        assert_eq!(Report::Satisfiable.code(), 10);
    }

    #[test]
    fn unit_conflict() {
        let mut ctx = Context::default();
        assert!(ctx.add(&[1], Redundancy::None).is_ok());
        assert!(ctx.add(&[-1], Redundancy::None).is_ok());

        assert_eq!(ctx.solve(&[]), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.report().code(), 20);
    }

    #[test]
    fn assumption_driven_unsat() {
        let mut ctx = Context::default();
        let phase = ctx.option_handle("otter.phase").expect("phase option");
        assert!(ctx.set_option(&phase, OptionValue::Int(1), 3).is_ok());

        assert!(ctx.add(&[1, 2, 3], Redundancy::None).is_ok());
        assert!(ctx.add(&[-1, 2], Redundancy::None).is_ok());
        assert!(ctx.add(&[1, -2], Redundancy::None).is_ok());

        assert_eq!(ctx.solve(&[]), Ok(Report::Satisfiable));
        assert_eq!(ctx.val(3), Ok(3));
        assert_eq!(
            ctx.val(1).map(i32::signum),
            ctx.val(2).map(i32::signum)
        );

        assert!(ctx.add(&[-1], Redundancy::None).is_ok());
        assert_eq!(ctx.solve(&[-3]), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.failed(3), Ok(true));
        assert_eq!(ctx.failed(-3), Ok(true));
    }

    #[test]
    fn empty_clause() {
        let mut ctx = Context::default();
        assert!(ctx.add(&[1, 2], Redundancy::None).is_ok());
        assert!(ctx.add(&[], Redundancy::None).is_ok());

        assert_eq!(ctx.solve(&[]), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.solve(&[]), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn conflict() {
        let mut ctx = Context::default();
        for clause in [[1, 2], [-1, -2], [1, -2], [-1, 2]] {
            assert!(ctx.add(&clause, Redundancy::None).is_ok());
        }
        assert_eq!(ctx.solve(&[]), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn unit_conjunct() {
        let mut ctx = Context::default();
        assert!(ctx.add(&[1, 2], Redundancy::None).is_ok());
        assert!(ctx.add(&[-1], Redundancy::None).is_ok());

        assert_eq!(ctx.solve(&[]), Ok(Report::Satisfiable));
        assert_eq!(ctx.val(1), Ok(-1));
        assert_eq!(ctx.val(-1), Ok(-1));
        assert_eq!(ctx.val(2), Ok(2));
        assert_eq!(ctx.val(-2), Ok(2));
    }

    #[test]
    fn duplicates_and_tautologies() {
        let mut ctx = Context::default();
        assert!(ctx.add(&[1, 1, 2, 2], Redundancy::None).is_ok());
        assert!(ctx.add(&[5, -5], Redundancy::None).is_ok());

        assert_eq!(ctx.atom_db.atom_max(), 5);
        assert_eq!(ctx.clause_db.original_count(), 1);

        assert_eq!(ctx.solve(&[]), Ok(Report::Satisfiable));
        assert_ne!(ctx.val(5), Ok(0));
    }

    #[test]
    fn pigeons() {
        let mut ctx = Context::default();
        for clause in pigeonhole(5) {
            assert!(ctx.add(&clause, Redundancy::None).is_ok());
        }
        assert_eq!(ctx.solve(&[]), Ok(Report::Unsatisfiable));
        assert!(ctx.counters.total_conflicts > 0);
    }

    #[test]
    fn incremental() {
        let mut ctx = Context::default();
        assert!(ctx.add(&[1, 2, 3], Redundancy::None).is_ok());

        let mut models = 0;
        while ctx.solve(&[]) == Ok(Report::Satisfiable) {
            models += 1;
            let block = (1..=3)
                .filter_map(|atom| ctx.val(atom).ok())
                .map(|literal| -literal)
                .collect::<Vec<_>>();
            assert!(ctx.add(&block, Redundancy::None).is_ok());
        }

        assert_eq!(models, 7);
        assert_eq!(ctx.state(), ContextState::Unsatisfiable);
    }
}

mod results {
    use super::*;

    #[test]
    fn val_outside_sat() {
        let mut ctx = Context::default();
        assert_eq!(ctx.val(1), Err(ErrorKind::InvalidState));

        assert!(ctx.add(&[1], Redundancy::None).is_ok());
        assert_eq!(ctx.val(1), Err(ErrorKind::InvalidState));

        assert!(ctx.add(&[-1], Redundancy::None).is_ok());
        assert_eq!(ctx.solve(&[]), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.val(1), Err(ErrorKind::InvalidState));
        assert_eq!(ctx.state(), ContextState::Unsatisfiable);
    }

    #[test]
    fn val_arguments() {
        let mut ctx = Context::default();
        assert!(ctx.add(&[1], Redundancy::None).is_ok());
        assert_eq!(ctx.solve(&[]), Ok(Report::Satisfiable));

        assert_eq!(ctx.val(0), Err(ErrorKind::InvalidArgument));
        assert_eq!(ctx.val(i32::MIN), Err(ErrorKind::InvalidArgument));
        assert_eq!(ctx.val(42), Ok(0));
        assert_eq!(ctx.val(1), Ok(1));
    }

    #[test]
    fn failed_outside_unsat() {
        let mut ctx = Context::default();
        assert!(ctx.add(&[1], Redundancy::None).is_ok());
        assert_eq!(ctx.solve(&[1]), Ok(Report::Satisfiable));
        assert_eq!(ctx.failed(1), Err(ErrorKind::InvalidState));
    }

    #[test]
    fn add_invalid_literal() {
        let mut ctx = Context::default();
        assert_eq!(ctx.add(&[1, 0], Redundancy::None), Err(ErrorKind::InvalidArgument));
        assert_eq!(ctx.add(&[i32::MIN], Redundancy::None), Err(ErrorKind::InvalidArgument));
        assert_eq!(ctx.state(), ContextState::Configuration);

        assert_eq!(ctx.solve(&[]), Ok(Report::Satisfiable));
    }
}

mod assignment_stack {
    use super::*;

    #[test]
    fn agrees_with_val() {
        let mut ctx = Context::default();
        for clause in [vec![1, 2], vec![-2, 3], vec![-1, -3, 4]] {
            assert!(ctx.add(&clause, Redundancy::None).is_ok());
        }
        assert_eq!(ctx.solve(&[]), Ok(Report::Satisfiable));

        let size = ctx.assignment_size().expect("size in sat");
        assert_eq!(size, 4);
        for index in 0..size {
            let literal = ctx.assignment(index).expect("literal in range");
            assert_eq!(ctx.val(literal), Ok(literal));
        }
        assert_eq!(ctx.assignment(size), Err(ErrorKind::InvalidArgument));
    }

    #[test]
    fn partial_in_input() {
        let mut ctx = Context::default();
        assert_eq!(ctx.assignment_size(), Err(ErrorKind::InvalidState));

        assert!(ctx.add(&[1], Redundancy::None).is_ok());
        assert!(ctx.add(&[-1, 2], Redundancy::None).is_ok());
        assert!(ctx.add(&[3, 4], Redundancy::None).is_ok());

        // Units, and clauses made unit by earlier units, are assigned as they are added.
        assert_eq!(ctx.assignment_size(), Ok(2));
        assert_eq!(ctx.assignment(0), Ok(1));
        assert_eq!(ctx.assignment(1), Ok(2));
        assert_eq!(ctx.assignment(2), Err(ErrorKind::InvalidArgument));
    }

    #[test]
    fn illegal_in_unsat() {
        let mut ctx = Context::default();
        assert!(ctx.add(&[1], Redundancy::None).is_ok());
        assert_eq!(ctx.solve(&[-1]), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.assignment_size(), Err(ErrorKind::InvalidState));
        assert_eq!(ctx.assignment(0), Err(ErrorKind::InvalidState));
    }
}
