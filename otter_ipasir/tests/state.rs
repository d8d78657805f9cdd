use otter_ipasir::{
    config::registry::OptionValue,
    context::{legality::Operation, Context, ContextState},
    reports::Report,
    structures::Redundancy,
    types::err::ErrorKind,
};

use proptest::prelude::*;

/// Operations on a context, with arguments which may or may not be valid.
#[derive(Clone, Debug)]
enum Op {
    Add(Vec<i32>, Redundancy),
    Assume(i32),
    Solve(Vec<i32>),
    Val(i32),
    Failed(i32),
    Assignment(usize),
    SetOption(&'static str, i64, i64),
}

impl Op {
    fn operation(&self) -> Option<Operation> {
        match self {
            Op::Add(..) => Some(Operation::Add),
            Op::Assume(_) => Some(Operation::Assume),
            Op::Solve(_) => Some(Operation::Solve),
            Op::Val(_) => Some(Operation::Val),
            Op::Failed(_) => Some(Operation::Failed),
            Op::Assignment(_) => Some(Operation::Assignment),
            Op::SetOption(..) => None,
        }
    }

    fn apply(&self, ctx: &mut Context) -> Result<(), ErrorKind> {
        match self {
            Op::Add(clause, redundancy) => ctx.add(clause, *redundancy),
            Op::Assume(literal) => ctx.assume(*literal),
            Op::Solve(assumptions) => ctx.solve(assumptions).map(|_| ()),
            Op::Val(literal) => ctx.val(*literal).map(|_| ()),
            Op::Failed(literal) => ctx.failed(*literal).map(|_| ()),
            Op::Assignment(index) => ctx.assignment(*index).map(|_| ()),
            Op::SetOption(name, value, index) => {
                let descriptor = ctx.option_handle(name)?;
                ctx.set_option(&descriptor, OptionValue::Int(*value), *index)
            }
        }
    }
}

fn literal() -> impl Strategy<Value = i32> {
    prop_oneof![
        8 => (1..=6i32),
        8 => (-6..=-1i32),
        1 => Just(0),
        1 => Just(i32::MIN),
    ]
}

fn redundancy() -> impl Strategy<Value = Redundancy> {
    prop::sample::select(Redundancy::ALL.to_vec())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (prop::collection::vec(literal(), 0..4), redundancy()).prop_map(|(c, r)| Op::Add(c, r)),
        1 => literal().prop_map(Op::Assume),
        3 => prop::collection::vec(literal(), 0..3).prop_map(Op::Solve),
        2 => literal().prop_map(Op::Val),
        2 => literal().prop_map(Op::Failed),
        1 => (0..8usize).prop_map(Op::Assignment),
        1 => (
            prop::sample::select(vec!["otter.seed", "otter.phase", "ipasir.limits.decisions", "otter.unknown"]),
            -3..3i64,
            -1..4i64
        )
            .prop_map(|(name, value, index)| Op::SetOption(name, value, index)),
    ]
}

proptest! {
    #[test]
    fn rejection_leaves_state(ops in prop::collection::vec(op(), 1..40)) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut ctx = Context::default();

        for op in ops {
            let before = ctx.state();
            let result = op.apply(&mut ctx);

            if let Some(operation) = op.operation() {
                if !operation.permitted_in(before) {
                    prop_assert_eq!(result, Err(ErrorKind::InvalidState));
                }
            }

            match result {
                Err(ErrorKind::Unknown) => prop_assert_eq!(ctx.state(), ContextState::Input),
                Err(_) => prop_assert_eq!(ctx.state(), before),
                Ok(()) => prop_assert_ne!(ctx.state(), ContextState::Solving),
            }
        }
    }
}

mod transitions {
    use super::*;

    #[test]
    fn config_to_input() {
        let mut ctx = Context::default();
        assert_eq!(ctx.state(), ContextState::Configuration);

        let seed = ctx.option_handle("otter.seed").expect("seed option");
        assert!(ctx.set_option(&seed, OptionValue::Int(3), 0).is_ok());
        assert_eq!(ctx.state(), ContextState::Configuration);

        assert!(ctx.add(&[1], Redundancy::None).is_ok());
        assert_eq!(ctx.state(), ContextState::Input);
    }

    #[test]
    fn results_to_input() {
        let mut ctx = Context::default();
        assert!(ctx.add(&[1, 2], Redundancy::None).is_ok());

        assert_eq!(ctx.solve(&[]), Ok(Report::Satisfiable));
        assert!(ctx.add(&[3], Redundancy::None).is_ok());
        assert_eq!(ctx.state(), ContextState::Input);

        assert_eq!(ctx.solve(&[-1, -2]), Ok(Report::Unsatisfiable));
        assert!(ctx.assume(1).is_ok());
        assert_eq!(ctx.state(), ContextState::Input);
    }

    #[test]
    fn legality_table() {
        use ContextState::*;

        assert!(Operation::Add.permitted_in(Configuration));
        assert!(Operation::Add.permitted_in(Solving));
        assert!(Operation::Solve.permitted_in(Unsatisfiable));
        assert!(!Operation::Solve.permitted_in(Solving));
        assert!(!Operation::Release.permitted_in(Solving));
        assert!(Operation::Val.permitted_in(Satisfiable));
        assert!(!Operation::Val.permitted_in(Input));
        assert!(Operation::Failed.permitted_in(Unsatisfiable));
        assert!(!Operation::Failed.permitted_in(Satisfiable));
        assert!(Operation::Options.permitted_in(Solving));
    }
}
