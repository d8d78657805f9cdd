/*
Counts the models of a formula over some atoms, by blocking each model found.

Each model is read from the assignment stack, and the negation of the model is added as a clause.
Options are set before the first clause is added, as the seed may only be set during configuration.

To run the example (e.g.): cargo run --profile release --example all_models 10
 */

use otter_ipasir::{
    config::registry::OptionValue,
    context::Context,
    ipasir::Ipasir2,
    reports::Report,
    structures::{clause::CClause, Redundancy},
};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        println!("Usage: {} <atom_count>", args[0]);
        std::process::exit(-1);
    }
    let atom_count = args[1].parse::<i32>().expect("?");

    let mut ctx = Context::default();
    println!("{}", <Context as Ipasir2>::signature());

    for descriptor in ctx.options().expect("Options unavailable") {
        println!("  {descriptor}");
    }

    let seed = ctx.option_handle("otter.seed").expect("No seed option");
    assert!(ctx.set_option(&seed, OptionValue::Int(7), 0).is_ok());

    // A tautology introduces every atom.
    for atom in 1..=atom_count {
        assert!(ctx.add(&[atom, -atom], Redundancy::None).is_ok());
    }

    let mut models_found = 0;
    while let Ok(Report::Satisfiable) = ctx.solve(&[]) {
        models_found += 1;

        let size = ctx.assignment_size().expect("?");
        let block: CClause = (0..size)
            .filter_map(|index| ctx.assignment(index).ok())
            .map(|literal| -literal)
            .collect();

        if ctx.add(&block, Redundancy::None).is_err() {
            break;
        }
    }

    println!("Models found {models_found}");
}
