/*
A portfolio of contexts which share learnt clauses.

Each context solves the same pigeonhole formula, with a different seed.
Short clauses learnt by one context are exported to a channel, and imported by the others as forgettable clauses.
The first context to resolve the formula terminates the rest.

To run the example (e.g.): cargo run --profile release --example portfolio 8 4
 */

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crossbeam::channel::{unbounded, Receiver, Sender};

use otter_ipasir::{
    config::Config,
    context::{callbacks::Importer, Context},
    reports::Report,
    structures::{clause::CClause, Redundancy},
};

/// The clauses of the formula placing `holes + 1` pigeons in `holes` holes, at most one pigeon to a hole.
fn pigeonhole(holes: i32) -> Vec<CClause> {
    let atom = |pigeon: i32, hole: i32| pigeon * holes + hole + 1;
    let mut clauses = Vec::default();

    for pigeon in 0..=holes {
        clauses.push((0..holes).map(|hole| atom(pigeon, hole)).collect());
    }
    for hole in 0..holes {
        for a in 0..=holes {
            for b in (a + 1)..=holes {
                clauses.push(vec![-atom(a, hole), -atom(b, hole)]);
            }
        }
    }
    clauses
}

fn solve_as_member(
    seed: u64,
    formula: &[CClause],
    outbox: Vec<Sender<CClause>>,
    inbox: Receiver<CClause>,
    done: Arc<AtomicBool>,
) -> Report {
    let mut config = Config::default();
    config.seed.value = seed;
    let mut ctx = Context::from_config(config);

    let stop = done.clone();
    let _ = ctx.set_callback_terminate(Box::new(move || stop.load(Ordering::Relaxed)));
    let _ = ctx.set_callback_export(
        Some(3),
        Box::new(move |clause: &[i32]| {
            for sender in &outbox {
                let _ = sender.send(clause.to_vec());
            }
        }),
    );
    let _ = ctx.set_callback_import(
        Redundancy::Forgettable,
        Box::new(move |importer: &mut Importer| {
            if let Ok(clause) = inbox.try_recv() {
                let _ = importer.add(&clause, Redundancy::Equivalent);
            }
        }),
    );

    for clause in formula {
        assert!(ctx.add(clause, Redundancy::None).is_ok());
    }

    let report = ctx.solve(&[]).unwrap_or(Report::Unknown);
    if report != Report::Unknown {
        done.store(true, Ordering::Relaxed);
    }
    println!("Member {seed}: {report} ({} imports, {} exports)", ctx.counters.imports, ctx.counters.exports);
    report
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        println!("Usage: {} <holes> <members>", args[0]);
        std::process::exit(-1);
    }
    let holes = args[1].parse::<i32>().expect("?");
    let members = args[2].parse::<u64>().expect("?");

    let formula = pigeonhole(holes);
    let done = Arc::new(AtomicBool::new(false));

    let channels: Vec<(Sender<CClause>, Receiver<CClause>)> = (0..members).map(|_| unbounded()).collect();

    let reports = crossbeam::scope(|scope| {
        let handles = (0..members as usize)
            .map(|member| {
                let outbox = channels
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != member)
                    .map(|(_, (sender, _))| sender.clone())
                    .collect();
                let inbox = channels[member].1.clone();
                let formula = &formula;
                let done = done.clone();
                scope.spawn(move |_| solve_as_member(member as u64, formula, outbox, inbox, done))
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("Member panicked"))
            .collect::<Vec<_>>()
    })
    .expect("Portfolio panicked");

    let resolved = reports.iter().find(|report| **report != Report::Unknown);
    println!("Portfolio: {}", resolved.copied().unwrap_or(Report::Unknown));
}
