use clap::{Arg, ArgAction, Command};

pub fn cli() -> Command {
    Command::new("otter_inspect")
        .about("Probes an IPASIR-2 solver for the functionality it makes available")
        .version(env!("CARGO_PKG_VERSION"))

        .arg(Arg::new("options_only")
            .short('o')
            .long("options-only")
            .action(ArgAction::SetTrue)
            .required(false)
            .help("Skip probing functions, and list the option table only."))
}
