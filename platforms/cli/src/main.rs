use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tursim::{
    check_input, validate, write_report, Machine, SamplingPolicy, SimulatorError, SpecLoader,
    DEFAULT_MAX_STEPS,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Path to the machine specification file
    spec: PathBuf,

    /// Path the configuration report is written to
    output: PathBuf,

    /// Maximum number of transition applications before giving up
    #[clap(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Also print every recorded configuration to stdout
    #[clap(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SimulatorError> {
    let loaded = SpecLoader::load(&cli.spec)?;

    let mut errors = validate(&loaded.spec);
    errors.extend(check_input(&loaded.spec, &loaded.input));
    if !errors.is_empty() {
        eprintln!("specification errors:");
        for error in &errors {
            eprintln!("  - {error}");
        }
        return Err(SimulatorError::Validation(errors));
    }

    let mut machine = Machine::new(&loaded.spec, &loaded.input);
    let execution = machine.run(cli.max_steps, SamplingPolicy::default());

    if cli.debug {
        for configuration in &execution.configurations {
            println!("{configuration}");
        }
    }

    write_report(&cli.output, &execution)?;

    println!("Result: {}", execution.outcome);
    println!("Steps: {}", execution.steps);
    println!("Report written to: {}", cli.output.display());

    Ok(())
}
