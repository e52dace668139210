use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use calcore::prelude::*;

#[derive(Parser)]
#[command(name = "calcore")]
#[command(about = "Evaluate expressions and run numerical calculus from the command line")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate an expression and print the formatted result
    Eval {
        /// Expression text, e.g. "2 + 3 * 4"
        expression: String,
    },
    /// Numerical derivative of a function at a point
    Diff {
        /// Function body, e.g. "x^2"
        function: String,
        /// Variable name
        #[arg(long, default_value = "x")]
        var: String,
        /// Point to differentiate at
        #[arg(long, default_value = "0")]
        point: String,
    },
    /// Definite integral of a function over an interval
    Integrate {
        /// Function body, e.g. "sin(x)"
        function: String,
        /// Variable name
        #[arg(long, default_value = "x")]
        var: String,
        /// Interval in "[a,b]" form
        #[arg(long, default_value = "[0,1]")]
        interval: String,
    },
    /// Two-sided numerical limit of a function at a point
    Limit {
        /// Function body, e.g. "sin(x)/x"
        function: String,
        /// Variable name
        #[arg(long, default_value = "x")]
        var: String,
        /// Point the variable approaches
        #[arg(long)]
        point: String,
    },
    /// Evaluate a function of one variable at a point
    At {
        /// Function body, e.g. "x^2 + 1"
        function: String,
        /// Variable name
        #[arg(long, default_value = "x")]
        var: String,
        /// Point to evaluate at
        #[arg(long)]
        point: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Eval { expression } => match evaluate(&expression) {
            Ok(value) => println!("{}", format_result(value)),
            Err(err) => {
                eprintln!("{} {err}", "error:".red());
                std::process::exit(1);
            }
        },
        Command::Diff {
            function,
            var,
            point,
        } => println!("{}", calculate_derivative(&function, &var, &point)),
        Command::Integrate {
            function,
            var,
            interval,
        } => println!("{}", calculate_integral(&function, &var, &interval)),
        Command::Limit {
            function,
            var,
            point,
        } => println!("{}", calculate_limit(&function, &var, &point)),
        Command::At {
            function,
            var,
            point,
        } => println!("{}", evaluate_function(&function, &var, &point)),
    }
}
