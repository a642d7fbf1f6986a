use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use tagfilter::cli::{self, CheckOptions, CheckResult, CliError};

#[derive(ClapParser)]
#[command(name = "tagfilter")]
#[command(about = "tagfilter - Select audio files by their tags with boolean filter expressions")]
#[command(version)]
struct Cli {
    /// Log evaluation details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a filter and run it against JSON records
    Check {
        /// The filter to run
        filter: String,

        /// JSON records (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Print the matching records as JSON instead of their paths
        #[arg(short, long)]
        json: bool,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Print the records that do not match
        #[arg(long)]
        invert: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the canonical form and the syntax tree of a filter
    Ast {
        /// The filter to parse
        filter: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'tagfilter docs' to list categories)
        category: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "tagfilter=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (filter, result) = match cli.command {
        Commands::Check {
            filter,
            input,
            json,
            pretty,
            invert,
            syntax_only,
        } => {
            let options = CheckOptions {
                filter,
                input,
                syntax_only,
                invert,
            };
            let result = run_check(&options, json, pretty);
            (options.filter, result)
        }
        Commands::Ast { filter } => {
            let result = cli::execute_ast(&filter).map(|report| println!("{}", report));
            (filter, result)
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            (String::new(), Ok(()))
        }
        Commands::Doc { category } => {
            let result = cli::get_doc_category(&category).map(|content| print!("{}", content));
            (String::new(), result)
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e.render(&filter));
        std::process::exit(1);
    }
}

fn run_check(options: &CheckOptions, json: bool, pretty: bool) -> Result<(), CliError> {
    let mut options = options.clone();
    if options.input.is_none() && !options.syntax_only && !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        options.input = Some(buffer);
    }

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Matches(records) if json => {
            let output = cli::records_to_json(&records);
            let text = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", text);
        }
        CheckResult::Matches(records) => {
            for record in records {
                println!("{}", record.path);
            }
        }
    }
    Ok(())
}
