use std::{fs, process};

use calculate::{AngleUnit, Engine, EngineConfig};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// calculate parses and evaluates a math expression.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells calculate to read the expression from a file instead.
    #[arg(short, long)]
    file: bool,

    /// Binds a variable, e.g. `-v x=2.5`. May be repeated.
    #[arg(short = 'v', long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    variables: Vec<(String, f64)>,

    /// Interprets trigonometric angles in degrees.
    #[arg(long)]
    degrees: bool,

    /// Tolerance for the engine's internal equality checks.
    #[arg(long)]
    precision: Option<f64>,

    /// Disables constant folding.
    #[arg(long)]
    no_optimize: bool,

    /// Maximum nesting depth of an expression.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Lists a category of the builtin registry instead of evaluating.
    #[arg(short, long, value_enum)]
    list: Option<Listing>,

    /// Prints listings as JSON.
    #[arg(long, requires = "list")]
    json: bool,

    /// Prints the parsed tree in canonical form before the result.
    #[arg(long)]
    tree: bool,

    #[arg(required_unless_present = "list")]
    contents: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Listing {
    Constants,
    Functions,
    Operators,
    Config,
}

fn parse_binding(binding: &str) -> Result<(String, f64), String> {
    let (name, value) = binding.split_once('=')
                               .ok_or_else(|| format!("expected NAME=VALUE, found '{binding}'"))?;
    let value = value.trim()
                     .parse::<f64>()
                     .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.trim().to_string(), value))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();
}

fn config_from(args: &Args) -> EngineConfig {
    let mut config = EngineConfig::default().with_optimize(!args.no_optimize);
    if args.degrees {
        config = config.with_angle_unit(AngleUnit::Degrees);
    }
    if let Some(precision) = args.precision {
        config = config.with_precision(precision);
    }
    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }
    config
}

fn list(engine: &Engine, listing: Listing, json: bool) -> Result<(), serde_json::Error> {
    let query = engine.query();
    if json {
        let rendered = match listing {
            Listing::Constants => serde_json::to_string_pretty(&query.constants())?,
            Listing::Functions => serde_json::to_string_pretty(&query.functions())?,
            Listing::Operators => serde_json::to_string_pretty(&query.operators())?,
            Listing::Config => serde_json::to_string_pretty(query.config())?,
        };
        println!("{rendered}");
        return Ok(());
    }

    match listing {
        Listing::Constants => {
            for constant in query.constants() {
                println!("{} = {}", constant.name, constant.value);
            }
        },
        Listing::Functions => {
            for function in query.functions() {
                println!("{}/{}", function.name, function.arity);
            }
        },
        Listing::Operators => {
            for op in query.operators() {
                println!("{} {} (precedence {}, {:?})",
                         op.arity, op.symbol, op.precedence, op.associativity);
            }
        },
        Listing::Config => {
            let config = query.config();
            println!("precision  = {}", config.precision);
            println!("angle_unit = {}", config.angle_unit);
            println!("optimize   = {}", config.optimize);
            println!("max_depth  = {}", config.max_depth);
        },
    }
    Ok(())
}

fn main() {
    init_tracing();
    let args = Args::parse();
    let engine = Engine::new(config_from(&args));

    if let Some(listing) = args.list {
        if let Err(e) = list(&engine, listing, args.json) {
            eprintln!("{e}");
            process::exit(1);
        }
        return;
    }

    let contents = args.contents.clone().unwrap_or_default();
    let source = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
            process::exit(1);
        })
    } else {
        contents
    };

    let expression = match engine.parse(source.trim()) {
        Ok(expression) => expression,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    };

    if args.tree {
        println!("{}", expression.tree());
    }

    match expression.evaluate(args.variables.as_slice()) {
        Ok(value) => println!("{value}"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}
