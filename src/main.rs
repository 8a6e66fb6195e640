use bezier_ease::bezier::CubicBezier;
use bezier_ease::config::{config_dir, Config};
use log::{error, info, warn};
use std::path::PathBuf;

const USAGE: &str = "usage: bezier-ease [--config <path>] [--samples <n>] <curve> [x ...]

  <curve>  a configured curve name, a CSS keyword (ease, ease-in, ...)
           or cubic-bezier(x1, y1, x2, y2)
  x        progress values in [0, 1]; without any, a sample table is printed";

//  Arguments

#[derive(Debug, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    samples: Option<usize>,
    curve: String,
    inputs: Vec<String>,
}

#[derive(Debug, PartialEq)]
enum ParsedArgs {
    Run(Args),
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<ParsedArgs, String> {
    let mut config = None;
    let mut samples = None;
    let mut positional = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParsedArgs::Help),
            "--config" => {
                let path = args.next().ok_or("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            "--samples" => {
                let n = args.next().ok_or("--samples requires a number")?;
                match n.parse::<usize>() {
                    Ok(n) if n > 0 => samples = Some(n),
                    _ => return Err(format!("--samples: expected a positive integer, got {:?}", n)),
                }
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let curve = positional.next().ok_or("missing <curve>")?;
    Ok(ParsedArgs::Run(Args {
        config,
        samples,
        curve,
        inputs: positional.collect(),
    }))
}

//  Config

/// Try to load the config from `$XDG_CONFIG_HOME/bezier-ease/config.json`,
/// falling back to compiled-in defaults.
fn load_default_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

//  Main

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(ParsedArgs::Run(args)) => args,
        Ok(ParsedArgs::Help) => {
            println!("{}", USAGE);
            return;
        }
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, USAGE);
            std::process::exit(2);
        }
    };

    // An explicitly requested config must load; the default one is optional.
    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => load_default_config(),
    };

    let curve = match config.curve(&args.curve) {
        Ok(curve) => curve,
        Err(e) => {
            error!("curve {:?}: {}", args.curve, e);
            std::process::exit(1);
        }
    };
    info!("evaluating {}", curve);

    if args.inputs.is_empty() {
        print_table(&curve, args.samples.unwrap_or(config.samples));
        return;
    }

    let mut inputs = Vec::with_capacity(args.inputs.len());
    for raw in &args.inputs {
        match raw.parse::<f64>() {
            Ok(x) => inputs.push(x),
            Err(e) => {
                error!("invalid input {:?}: {}", raw, e);
                std::process::exit(1);
            }
        }
    }
    for x in inputs {
        if !(0.0..=1.0).contains(&x) {
            warn!("input {} is outside [0, 1] and will be clamped", x);
        }
        println!("{}\t{}", x, curve.evaluate(x));
    }
}

/// Print `samples + 1` evenly spaced points of `curve`.
fn print_table(curve: &CubicBezier, samples: usize) {
    for i in 0..=samples {
        let x = i as f64 / samples as f64;
        println!("{:.4}\t{:.6}", x, curve.evaluate(x));
    }
}
