use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use measure_extract::extractor::Extractor;
use measure_extract::lexicon::HyponymGraph;
use measure_extract::measurement_config::{
    ExtractorConfig, MeasurementParams, ENV_HYPONYM_GRAPH, ENV_MEASUREMENT_PARAMS,
};
use measure_extract::syntax::{ConlluReader, NlpProvider};
use measure_extract::text_processing::Formatter;

const USAGE: &str = "usage: measure-extract <format|extract> <file> [--json]

  format   print each line of <file> rewritten for an external parser
  extract  tag and convert the CoNLL-U sentences in <file>

environment:
  MEASUREMENT_KIND    d|m|t|v|e (default d)
  MAX_GRAM            longest unit phrase to match (default 2)
  RETURN_UNCONVERTED  print measurements that could not be normalised
  MEASUREMENT_PARAMS  JSON file overriding per-kind parameters
  HYPONYM_GRAPH       JSON concept graph replacing the built-in unit hierarchy";

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|a| !a.starts_with("--"))
        .collect();

    let (command, path) = match positional.as_slice() {
        [command, path] => (*command, *path),
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let config = ExtractorConfig::from_env()?;
    let text = fs::read_to_string(path).with_context(|| format!("Invalid filepath! {path}"))?;
    info!(command, path, kind = %config.kind, "Starting measure-extract");

    match command {
        "format" => {
            let formatter = Formatter::new(config.kind);
            for line in text.lines() {
                println!("{}", formatter.format(line));
            }
        }
        "extract" => {
            let params = match env::var(ENV_MEASUREMENT_PARAMS) {
                Ok(params_path) => MeasurementParams::from_json_file(params_path)?,
                Err(_) => MeasurementParams::default(),
            };
            let hierarchy = match env::var(ENV_HYPONYM_GRAPH) {
                Ok(graph_path) => HyponymGraph::from_json_file(&graph_path)
                    .with_context(|| format!("Failed to load hyponym graph {graph_path}"))?,
                Err(_) => HyponymGraph::builtin(),
            };
            info!(concepts = hierarchy.len(), "Loaded unit hierarchy");

            let reader = ConlluReader::new();
            let sentences = reader.parse(&text)?;
            let extractor = Extractor::from_config(&config, &params, &hierarchy, reader)?;
            let extraction = extractor.extract_sentences(&sentences);

            if json {
                println!("{}", serde_json::to_string_pretty(&extraction)?);
            } else {
                for measurement in &extraction.measurements {
                    println!("{measurement}");
                }
            }
        }
        other => bail!("unknown command '{other}'\n{USAGE}"),
    }

    Ok(())
}
