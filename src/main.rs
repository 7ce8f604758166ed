//! pgschema-gen — generate a synthetic Cypher script from a PG-Schema file.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use pgschema_gen::{counts, generate_script, schema, CountResolver, Synthesizer};

#[derive(Parser)]
#[command(name = "pgschema-gen", version, about = "PG-Schema to Cypher generator")]
struct Cli {
    /// File containing the PG-Schema definition
    schema: PathBuf,

    /// Default number of nodes for labels not in the count table
    #[arg(short = 'n', long, default_value_t = 4)]
    nodes: usize,

    /// Default number of relationships for labels not in the count table
    #[arg(short = 'e', long, default_value_t = 4)]
    edges: usize,

    /// CSV file with labels and instance counts (e.g. PostType,12)
    #[arg(short = 'c', long)]
    csv: Option<PathBuf>,

    /// Fail on malformed count table rows instead of skipping them
    #[arg(long)]
    strict_counts: bool,

    /// Seed for reproducible output
    #[arg(short = 's', long, env = "PGS_GEN_SEED")]
    seed: Option<u64>,

    /// Write the script here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Length of generated STRING values
    #[arg(long, default_value_t = 8)]
    string_length: usize,

    /// Smallest generated INT value
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    int_min: i64,

    /// Largest generated INT value
    #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
    int_max: i64,

    /// Print the parsed schema as JSON and exit
    #[arg(long)]
    dump_schema: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let schema_text = fs::read_to_string(&cli.schema)
        .map_err(|e| format!("cannot read {}: {e}", cli.schema.display()))?;

    if cli.dump_schema {
        let model = schema::parse(&schema_text)?;
        let mut out = open_output(cli.output.as_deref())?;
        serde_json::to_writer_pretty(&mut out, &model)?;
        writeln!(out)?;
        out.flush()?;
        return Ok(());
    }

    let mut resolver = CountResolver::new(cli.nodes, cli.edges);
    if let Some(path) = &cli.csv {
        resolver.extend(load_counts(path, cli.strict_counts)?);
    }

    let synth = Synthesizer::new(cli.string_length, cli.int_min..=cli.int_max)
        .ok_or_else(|| format!("--int-min {} exceeds --int-max {}", cli.int_min, cli.int_max))?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let script = generate_script(&schema_text, &resolver, &synth, &mut rng)?;

    let mut out = open_output(cli.output.as_deref())?;
    script.write_to(&mut out)?;
    Ok(())
}

/// Missing table files are not fatal: every label falls back to its default.
fn load_counts(path: &Path, strict: bool) -> pgschema_gen::Result<Vec<(String, usize)>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "count table does not exist; using defaults");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    let reader = BufReader::new(file);
    if strict {
        counts::read_table_strict(reader)
    } else {
        counts::read_table(reader)
    }
}

fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
