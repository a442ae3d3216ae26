//! Demo driver: generates one matrix item and prints it as JSON.
//!
//! Usage: `matrix_studio [DIFFICULTY] [ITEM_INDEX] [SEED] [--out DIR]`
//!
//! With `--out`, every matrix cell and option is also written to `DIR` as
//! `matrix_N.svg` / `option_N.svg`. Logging is controlled by `RUST_LOG`;
//! generator settings by the `MATRIX_*` variables.

use std::io;
use std::path::{Path, PathBuf};

use matrix_core::matrix::{decode, GeneratorConfig, ItemGenerator, RenderedItem};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: matrix_studio [DIFFICULTY] [ITEM_INDEX] [SEED] [--out DIR]";

#[derive(Debug, PartialEq)]
struct Args {
    difficulty: i32,
    item_index: usize,
    seed: Option<String>,
    out: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut out = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--out" {
            let dir = iter.next().ok_or("--out needs a directory")?;
            out = Some(PathBuf::from(dir));
        } else {
            positional.push(arg);
        }
    }
    if positional.len() > 3 {
        return Err(format!("Unexpected argument '{}'", positional[3]));
    }

    let difficulty = match positional.first() {
        Some(s) => s
            .parse()
            .map_err(|_| format!("Invalid difficulty '{}'", s))?,
        None => 1,
    };
    let item_index = match positional.get(1) {
        Some(s) => s
            .parse()
            .map_err(|_| format!("Invalid item index '{}'", s))?,
        None => 0,
    };
    Ok(Args {
        difficulty,
        item_index,
        seed: positional.get(2).cloned(),
        out,
    })
}

fn write_svg(path: PathBuf, encoded: &str) -> io::Result<()> {
    let markup =
        decode(encoded).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    std::fs::write(path, markup)
}

fn write_svgs(dir: &Path, item: &RenderedItem) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for (i, cell) in item.matrix_cells.iter().enumerate() {
        write_svg(dir.join(format!("matrix_{}.svg", i)), cell)?;
    }
    for (i, option) in item.options.iter().enumerate() {
        write_svg(dir.join(format!("option_{}.svg", i)), option)?;
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}\n{}", msg, USAGE);
            std::process::exit(2);
        }
    };
    let config = match GeneratorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let mut generator = ItemGenerator::new(config);
    let item = generator.generate(args.difficulty, args.item_index, args.seed.as_deref());
    info!(
        "Generated item with rule set {} at level {} (seed {})",
        item.pattern_type_used, item.difficulty_level_used, item.seed
    );

    match item.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize item: {}", e);
            std::process::exit(1);
        }
    }

    if let Some(dir) = args.out {
        if let Err(e) = write_svgs(&dir, &item) {
            error!("Failed to write SVGs to {}: {}", dir.display(), e);
            std::process::exit(1);
        }
        info!(
            "Wrote {} SVG files to {}",
            item.matrix_cells.len() + item.options.len(),
            dir.display()
        );
    }
}
