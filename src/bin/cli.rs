//! CLI for converting a Haar cascade XML description into a C header.
//!
//! Usage:
//!   cascade-flatten cascade.xml                     # writes haar.h
//!   cascade-flatten cascade.xml -o detector.h
//!   cascade-flatten cascade.xml --cascade haarcascade_frontalface_default

use std::path::PathBuf;

use cascade_flatten::{load_cascade, write_header};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cascade-flatten")]
#[command(author, version, about = "Flatten a Haar cascade XML into a C header table", long_about = None)]
struct Args {
    /// Input cascade XML file
    #[arg(required = true)]
    input: PathBuf,

    /// Output header file
    #[arg(short, long, default_value = "haar.h")]
    output: PathBuf,

    /// Tag name of the classifier root element; by default the first
    /// element with type_id="opencv-haar-classifier" is used
    #[arg(long)]
    cascade: Option<String>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> cascade_flatten::Result<()> {
    if args.verbose {
        eprintln!("Parsing cascade from {:?}...", args.input);
    }

    let cascade = load_cascade(&args.input, args.cascade.as_deref())?;

    if args.verbose {
        eprintln!(
            "Parsed {}x{} window, {} stage(s), {} node(s)",
            cascade.width,
            cascade.height,
            cascade.num_stages(),
            cascade.num_nodes()
        );
    }

    write_header(&cascade, &args.output)?;

    if args.verbose {
        eprintln!("Wrote {} row(s) to {:?}", cascade.num_nodes(), args.output);
    }

    Ok(())
}
