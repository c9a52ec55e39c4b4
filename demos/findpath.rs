//! Shortest path demo on a generated or loaded map.
//!
//! Run: cargo run --bin findpath -- --cave automata --seed 7
//! Set `RUST_LOG=debug` to see search statistics from the library.

use std::io;

use clap::Parser;
use meetpath_demos::{DemoConfig, render_colored, render_plain, run, summary};

fn main() {
    env_logger::init();
    let cfg = DemoConfig::parse();

    let report = match run(&cfg) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if cfg.plain {
        print!("{}", render_plain(&report));
    } else if let Err(e) = render_colored(&report, &mut io::stdout()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    println!("{}", summary(&report));
}
