use std::io;

use anyhow::Result;
use assertion_cli::{init_tracing, run, Options};
use clap::Parser;

fn main() -> Result<()> {
    init_tracing();
    let options = Options::parse();

    let mut out = io::stdout().lock();
    let mut diag = io::stderr().lock();
    run(&options, &mut out, &mut diag)?;

    Ok(())
}
