mod cli;
mod out;
mod ui;

/// Entry point for the `js-mutant` binary.
fn main() -> anyhow::Result<()> {
    cli::run()
}
