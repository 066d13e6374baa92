mod form;
mod logging;
mod models;
mod run;
mod store;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    let mut store = store::Store::new();

    match args.len() {
        1 => run::as_tui(&mut store),
        2.. => run::as_cli(&args, &mut store),
        _ => {
            eprintln!("Usage: budgetform [command]");
            Ok(())
        }
    }
}
