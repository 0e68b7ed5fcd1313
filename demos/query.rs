//! Prints the commands matching the first argument. Pass `--run` to execute the best match.
//!
//!     cargo run --example query -- pa
//!     RUST_LOG=debug cargo run --example query -- next --run
use mpris_commander::{Controller, Item};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_default();
    let run = args.any(|arg| arg == "--run");

    let mut controller = Controller::new();
    if controller.setup_session() == 0 {
        println!("No players found.");
        return;
    }

    let items = controller.query(&input);
    for item in &items {
        println!(
            "{:>3}%  {:<16} {}  [{} on {}]",
            item.score, item.title, item.subtext, item.method, item.bus_id
        );
    }

    if run {
        match best(&items) {
            Some(item) => {
                if let Err(error) = controller.execute(item) {
                    println!("ERROR: {}", error);
                    std::process::exit(1);
                }
            }
            None => println!("Nothing to run."),
        }
    }
}

// Highest score wins; the first one on ties.
fn best(items: &[Item]) -> Option<&Item> {
    items
        .iter()
        .fold(None, |best: Option<&Item>, item| match best {
            Some(current) if current.score >= item.score => Some(current),
            _ => Some(item),
        })
}
