use mpris_commander::{PlayerDirectory, PlayerProperties, SessionBus};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let directory = PlayerDirectory::new(SessionBus::new());
    match directory.discover() {
        Ok(players) => {
            for player in &players {
                let properties = PlayerProperties::new(player, directory.transport());
                println!("{} ({})", properties.display_name(), player.bus_id());
            }
        }
        Err(error) => {
            println!("ERROR: {}", error);
            std::process::exit(1);
        }
    }
}
