use clap::Parser;
use quotebook::cli::{handle_import_check, handle_schema, handle_serve, Cli, Commands};
use quotebook::ServerConfig;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            bind,
            import_path,
            max_id,
        } => handle_serve(ServerConfig {
            bind,
            import_path,
            max_id,
        }),
        Commands::Schema => handle_schema(),
        Commands::ImportCheck { path, json } => handle_import_check(path, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
