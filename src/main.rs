use clap::Parser;
use netpath::cli::{
    analysis, handle_completions, handle_config_init, nodes, route, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => netpath::cli::serve::run_serve(args).await,
        Commands::Route(args) => route::handle_route(&args).await.map(|out| println!("{}", out)),
        Commands::Nodes(args) => nodes::handle_nodes(&args).await.map(|out| println!("{}", out)),
        Commands::Analysis(args) => analysis::handle_analysis(&args)
            .await
            .map(|out| println!("{}", out)),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
