use clap::Parser;
use sasp::cli::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!("sasp={}", cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Command::Serve(args) = &cli.command {
        if let Err(e) = sasp::api::run_http_server(args.port).await {
            tracing::error!("server failed: {e}");
            eprintln!("Server error: {e}");
            std::process::exit(1);
        }
        return;
    }

    match sasp::cli::execute(&cli.command) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
