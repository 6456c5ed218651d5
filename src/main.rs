use assisted_installer::Cli;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    std::process::exit(cli.run().await);
}
