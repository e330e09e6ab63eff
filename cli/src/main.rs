use clap::Parser;
use ojspider_cli::{cmd::GlobalArgs, util};

#[tokio::main]
async fn main() {
    let app = GlobalArgs::parse();
    util::init_logger(app.verbose);
    app.exec_subcmd().await.unwrap_or_else(|e| {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    });
}
