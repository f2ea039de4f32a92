use clap::Parser;
use judge_cli::cmd::GlobalArgs;

#[tokio::main]
async fn main() {
    judge_cli::logger::init();

    let app = GlobalArgs::parse();
    app.exec_subcmd().await.unwrap_or_else(|e| {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    });
}
