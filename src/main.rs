#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = homework_status_bot::run().await {
        eprintln!("homework-status-bot fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
