use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    axpath::cli::app::run().await
}
