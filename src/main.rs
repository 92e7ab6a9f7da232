#[tokio::main]
async fn main() -> anyhow::Result<()> {
    spanish_validator_lib::run().await
}
