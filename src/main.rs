#[tokio::main]
async fn main() -> anyhow::Result<()> {
    culturastock_lib::run().await
}
