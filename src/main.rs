#[tokio::main]
async fn main() -> anyhow::Result<()> {
    falsify_lib::run().await
}
