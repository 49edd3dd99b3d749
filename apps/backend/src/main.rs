#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_tutor_backend::run().await
}
