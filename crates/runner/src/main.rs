mod run;
mod settings_loader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run::run().await
}
