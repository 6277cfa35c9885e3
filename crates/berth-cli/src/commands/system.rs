use super::AppContext;
use anyhow::Result;

pub async fn health(ctx: &AppContext) -> Result<()> {
    let health = ctx.client.health().await?;
    println!("{} ({})", health.status, health.timestamp);
    Ok(())
}

pub async fn version(ctx: &AppContext) -> Result<()> {
    let version = ctx.client.version().await?;
    println!("{} build {}", version.version, version.build);
    Ok(())
}
