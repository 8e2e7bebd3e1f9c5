//! Clear-cache command

use tracing::info;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_app_state(&config)?;

    let removed = state.analysis.clear_cache().await?;
    info!(removed, directory = %config.cache.directory.display(), "Cache cleared");
    println!("Removed {} cached analyses", removed);

    Ok(())
}
