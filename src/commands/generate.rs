//! Generate static files

use anyhow::Result;
use std::time::Instant;

use crate::generator::{GenerateReport, Generator};
use crate::Site;

/// Generate the static site into the public directory
pub async fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let generator = Generator::new(site)?;
    let GenerateReport {
        pages,
        posts,
        assets,
    } = generator.generate().await?;

    tracing::info!(
        "Generated {} pages ({} posts, {} assets) in {:.2}s",
        pages,
        posts,
        assets,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
