use anyhow::Result;
use tracing::info;

use crate::cli::{AppContext, common::find_result, ensure_authenticated};

/// Looks up the item, records it as recently opened, and prints its url.
/// Launching a browser is left to the caller, e.g. `open $(ldr open UUID)`.
pub async fn handle(ctx: &AppContext, args: super::OpenArgs) -> Result<()> {
    ensure_authenticated(&ctx.client)?;

    let item = find_result(ctx, &args.project, &args.uuid).await?;
    ctx.collections.recent().track_open(item.uuid())?;
    info!(uuid = %item.uuid(), kind = %item.kind(), "opened");
    ctx.output.emit_text(item.url())
}
