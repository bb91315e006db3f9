use anyhow::Result;

use crate::cli::{AppContext, ensure_authenticated};

pub async fn handle(ctx: &AppContext, args: super::ChartArgs) -> Result<()> {
    ensure_authenticated(&ctx.client)?;

    let chart = ctx.client.chart(&args.uuid).get().await?;
    if args.raw {
        return ctx.output.emit_json(&chart);
    }
    ctx.output.emit_text(&chart.to_markdown())
}
