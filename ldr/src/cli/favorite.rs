use anyhow::Result;
use lightdash::prelude::*;

use crate::{
    cli::{AppContext, common::fetch_results, ensure_authenticated, search::results_table},
    output::OutputFormat,
};

pub async fn handle(ctx: &AppContext, args: super::FavoriteArgs) -> Result<()> {
    let favorites = ctx.collections.favorites();
    match args.command {
        super::FavoriteCommands::Toggle { uuid } => {
            let added = favorites.toggle(&uuid)?;
            let verb = if added { "added" } else { "removed" };
            ctx.output.emit_text(&format!("{verb} favorite {uuid}"))
        }
        super::FavoriteCommands::List { project } => {
            let ids = favorites.ids()?;
            if project.project.is_none() {
                if ctx.output.format() == OutputFormat::Table {
                    return ctx.output.emit_text(&ids.join("\n"));
                }
                return ctx.output.emit_json(&ids);
            }

            ensure_authenticated(&ctx.client)?;
            let results = fetch_results(ctx, &project).await?;
            let items: Vec<SearchResult> = ids
                .iter()
                .filter_map(|id| results.find(id).cloned())
                .collect();
            if ctx.output.format() == OutputFormat::Table {
                return ctx
                    .output
                    .emit_text(&results_table(&items, &ctx.date_format));
            }
            ctx.output.emit_json(&items)
        }
    }
}
