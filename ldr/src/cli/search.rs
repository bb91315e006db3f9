use anyhow::Result;
use lightdash::prelude::*;

use crate::{
    cli::{AppContext, common::fetch_results, ensure_authenticated},
    output::{OutputFormat, render_table_dynamic},
};

pub async fn handle(ctx: &AppContext, args: super::SearchArgs) -> Result<()> {
    ensure_authenticated(&ctx.client)?;

    let results = fetch_results(ctx, &args.project).await?;

    let mut filter = SearchFilter::default();
    if let Some(text) = args.text {
        filter = filter.text(text);
    }
    if let Some(space) = args.space {
        filter = filter.space(space);
    }
    if let Some(kind) = args.kind {
        filter = filter.kind(kind);
    }

    let view = SearchView::build(
        &results,
        &filter,
        args.sort,
        &ctx.collections.favorites().ids()?,
        &ctx.collections.recent().uuids()?,
    );

    if ctx.output.format() == OutputFormat::Table {
        return ctx.output.emit_text(&render_sections(&view, &ctx.date_format));
    }
    ctx.output.emit_json(&view)
}

fn render_sections(view: &SearchView, date_format: &str) -> String {
    if view.is_empty() {
        return "no matching items".to_string();
    }
    view.sections()
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(title, items)| {
            format!(
                "{title} ({})\n{}",
                items.len(),
                results_table(items, date_format)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Table of search results with type, name, space, update time, views, and uuid columns.
pub(crate) fn results_table(items: &[SearchResult], date_format: &str) -> String {
    let headers = ["type", "name", "space", "updated", "views", "uuid"].map(String::from);
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.kind().to_string(),
                item.name().to_string(),
                item.space_name().unwrap_or_default().to_string(),
                item.updated_at()
                    .map(|t| t.format(date_format).to_string())
                    .unwrap_or_default(),
                item.views().map(|v| v.to_string()).unwrap_or_default(),
                item.uuid().to_string(),
            ]
        })
        .collect();
    render_table_dynamic(&headers, &rows)
}
