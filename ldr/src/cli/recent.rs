use anyhow::Result;

use crate::{
    cli::AppContext,
    output::{OutputFormat, render_table_dynamic},
};

pub fn handle(ctx: &AppContext, args: super::RecentArgs) -> Result<()> {
    let recent = ctx.collections.recent();
    match args.command {
        super::RecentCommands::List => {
            let entries = recent.entries()?;
            if ctx.output.format() == OutputFormat::Table {
                let headers = ["opened", "uuid"].map(String::from);
                let rows: Vec<Vec<String>> = entries
                    .iter()
                    .map(|entry| {
                        vec![
                            entry.opened_at.format(&ctx.date_format).to_string(),
                            entry.uuid.clone(),
                        ]
                    })
                    .collect();
                return ctx.output.emit_text(&render_table_dynamic(&headers, &rows));
            }
            ctx.output.emit_json(&entries)
        }
        super::RecentCommands::Clear => {
            recent.clear()?;
            ctx.output.emit_text("recently opened cleared")
        }
    }
}
