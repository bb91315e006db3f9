use anyhow::Result;

use crate::{
    cli::{AppContext, ensure_authenticated},
    output::OutputFormat,
};

pub async fn handle(ctx: &AppContext, args: super::ProjectArgs) -> Result<()> {
    match args.command {
        super::ProjectCommands::List => {
            ensure_authenticated(&ctx.client)?;
            let projects = ctx.client.projects().list().await?;
            if ctx.output.format() == OutputFormat::Table {
                return ctx.output.emit_table(&projects);
            }
            ctx.output.emit_json(&projects)
        }
        super::ProjectCommands::Default { project, clear } => {
            let default = ctx.collections.default_project();
            if clear {
                default.clear()?;
                return ctx.output.emit_text("default project cleared");
            }
            if let Some(project) = project {
                default.set(&project)?;
            }
            match default.get()? {
                Some(project) => ctx.output.emit_text(&project),
                None => ctx.output.emit_text("no default project"),
            }
        }
    }
}
