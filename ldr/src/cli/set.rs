use anyhow::Result;
use lightdash::prelude::*;

use crate::{
    cli::{
        AppContext,
        common::{find_result, resolve_set},
        ensure_authenticated,
    },
    output::OutputFormat,
};

pub async fn handle(ctx: &AppContext, args: super::SetArgs) -> Result<()> {
    let sets = ctx.collections.sets();
    match args.command {
        super::SetCommands::List => {
            let all = sets.list()?;
            if ctx.output.format() == OutputFormat::Table {
                return ctx.output.emit_table(&all);
            }
            ctx.output.emit_json(&all)
        }
        super::SetCommands::Show { set } => {
            let set = resolve_set(ctx, &set)?;
            if ctx.output.format() == OutputFormat::Table {
                return ctx.output.emit_table(&set.items);
            }
            ctx.output.emit_json(&set)
        }
        super::SetCommands::Create { name, add, project } => {
            let set = match add {
                Some(uuid) => {
                    ensure_authenticated(&ctx.client)?;
                    let item = find_result(ctx, &project, &uuid).await?;
                    sets.create_and_add(&name, DashboardSetItem::from(&item))?
                }
                None => sets.create(&name)?,
            };
            ctx.output.emit_json(&set)
        }
        super::SetCommands::Rename { set, name } => {
            let set = resolve_set(ctx, &set)?;
            sets.rename(&set.id, &name)?;
            ctx.output
                .emit_text(&format!("renamed set \"{}\" to \"{}\"", set.name, name.trim()))
        }
        super::SetCommands::Delete { set } => {
            let set = resolve_set(ctx, &set)?;
            sets.delete(&set.id)?;
            ctx.output.emit_text(&format!("deleted set \"{}\"", set.name))
        }
        super::SetCommands::Add { set, uuid, project } => {
            let set = resolve_set(ctx, &set)?;
            if set.contains(&uuid) {
                return ctx.output.emit_text(&format!("{uuid} already in set"));
            }
            ensure_authenticated(&ctx.client)?;
            let item = find_result(ctx, &project, &uuid).await?;
            sets.add_item(&set.id, DashboardSetItem::from(&item))?;
            ctx.output
                .emit_text(&format!("added \"{}\" to set \"{}\"", item.name(), set.name))
        }
        super::SetCommands::Remove { set, uuid } => {
            let set = resolve_set(ctx, &set)?;
            sets.remove_item(&set.id, &uuid)?;
            ctx.output
                .emit_text(&format!("removed {uuid} from set \"{}\"", set.name))
        }
        super::SetCommands::Urls { set } => {
            let set = resolve_set(ctx, &set)?;
            let recent = ctx.collections.recent();
            for item in &set.items {
                recent.track_open(&item.uuid)?;
            }
            let urls = DashboardSets::urls_of(&set);
            if ctx.output.format() == OutputFormat::Table {
                return ctx.output.emit_text(&urls.join("\n"));
            }
            ctx.output.emit_json(&urls)
        }
    }
}
