use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use recepten_core::drafts::DraftStore;
use recepten_core::models::Draft;

use super::helpers::{format_ingredients, json_error, truncate};

pub(crate) fn cmd_draft_add(
    drafts: &DraftStore,
    name: &str,
    ingredients: Vec<String>,
    json: bool,
) -> Result<()> {
    let draft = Draft {
        name: name.to_string(),
        ingredients,
    };
    drafts.append(draft.clone())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&draft)?);
    } else {
        let count = draft.ingredients.len();
        println!("Added draft: {name} ({count} ingredients)");
    }
    Ok(())
}

pub(crate) fn cmd_draft_list(drafts: &DraftStore, json: bool) -> Result<()> {
    let list = drafts.list();

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if list.is_empty() {
        println!("No drafts. Add one with: recepten draft add <name> <ingredients>...");
        return Ok(());
    }

    #[derive(Tabled)]
    struct DraftRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Ingredients")]
        ingredients: String,
    }

    let rows: Vec<DraftRow> = list
        .iter()
        .enumerate()
        .map(|(index, draft)| DraftRow {
            index,
            name: truncate(&draft.name, 35),
            ingredients: format_ingredients(&draft.ingredients),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .to_string();
    println!("{table}");
    Ok(())
}

pub(crate) fn cmd_draft_delete(drafts: &DraftStore, index: usize, json: bool) -> Result<()> {
    if drafts.remove_at(index)? {
        if json {
            println!("{}", serde_json::json!({ "success": true }));
        } else {
            println!("Deleted draft {index}");
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error("Recipe not found"));
        } else {
            eprintln!("No draft at index {index}");
        }
        process::exit(2);
    }
}

pub(crate) fn cmd_draft_clear(drafts: &DraftStore, json: bool) -> Result<()> {
    let count = drafts.list().len();
    drafts.clear()?;
    if json {
        println!("{}", serde_json::json!({ "success": true, "cleared": count }));
    } else {
        println!("Cleared {count} draft(s)");
    }
    Ok(())
}
