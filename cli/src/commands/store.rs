use anyhow::{Result, bail};
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use recepten_core::db::Database;
use recepten_core::drafts::DraftStore;
use recepten_core::models::default_ingredients;

use super::helpers::{format_ingredients, json_error, truncate};

pub(crate) fn cmd_commit(db: &Database, drafts: &DraftStore, json: bool) -> Result<()> {
    let pending = drafts.list();
    if pending.is_empty() {
        bail!("No recipes to save");
    }

    let saved = db.commit_drafts(&pending)?;
    drafts.clear()?;

    if json {
        println!("{}", serde_json::json!({ "success": true, "saved": saved }));
    } else {
        println!("Saved {saved} draft(s) to the database");
    }
    Ok(())
}

pub(crate) fn cmd_recipes(db: &Database, json: bool) -> Result<()> {
    let recipes = db.list_all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }

    if recipes.is_empty() {
        println!("No saved recipes. Commit drafts with: recepten commit");
        return Ok(());
    }

    #[derive(Tabled)]
    struct RecipeRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Ingredients")]
        ingredients: String,
    }

    let rows: Vec<RecipeRow> = recipes
        .iter()
        .map(|recipe| RecipeRow {
            id: recipe.id,
            name: truncate(&recipe.name, 35),
            ingredients: format_ingredients(&recipe.ingredients),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .to_string();
    println!("{table}");
    Ok(())
}

pub(crate) fn cmd_ingredients(db: &Database, ids: &[i64], json: bool) -> Result<()> {
    let ingredients = db.fetch_ingredients_by_ids(ids)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "success": true, "ingredients": ingredients })
        );
    } else if ingredients.is_empty() {
        println!("No ingredients found for the given ids");
    } else {
        for ingredient in &ingredients {
            println!("{ingredient}");
        }
    }
    Ok(())
}

pub(crate) fn cmd_defaults(name: &str, json: bool) -> Result<()> {
    match default_ingredients(name) {
        Some(ingredients) => {
            if json {
                println!("{}", serde_json::json!({ "ingredients": ingredients }));
            } else {
                for ingredient in ingredients {
                    println!("{ingredient}");
                }
            }
            Ok(())
        }
        None => {
            if json {
                println!("{}", json_error(&format!("No defaults for '{name}'")));
            } else {
                eprintln!("No defaults for '{name}'");
            }
            process::exit(2);
        }
    }
}

pub(crate) fn cmd_export(db: &Database, drafts: &DraftStore, id: i64, json: bool) -> Result<()> {
    match db.delete_and_export(id, drafts)? {
        Some(draft) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&draft)?);
            } else {
                let name = &draft.name;
                println!("Moved recipe {id} ({name}) back to drafts");
            }
            Ok(())
        }
        None => {
            if json {
                println!("{}", json_error("Recipe not found"));
            } else {
                eprintln!("No recipe with id {id}");
            }
            process::exit(2);
        }
    }
}
