use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, params, params_from_iter};

use crate::drafts::DraftStore;
use crate::models::{Draft, Recipe};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Database { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                ingredients TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    // The ingredients column holds the list JSON-encoded.
    fn recipe_from_row(row: &rusqlite::Row) -> rusqlite::Result<Recipe> {
        let raw: String = row.get(2)?;
        let ingredients = serde_json::from_str(&raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;
        Ok(Recipe {
            id: row.get(0)?,
            name: row.get(1)?,
            ingredients,
        })
    }

    /// Insert every draft as a row. Returns the number of rows inserted.
    /// Inserts are not wrapped in a transaction; a mid-way failure surfaces
    /// the error and leaves the earlier rows in place.
    pub fn commit_drafts(&self, drafts: &[Draft]) -> Result<usize> {
        for draft in drafts {
            let ingredients = serde_json::to_string(&draft.ingredients)?;
            self.conn.execute(
                "INSERT INTO recipes (name, ingredients) VALUES (?1, ?2)",
                params![draft.name, ingredients],
            )?;
        }
        Ok(drafts.len())
    }

    pub fn list_all(&self) -> Result<Vec<Recipe>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, ingredients FROM recipes ORDER BY id")?;
        let recipes = stmt
            .query_map([], Self::recipe_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(recipes)
    }

    pub fn get_recipe(&self, id: i64) -> Result<Option<Recipe>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, ingredients FROM recipes WHERE id = ?1")?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::recipe_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Union of ingredient lists across the matched ids, in row order and
    /// not deduplicated. The IN clause is sized to the id list; an empty
    /// list short-circuits to an empty union.
    pub fn fetch_ingredients_by_ids(&self, ids: &[i64]) -> Result<Vec<String>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql =
            format!("SELECT ingredients FROM recipes WHERE id IN ({placeholders}) ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let columns = stmt
            .query_map(params_from_iter(ids.iter()), |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut ingredients = Vec::new();
        for raw in columns {
            let list: Vec<String> =
                serde_json::from_str(&raw).context("Malformed ingredients column")?;
            ingredients.extend(list);
        }
        Ok(ingredients)
    }

    pub fn delete_recipe(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM recipes WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    /// Move a persisted recipe back to the draft store: fetch, delete the
    /// row, then append the draft. The two stores are not updated
    /// atomically; a crash between the delete and the append loses the
    /// recipe.
    pub fn delete_and_export(&self, id: i64, drafts: &DraftStore) -> Result<Option<Draft>> {
        let Some(recipe) = self.get_recipe(id)? else {
            return Ok(None);
        };
        self.delete_recipe(id)?;
        let draft = Draft {
            name: recipe.name,
            ingredients: recipe.ingredients,
        };
        drafts.append(draft.clone())?;
        Ok(Some(draft))
    }
}
