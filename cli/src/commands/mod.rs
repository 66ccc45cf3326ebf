mod draft;
mod helpers;
mod store;

pub(crate) use draft::{cmd_draft_add, cmd_draft_clear, cmd_draft_delete, cmd_draft_list};
pub(crate) use store::{cmd_commit, cmd_defaults, cmd_export, cmd_ingredients, cmd_recipes};
