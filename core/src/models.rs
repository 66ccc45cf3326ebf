use serde::{Deserialize, Serialize};

/// A recipe held in the scratch file, pending commit to the database.
/// Drafts have no stable id; they are addressed by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub name: String,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub ingredients: Vec<String>,
}

/// Stock ingredient lists for common Dutch recipes, keyed by lowercase name.
pub const DEFAULT_INGREDIENTS: &[(&str, &[&str])] = &[
    ("pannenkoeken", &["bloem", "melk", "eieren", "zout"]),
    ("stamppot", &["aardappelen", "boerenkool", "rookworst", "spekjes"]),
    ("erwtensoep", &["spliterwten", "varkensvlees", "prei", "wortel"]),
    ("bitterballen", &["rundvlees", "bouillon", "bloem", "paneermeel"]),
    ("hutspot", &["aardappelen", "wortelen", "uien", "rundvlees"]),
    ("poffertjes", &["bloem", "gist", "melk", "boter"]),
    ("boerenkool", &["boerenkool", "aardappelen", "rookworst", "spekjes"]),
    ("appeltaart", &["appels", "bloem", "boter", "kaneel"]),
];

/// Case-insensitive exact match against the stock table. No fuzzy or
/// partial matching; unknown names return `None`.
#[must_use]
pub fn default_ingredients(name: &str) -> Option<&'static [&'static str]> {
    DEFAULT_INGREDIENTS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, ingredients)| ingredients)
}
