pub mod db;
pub mod drafts;
pub mod models;
