pub mod db;
pub mod upsert;
