pub mod db;
pub mod documents;
