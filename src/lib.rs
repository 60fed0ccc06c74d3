pub mod catalog;
pub mod config;
pub mod confirm;
pub mod parse;
pub mod plex;
pub mod reconcile;
pub mod scan;
pub mod skiplist;
