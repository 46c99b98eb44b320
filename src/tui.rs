//! Terminal front end: a menu to configure the table and a table scene where
//! the human plays against bots.

pub mod app;
pub mod controller;
mod ui;
