pub mod cli;

mod commands;
mod context;
mod logging;
