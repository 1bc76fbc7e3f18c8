mod config;
mod derive;
mod help;
mod steps;
