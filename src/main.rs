//! okvmd CLI
//!
//! Entry point for the main KVM-over-IP daemon.

use clap::Parser;
use okvmd::{app, Args};
use std::process;

fn main() {
    let args = Args::parse();
    process::exit(app::run(&args, &["okvmd"]));
}
