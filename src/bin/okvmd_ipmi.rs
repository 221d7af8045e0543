//! okvmd-ipmi CLI
//!
//! Entry point for the IPMI-to-KVM bridge daemon.

use clap::Parser;
use okvmd::{app, Args};
use std::process;

fn main() {
    let args = Args::parse();
    process::exit(app::run(&args, &["ipmi"]));
}
