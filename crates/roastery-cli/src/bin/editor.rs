// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use roastery_cli::Program;
use std::env;

fn main() {
    if let Err(error) = roastery_cli::run(Program::Editor, env::args().skip(1)) {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}
