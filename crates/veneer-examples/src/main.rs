//! Runs every example scenario against stdout.

use std::process::ExitCode;
use std::sync::Arc;

use veneer::ConsoleSink;
use veneer_examples::{decorator_shapes, hello_world, log_levels, magic_number};

fn main() -> ExitCode {
    let sink = Arc::new(ConsoleSink);

    let scenarios: [(&str, fn(Arc<dyn veneer::Sink>) -> veneer::Result<()>); 4] = [
        ("hello_world", hello_world),
        ("decorator_shapes", decorator_shapes),
        ("magic_number", magic_number),
        ("log_levels", log_levels),
    ];

    for (name, scenario) in scenarios {
        println!("--- {name} ---");
        if let Err(e) = scenario(sink.clone()) {
            eprintln!("{name} failed: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
