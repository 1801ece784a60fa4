//! Lyir Compiler CLI

use std::io::IsTerminal;

use lyir_diagnostic::TerminalEmitter;
use lyirc::commands::{check_files, parse_check_options};

fn main() {
    lyirc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "check" => {
            let mut options = match parse_check_options(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!();
                    print_check_usage();
                    std::process::exit(1);
                }
            };

            let is_tty = std::io::stderr().is_terminal();
            options.config.stderr_is_tty = is_tty;
            let emitter = TerminalEmitter::stderr(options.config.color, is_tty);

            let code = check_files(options, Box::new(emitter), &mut std::io::stdout());
            std::process::exit(code);
        }
        "version" | "--version" | "-V" => {
            println!("lyirc {}", env!("CARGO_PKG_VERSION"));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("error: unknown command '{}'", args[1]);
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Lyir Compiler");
    println!();
    println!("Usage: lyirc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <files...>   Load sources and report on them");
    println!("  version            Print version information");
    println!("  help               Show this message");
    println!();
    println!("Set RUST_LOG=lyirc=debug for tracing output.");
}

fn print_check_usage() {
    eprintln!("Usage: lyirc check <files...> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --byte-positions              Print name[offset] instead of name(line, col)");
    eprintln!("  --color=<auto|always|never>   Colorize diagnostic tags (default: auto)");
    eprintln!("  --target=<name>               x86_64-linux (default) or x86_64-windows");
    eprintln!("  --max-interned-size=<bytes>   Size cap for arena-backed strings");
    eprintln!("  -I <dir>                      Add an include directory");
    eprintln!("  -L <dir>                      Add a library directory");
    eprintln!("  -l <lib>                      Link against a library");
}
