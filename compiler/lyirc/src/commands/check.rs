//! The `check` command: load sources through a context and report on them.

use std::io::Write;
use std::path::PathBuf;

use lyir_diagnostic::{ColorMode, DiagnosticEmitter};
use lyir_ir::{Location, TargetKind};

use crate::{CompilerConfig, Context};

/// Parsed `check` arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub files: Vec<PathBuf>,
    pub config: CompilerConfig,
}

/// Parse everything after `lyirc check`.
///
/// `-I`, `-L`, and `-l` accept their value either attached (`-Iinclude`) or
/// as the next argument.
pub fn parse_check_options(args: &[String]) -> Result<CheckOptions, String> {
    let mut options = CheckOptions::default();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];
        if arg == "--byte-positions" {
            options.config.use_byte_positions_in_diagnostics = true;
        } else if let Some(mode) = arg.strip_prefix("--color=") {
            options.config.color = mode.parse::<ColorMode>()?;
        } else if let Some(target) = arg.strip_prefix("--target=") {
            options.config.target = target.parse::<TargetKind>().map_err(|e| e.to_string())?;
        } else if let Some(size) = arg.strip_prefix("--max-interned-size=") {
            options.config.max_interned_string_size = size
                .parse()
                .map_err(|_| format!("invalid --max-interned-size value '{size}'"))?;
        } else if let Some(flag @ ("-I" | "-L" | "-l")) = arg.get(..2) {
            let value = if arg.len() > 2 {
                arg[2..].to_string()
            } else {
                i += 1;
                args.get(i)
                    .cloned()
                    .ok_or_else(|| format!("missing value after {flag}"))?
            };
            match flag {
                "-I" => options.config.include_directories.push(value.into()),
                "-L" => options.config.library_directories.push(value.into()),
                _ => options.config.link_libraries.push(value),
            }
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else {
            options.files.push(PathBuf::from(arg));
        }
        i += 1;
    }

    if options.files.is_empty() {
        return Err("no input files".to_string());
    }
    options.config.validate().map_err(|e| e.to_string())?;
    Ok(options)
}

/// Load every file, report failures, and print one summary line per source.
///
/// Returns the process exit code: 1 if any error was reported.
pub fn check_files(
    options: CheckOptions,
    emitter: Box<dyn DiagnosticEmitter + Send>,
    out: &mut dyn Write,
) -> i32 {
    let mut ctx = Context::with_emitter(options.config, emitter);
    let mut command_line = None;

    for path in &options.files {
        if let Err(err) = ctx.get_or_add_source_from_file(path) {
            let sourceid = *command_line
                .get_or_insert_with(|| ctx.add_source_from_string("<command-line>", ""));
            ctx.write_error(Location::point(sourceid, 0), err.to_string());
        }
    }

    for (id, source) in ctx.sources().iter() {
        if Some(id) == command_line {
            continue;
        }
        let _ = writeln!(
            out,
            "{}: {} bytes, {} lines",
            source.name(),
            source.text().len(),
            source.line_count()
        );
    }

    ctx.diagnostics_mut().emit_summary();
    ctx.diagnostics_mut().flush();

    let failed = ctx.has_reported_errors();
    ctx.destroy();
    i32::from(failed)
}
