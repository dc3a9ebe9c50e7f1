//! ifjc-drv — the command-line driver (§6).
//!
//! Unlike a multi-phase driver that owns a `Session` threading a `Vec`
//! of source files through separate lex/parse/codegen stages, this
//! compiler's whole pipeline is one function — [`ifjc_parse::compile`]
//! — so the driver's job shrinks to three steps: read a source (file or
//! stdin), hand it to that function along with a configured
//! [`Handler`], and write diagnostics to stderr and, on success, the
//! generated program to stdout or `-o <file>`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser as ClapParser;
use ifjc_util::Handler;

/// Single-pass IFJ21 compiler, emitting IFJcode21.
#[derive(ClapParser, Debug)]
#[command(name = "ifjc")]
#[command(author, version, about = "Compiles IFJ21 source to IFJcode21", long_about = None)]
pub struct Cli {
    /// Source file to compile. Reads standard input when omitted.
    pub file: Option<PathBuf>,

    /// Write the generated IFJcode21 program here instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Disable ANSI color codes in diagnostic output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Suppress warning diagnostics; only errors are reported.
    #[arg(long = "no-warn")]
    pub no_warn: bool,
}

/// Runs one compilation and returns the process exit status to use.
///
/// I/O failures (unreadable input, unwritable `-o` path) are reported
/// through `anyhow::Error` rather than folded into the compiler's own
/// [`ifjc_util::ExitCode`] classification — those codes describe the
/// *program being compiled*, not the driver's own environment.
pub fn run(cli: Cli) -> anyhow::Result<i32> {
    let source = read_source(cli.file.as_deref())?;

    let mut handler = Handler::new()
        .with_color(!cli.no_color)
        .with_warnings(!cli.no_warn);

    let (code, program) = ifjc_parse::compile(&source, &mut handler);

    let rendered = handler.render_all();
    if !rendered.is_empty() {
        eprintln!("{rendered}");
    }

    if let Some(program) = program {
        write_output(cli.output.as_deref(), &program)?;
    }

    Ok(code.code())
}

fn read_source(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&std::path::Path>, program: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => fs::write(path, format!("{program}\n"))
            .map_err(|e| anyhow::anyhow!("cannot write {}: {e}", path.display())),
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(program.as_bytes())?;
            lock.write_all(b"\n")?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_defaults_to_none_so_stdin_is_used() {
        let cli = Cli::parse_from(["ifjc"]);
        assert_eq!(cli.file, None);
        assert!(!cli.no_color);
        assert!(!cli.no_warn);
    }

    #[test]
    fn positional_file_and_output_flag_are_parsed() {
        let cli = Cli::parse_from(["ifjc", "main.ifj", "-o", "out.ifjcode"]);
        assert_eq!(cli.file, Some(PathBuf::from("main.ifj")));
        assert_eq!(cli.output, Some(PathBuf::from("out.ifjcode")));
    }

    #[test]
    fn no_color_and_no_warn_flags_are_parsed() {
        let cli = Cli::parse_from(["ifjc", "--no-color", "--no-warn"]);
        assert!(cli.no_color);
        assert!(cli.no_warn);
    }
}
