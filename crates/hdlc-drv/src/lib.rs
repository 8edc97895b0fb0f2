//! hdlc-drv - The command-line driver.
//!
//! `hdlc <file>|-` reads one source (standard input for `-`), parses it
//! into a resolved AST, prints the text dump to standard error, and
//! writes one output file per registered back-end. The process exits 0
//! on success and 1 on any I/O or parse error; diagnostics print as
//! `file:line:column: error: message`.

pub mod backend;

use std::process::ExitCode;

use bumpalo::Bump;
use clap::{Parser as ClapParser, ValueEnum};

use hdlc_ast::context::Context;
use hdlc_ast::{build_dump_graph, dump_module_text};
use hdlc_par::parse_top_level_module;
use hdlc_util::diagnostic::Handler;
use hdlc_util::source::SourceMap;

/// Format of the dump printed to standard error after a successful
/// parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    Text,
    Json,
    Dot,
}

/// HDL compiler front end.
#[derive(ClapParser, Debug)]
#[command(name = "hdlc", version, about = "HDL compiler front end")]
pub struct Cli {
    /// Input file, or `-` for standard input.
    pub input: String,

    /// Dump format written to standard error.
    #[arg(long, value_enum, default_value = "text")]
    pub dump: DumpFormat,
}

/// Run the driver for one input. Returns the process exit code.
pub fn run(cli: &Cli) -> ExitCode {
    match compile(&cli.input, cli.dump) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn compile(input: &str, dump: DumpFormat) -> anyhow::Result<()> {
    let _span = tracing::info_span!("compile", input).entered();

    let mut map = SourceMap::new();
    let id = map
        .load_file(input)
        .map_err(|error| anyhow::anyhow!("opening {input} failed: {error}"))?;
    let source = map.get(id).expect("source just loaded");

    let arena = Bump::new();
    let ctx = Context::new(&arena);
    let handler = Handler::new();

    let module = match parse_top_level_module(&ctx, &source, &handler) {
        Ok(module) => module,
        Err(_) => {
            // one error per invocation, already collected
            anyhow::bail!("{}", handler.render_all(&map).trim_end());
        }
    };

    match dump {
        DumpFormat::Text => eprint!("{}", dump_module_text(module.module, &source)),
        DumpFormat::Json => {
            let (graph, root) = build_dump_graph(module, &source);
            eprint!("{}", graph.to_json(Some(root)));
        }
        DumpFormat::Dot => {
            let (graph, root) = build_dump_graph(module, &source);
            eprint!("{}", graph.to_dot(Some(root)));
        }
    }

    for backend in backend::backends() {
        let output_name = format!("{}{}", input, backend.output_extension());
        tracing::debug!(backend = backend.name(), output = %output_name, "writing");
        let mut file = std::fs::File::create(&output_name)
            .map_err(|error| anyhow::anyhow!("creating {output_name} failed: {error}"))?;
        backend
            .construct()
            .run(module, &source, &mut file)
            .map_err(|error| anyhow::anyhow!("writing {output_name} failed: {error}"))?;
    }
    Ok(())
}
