use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = match hdlc_drv::Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // --help and --version land here too; only real usage
            // errors fail the process
            let code = if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = error.print();
            return code;
        }
    };
    hdlc_drv::run(&cli)
}
