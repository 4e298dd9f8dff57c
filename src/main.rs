use std::process::ExitCode;

fn main() -> ExitCode {
    patroid::cli::main()
}
