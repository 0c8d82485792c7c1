use std::process::ExitCode;

fn main() -> ExitCode {
    match readings::example_apps::run_aggregate_file_app(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("aggregate_file: {err}");
            ExitCode::FAILURE
        }
    }
}
