use std::process::ExitCode;

fn main() -> ExitCode {
    match asciimage::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(asciimage::AsciimageError::ValidationFailed { .. }) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
