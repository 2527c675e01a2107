use std::env;
use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use minscript::Executor;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(file_path) = args.get(1) else {
        eprintln!("usage: minscript <script>");
        return ExitCode::FAILURE;
    };
    let code = match read_file(file_path) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let ex = Executor::new(code);
    let start = Instant::now();
    match ex.run() {
        Ok(value) => {
            let elapsed = start.elapsed();
            eprintln!("completed in {elapsed:?}: {value}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let elapsed = start.elapsed();
            eprintln!("error after {elapsed:?}: {err}");
            ExitCode::FAILURE
        }
    }
}

fn read_file(file_path: &str) -> Result<String, String> {
    match fs::metadata(file_path) {
        Ok(metadata) => {
            if !metadata.is_file() {
                return Err(format!("{file_path} is not a file"));
            }
        }
        Err(err) => {
            return Err(format!("reading {file_path}: {err}"));
        }
    }
    fs::read_to_string(file_path).map_err(|err| format!("reading {file_path}: {err}"))
}
