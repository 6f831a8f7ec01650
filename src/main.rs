use std::env;
use std::process::ExitCode;

use unisens::UnisensFile;

fn main() -> ExitCode {
    let Some(index_path) = env::args().nth(1) else {
        eprintln!("usage: unisens <path/to/unisens.xml>");
        return ExitCode::FAILURE;
    };

    match UnisensFile::open(&index_path) {
        Ok(recording) => {
            print!("{recording}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("could not decode {index_path}: {e}");
            ExitCode::FAILURE
        }
    }
}
