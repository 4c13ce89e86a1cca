use clap::Parser;

use condense::cli::Args;

fn main() {
    let args = Args::parse();
    match condense::run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("condense: {err:#}");
            std::process::exit(2);
        }
    }
}
