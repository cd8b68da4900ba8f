fn main() {
    if let Err(e) = jsniscope_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
