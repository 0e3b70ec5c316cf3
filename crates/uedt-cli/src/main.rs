fn main() {
    if let Err(error) = uedt_cli::run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
