fn main() {
    if let Err(error) = niview::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
