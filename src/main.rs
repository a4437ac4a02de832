fn main() {
    if let Err(err) = listing_cleaner::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
