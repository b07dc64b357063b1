fn main() {
    if let Err(err) = bookstore_data::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
