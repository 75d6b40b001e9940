fn main() {
    if let Err(err) = csv_compat::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
