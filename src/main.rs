fn main() {
    if let Err(err) = tablesite_lib::run() {
        eprintln!("tablesite: {err}");
        std::process::exit(1);
    }
}
