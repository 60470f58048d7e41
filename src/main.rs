fn main() {
    if let Err(err) = archstack::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
