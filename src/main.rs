fn main() {
    if let Err(err) = proofmap::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
