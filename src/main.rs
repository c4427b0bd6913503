//! balsa CLI entry point
fn main() {
    balsa::cli::run();
}
