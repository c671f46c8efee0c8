fn main() {
    cligen_core::logging::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(cligen_core::run(cligen_cli::commands::registry(), &args));
}
