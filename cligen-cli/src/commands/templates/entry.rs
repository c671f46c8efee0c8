/// Default entry point: builds the registry from every linked command module
/// and hands `argv` to the dispatcher.
const MAIN: &str = r#"// Code generated by cligen;

fn main() {
    ::cligen_core::logging::init_tracing();
    let args: Vec<String> = ::std::env::args().skip(1).collect();
    ::std::process::exit(::cligen_core::run(::cligen_core::Registry::linked(), &args));
}
"#;

pub fn main_rs() -> String {
    MAIN.to_string()
}
