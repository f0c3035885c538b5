use std::process;

mod headless;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let parsed = match headless::parse_headless_args(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}");
            headless::print_headless_help();
            process::exit(2);
        }
    };
    if parsed.help {
        headless::print_headless_help();
        return;
    }

    tilt::logging::setup_tracing(parsed.log_level);
    tracing::info!("Tilt starting");

    if let Err(err) = headless::run_headless(&parsed) {
        tracing::error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}
