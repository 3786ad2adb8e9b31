//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Starting WordWheel");

    let config = wordwheel_app::AppConfig::parse();
    let result = wordwheel_app::App::new(config).and_then(|mut app| {
        let stdin = std::io::stdin();
        app.run(stdin.lock(), std::io::stdout().lock())
    });

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
