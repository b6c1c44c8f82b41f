use clap::Parser;
use pathviz_core::{App, AppConfig};
use pathviz_crossterm::CrosstermDriver;
use pathviz_lib::{Args, PathvizModel, run_headless};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = args.resolve()?;
    log::debug!("config: {config:?}");

    if args.headless {
        let report = run_headless(&config)?;
        println!("{report}");
        std::process::exit(report.exit_code());
    }

    let model = PathvizModel::new(&config)?;
    let (rows, cols) = model.screen_size();
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new(),
        rows,
        cols,
    });
    app.run()?;
    Ok(())
}
