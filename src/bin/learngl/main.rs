use clap::Parser;

use learngl::logging::init_logging;

mod app;
mod args;
mod demos;

use app::{App, AppError};
use args::Args;
use demos::Demo;

fn start(args: &Args) -> Result<(App, Box<dyn Demo>), AppError> {
    let settings = args.settings()?;
    log::debug!("{settings:?}");

    let app = App::new(&settings)?;
    // demos upload to the GPU, so the context must exist first
    let demo = demos::build(args.demo, &settings, args.effect, app.size())?;

    Ok((app, demo))
}

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    init_logging(args.log.as_deref());

    match start(&args) {
        Ok((app, demo)) => app.run(demo),
        Err(e) => {
            log::error!("Could not start {:?} demo: {e}", args.demo);
            std::process::exit(-1);
        }
    }
}
