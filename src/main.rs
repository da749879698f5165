use std::rc::Rc;

use learnopengl::{
    Result,
    abs::{Gpu, SdlSurface},
    config::{CliArgs, Config},
    logging,
    render::RenderLoop,
};

fn load_config(args: &CliArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path)?,
            None => Config::default(),
        },
    };
    config.apply(args);
    Ok(config)
}

fn start(config: &Config) -> Result<i32> {
    let surface = SdlSurface::new(&config.window)?;
    let gpu = Rc::new(surface.load_gl()?);
    log::info!("Renderer: {}", gpu.describe());

    let mut render_loop = RenderLoop::new(surface, gpu, config)?;
    Ok(render_loop.run())
}

fn main() {
    let config = match CliArgs::parse(std::env::args().skip(1)).and_then(|args| load_config(&args)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{}", CliArgs::USAGE);
            std::process::exit(-1);
        }
    };

    if let Err(e) = logging::init(config.level_filter()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let code = start(&config).unwrap_or_else(|e| {
        log::error!("{e}");
        -1
    });
    std::process::exit(code);
}
