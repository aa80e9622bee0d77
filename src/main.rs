use env_logger::Env;
use log::{debug, error, info};
use sdl2::keyboard::Keycode;
use std::time::Instant;
use wireframe::config::{RenderConfig, DEFAULT_CONFIG_PATH};
use wireframe::display::sdl::{Display, InputEvent, WindowSurface};
use wireframe::util::{FpsCounter, FramePacer};
use wireframe::{RenderError, Renderer, Spinner};

/// Command line overrides, applied on top of the config file
struct Args {
    config_path: String,
    width: Option<u32>,
    height: Option<u32>,
    no_vsync: bool,
}

fn print_help() {
    println!("Usage: wireframe [OPTIONS]");
    println!();
    println!("Options:");
    println!(
        "  --config PATH, -c PATH    Load settings from PATH (default: {})",
        DEFAULT_CONFIG_PATH
    );
    println!("  --width W, -w W           Set window width");
    println!("  --height H, -h H          Set window height");
    println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1280x720)");
    println!("  --no-vsync                Disable VSync");
    println!("  --help                    Show this help message");
    println!();
    println!("Controls: Space pauses, B toggles the band pattern, Escape quits.");
    println!("Set RUST_LOG=debug for frame rate and config details.");
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config_path: DEFAULT_CONFIG_PATH.to_string(),
        width: None,
        height: None,
        no_vsync: false,
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--no-vsync" => parsed.no_vsync = true,
            "--config" | "-c" => {
                if let Some(path) = value {
                    parsed.config_path = path.clone();
                    i += 1;
                }
            },
            "--width" | "-w" => {
                if let Some(w) = value {
                    parsed.width = w.parse().ok();
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if let Some(h) = value {
                    parsed.height = h.parse().ok();
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if let Some((w, h)) = value.and_then(|v| v.split_once('x')) {
                    parsed.width = w.parse().ok();
                    parsed.height = h.parse().ok();
                    i += 1;
                }
            },
            "--help" => {
                print_help();
                std::process::exit(0);
            },
            other => debug!("ignoring argument {}", other),
        }
        i += 1;
    }

    parsed
}

fn run() -> Result<(), RenderError> {
    let args = parse_args();
    let mut config = RenderConfig::load_or_default(&args.config_path);
    if let Some(w) = args.width.filter(|&w| w > 0) {
        config.width = w;
    }
    if let Some(h) = args.height.filter(|&h| h > 0) {
        config.height = h;
    }
    if args.no_vsync {
        config.vsync = false;
    }
    debug!("config: {:?}", config);

    let (display, texture_creator) =
        Display::open("wireframe", config.width, config.height, config.vsync)?;
    let surface = WindowSurface::new(display, &texture_creator)?;
    let mut renderer = Renderer::new(surface)?;
    let (r, g, b) = config.line_color;
    renderer.set_line_color(r, g, b);

    let mut spinner = Spinner::cube(&config);
    let mut pacer = FramePacer::from_millis(config.frame_interval_ms);
    let mut fps = FpsCounter::new(50);
    let mut show_bands = false;
    let mut frames: u64 = 0;

    info!(
        "wireframe {}x{}, vsync {}",
        config.width,
        config.height,
        if config.vsync { "on" } else { "off" }
    );
    info!("Space pauses, B toggles the band pattern, Escape quits");

    'main: loop {
        for event in renderer.surface_mut().poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::Space) => {
                    spinner.toggle_pause();
                    info!("rotation {}", if spinner.is_paused() { "paused" } else { "resumed" });
                },
                InputEvent::KeyDown(Keycode::B) => show_bands = !show_bands,
                InputEvent::KeyDown(_) => {},
            }
        }

        let now = Instant::now();
        let Some(dt) = pacer.tick(now) else {
            std::thread::sleep(pacer.remaining(now));
            continue;
        };

        let avg_fps = fps.record(dt);
        frames += 1;
        if frames % 250 == 0 {
            debug!("{:.1} fps, {:?}", avg_fps, renderer.stats());
        }

        spinner.update(dt);
        if show_bands {
            renderer.fill_bands();
        } else {
            spinner.render(&mut renderer)?;
        }
        renderer.update()?;
    }

    info!("bye");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
