#[cfg(feature = "cairo-backend")]
use candleview::api::{CandlestickChart, ChartConfig, FixedClock};
#[cfg(feature = "cairo-backend")]
use candleview::core::SurfaceSize;
#[cfg(feature = "cairo-backend")]
use candleview::interaction::PointerEvent;
#[cfg(feature = "cairo-backend")]
use candleview::render::CairoSurface;
#[cfg(feature = "cairo-backend")]
use candleview::source::JsonFileSource;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    width: u32,
    height: u32,
    zoom_steps: i32,
    pan_px: f64,
    crosshair: Option<(f64, f64)>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = candleview::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read `{}`: {e}", path.display()))?;
            ChartConfig::from_json_str(&raw).map_err(|e| e.to_string())?
        }
        None => ChartConfig::default(),
    };

    let surface = CairoSurface::new(SurfaceSize::new(args.width, args.height))
        .map_err(|e| e.to_string())?;
    let source = JsonFileSource::new(&args.input);
    // Pinned clock keeps exports reproducible.
    let mut chart = CandlestickChart::from_source(surface, &source, config)
        .map_err(|e| e.to_string())?
        .with_clock(FixedClock(0));

    let center_x = f64::from(args.width) / 2.0;
    let center_y = f64::from(args.height) / 2.0;
    for _ in 0..args.zoom_steps.unsigned_abs() {
        let delta_y = if args.zoom_steps > 0 { -1.0 } else { 1.0 };
        chart
            .handle_event(PointerEvent::Wheel {
                x: center_x,
                y: center_y,
                delta_y,
            })
            .map_err(|e| e.to_string())?;
    }
    if args.pan_px != 0.0 {
        for event in [
            PointerEvent::Down {
                x: center_x,
                y: center_y,
            },
            PointerEvent::Move {
                x: center_x - args.pan_px,
                y: center_y,
                over_surface: false,
            },
            PointerEvent::Up {
                x: center_x - args.pan_px,
                y: center_y,
            },
        ] {
            chart.handle_event(event).map_err(|e| e.to_string())?;
        }
    }
    if let Some((x, y)) = args.crosshair {
        chart
            .handle_event(PointerEvent::Move {
                x,
                y,
                over_surface: true,
            })
            .map_err(|e| e.to_string())?;
    }

    let state = chart.render().map_err(|e| e.to_string())?;
    chart
        .surface()
        .write_png(&args.output)
        .map_err(|e| e.to_string())?;
    println!(
        "wrote {} ({state:?}, {} records)",
        args.output.display(),
        chart.series().len()
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut input = None;
    let mut output = None;
    let mut config = None;
    let mut width = 800_u32;
    let mut height = 600_u32;
    let mut zoom_steps = 0_i32;
    let mut pan_px = 0.0_f64;
    let mut crosshair = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match arg.as_str() {
            "--input" => input = Some(PathBuf::from(value("--input")?)),
            "--output" => output = Some(PathBuf::from(value("--output")?)),
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "--width" => width = parse_number(&value("--width")?, "--width")?,
            "--height" => height = parse_number(&value("--height")?, "--height")?,
            "--zoom-steps" => {
                zoom_steps = parse_number(&value("--zoom-steps")?, "--zoom-steps")?;
            }
            "--pan" => pan_px = parse_number(&value("--pan")?, "--pan")?,
            "--crosshair" => {
                let raw = value("--crosshair")?;
                let (x, y) = raw
                    .split_once(',')
                    .ok_or_else(|| format!("--crosshair expects `x,y`, got `{raw}`"))?;
                crosshair = Some((
                    parse_number(x.trim(), "--crosshair")?,
                    parse_number(y.trim(), "--crosshair")?,
                ));
            }
            "--help" | "-h" => {
                println!("{}", usage());
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument `{other}`\n\n{}", usage())),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| format!("--input is required\n\n{}", usage()))?,
        output: output.ok_or_else(|| format!("--output is required\n\n{}", usage()))?,
        config,
        width,
        height,
        zoom_steps,
        pan_px,
        crosshair,
    })
}

#[cfg(feature = "cairo-backend")]
fn parse_number<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| format!("invalid value `{raw}` for {name}: {e}"))
}

#[cfg(feature = "cairo-backend")]
fn usage() -> String {
    "Usage: cargo run --features cairo-backend --bin render_chart_png -- [options]\n\nOptions:\n  --input <path>       Chunk JSON file (required)\n  --output <path>      PNG output path (required)\n  --config <path>      Chart config JSON\n  --width <px>         Surface width (default: 800)\n  --height <px>        Surface height (default: 600)\n  --zoom-steps <n>     Wheel notches at the center; negative zooms out\n  --pan <px>           Drag distance; positive scrolls toward later records\n  --crosshair <x,y>    Crosshair position\n  -h, --help           Show this message"
        .to_owned()
}
