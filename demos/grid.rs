//! Draws requests from the command line and prints the resulting grid
#![deny(warnings)]

use gridraster::*;
use std::{
    collections::BTreeMap,
    env,
    fs::File,
    io::{BufWriter, Write},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    requests: Vec<DrawRequest>,
    scale: Scale,
    zoom: Option<Scalar>,
    verbose: bool,
    output_file: Option<String>,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            requests: Vec::new(),
            scale: Scale::default(),
            zoom: None,
            verbose: false,
            output_file: None,
        };
        let mut positional = Vec::new();
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "grid".to_owned());
        let mut help = false;
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => help = true,
                "-v" => result.verbose = true,
                "-s" => {
                    let scale: Scalar = args.next().ok_or("-s requires argument")?.parse()?;
                    result.scale = scale.into();
                }
                "-z" => {
                    let zoom = args.next().ok_or("-z requires argument")?.parse()?;
                    result.zoom.replace(zoom);
                }
                "-o" => {
                    result.output_file = Some(args.next().ok_or("-o requires argument")?);
                }
                _ => positional.push(arg),
            }
        }
        if help || positional.is_empty() || positional.len() % 5 != 0 {
            eprintln!("Draws lines and circles on an integer grid and prints the result");
            eprintln!("\nUSAGE:");
            eprintln!(
                "    {} [-v] [-s <scale>] [-z <factor>] [-o <out.ppm>] (<algorithm> <x1> <y1> <x2> <y2>)...",
                cmd
            );
            eprintln!("\nARGS:");
            eprintln!("    -v                 report every algorithm step");
            eprintln!(
                "    -s <scale>         size of a grid cell in pixels (default: {})",
                Scale::default()
            );
            eprintln!("    -z <factor>        zoom and replay the history once all requests are drawn");
            eprintln!("    -o <out.ppm>       save framebuffer in the PPM format");
            eprintln!("    <algorithm>        one of: {}", algorithm_names());
            eprintln!("    <x1> <y1> <x2> <y2> endpoints, or center and radius for the circle");
            std::process::exit(1);
        }
        for chunk in positional.chunks(5) {
            let algorithm: Algorithm = chunk[0].parse()?;
            let x1 = chunk[1].parse()?;
            let y1 = chunk[2].parse()?;
            let x2 = chunk[3].parse()?;
            let y2 = chunk[4].parse()?;
            result
                .requests
                .push(DrawRequest::new(algorithm, x1, y1, x2, y2));
        }
        Ok(result)
    }
}

fn algorithm_names() -> String {
    let names: Vec<_> = Algorithm::ALL.iter().map(|alg| alg.name()).collect();
    names.join(", ")
}

/// Surface that maps device rectangles back to grid cells
#[derive(Default)]
struct Cells {
    cells: BTreeMap<GridPoint, (Option<RGBA>, Scalar)>,
}

impl Surface for Cells {
    fn origin(&self) -> (Scalar, Scalar) {
        (0.0, 0.0)
    }

    fn clear(&mut self) {
        self.cells.clear();
    }

    fn fill_rect(&mut self, rect: DeviceRect, color: Option<RGBA>, coverage: Scalar) {
        let viewport = Viewport::new(Scale::new(rect.width()), 0.0, 0.0);
        let point = viewport.grid_at(
            (rect.left + rect.right) / 2.0,
            (rect.top + rect.bottom) / 2.0,
        );
        self.cells.insert(point, (color, coverage));
    }
}

impl Cells {
    fn print(&self, out: &mut impl Write) -> Result<(), Error> {
        let Some(min_x) = self.cells.keys().map(|p| p.x).min() else {
            writeln!(out, "<empty>")?;
            return Ok(());
        };
        let max_x = self.cells.keys().map(|p| p.x).max().unwrap_or(min_x);
        let min_y = self.cells.keys().map(|p| p.y).min().unwrap_or(0);
        let max_y = self.cells.keys().map(|p| p.y).max().unwrap_or(0);
        for y in (min_y..=max_y).rev() {
            write!(out, "{:>4} ", y)?;
            for x in min_x..=max_x {
                let symbol = match self.cells.get(&GridPoint::new(x, y)) {
                    None => '.',
                    Some((_, coverage)) if *coverage <= 0.0 => '.',
                    Some((Some(_), _)) => '#',
                    Some((None, coverage)) if *coverage >= 0.5 => '@',
                    Some((None, _)) => '+',
                };
                write!(out, "{}", symbol)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

fn save_ppm(canvas: &Canvas, path: &str) -> Result<(), Error> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "P6 {} {} 255", canvas.width(), canvas.height())?;
    for pixel in canvas.image().iter() {
        file.write_all(&pixel.to_rgb())?;
    }
    file.flush()?;
    Ok(())
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    let config = EngineConfig {
        scale: args.scale,
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_trace(Cells::default(), Vec::<String>::new(), config);
    for request in args.requests {
        engine.run_request(request, args.verbose)?;
        for line in engine.trace_mut().drain(..) {
            println!("{}", line);
        }
    }
    if let Some(factor) = args.zoom {
        engine.zoom(factor)?;
    }

    let stdout = std::io::stdout();
    engine.surface().print(&mut stdout.lock())?;
    println!("scale: {}, requests: {}", engine.scale(), engine.history().len());

    if let Some(output_file) = args.output_file {
        let size = (engine.scale().value() * 32.0).round() as usize;
        let mut canvas = Canvas::new(size, size);
        tracing::debug_span!("[save]").in_scope(|| {
            replay(engine.history(), &mut canvas, engine.scale())?;
            save_ppm(&canvas, &output_file)
        })?;
    }
    Ok(())
}
