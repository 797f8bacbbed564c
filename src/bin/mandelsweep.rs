extern crate clap;
extern crate env_logger;
extern crate image;
extern crate mandelsweep;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use mandelsweep::{
    AnimationDriver, ChannelBounce, DriverConfig, PaletteCycle, PixelBuffer, SweepPolicy,
    ThreadScheduler, ViewTransform,
};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_positive_float(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f > 0.0 => Ok(()),
        _ => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ZOOM: &str = "zoom";
const TRANSLATE: &str = "translate";
const TICKS: &str = "ticks";
const DELAY: &str = "delay-ms";
const THREADS: &str = "threads";
const PALETTE: &str = "palette";
const STEP: &str = "color-step";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelsweep")
        .version("0.1.0")
        .about("Incremental, tick-driven Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (binary PPM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse the raster size"))
                .help("Size of the raster"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1.0")
                .validator(|s| {
                    validate_positive_float(&s, "The zoom factor must be a number above zero")
                })
                .help("Zoom multiplier"),
        )
        .arg(
            Arg::with_name(TRANSLATE)
                .required(false)
                .long(TRANSLATE)
                .short("p")
                .takes_value(true)
                .default_value("0,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse the pan offset"))
                .help("Pan offset in pixels, x,y"),
        )
        .arg(
            Arg::with_name(TICKS)
                .required(false)
                .long(TICKS)
                .short("n")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse the tick count",
                        "The tick count must be between 1 and 100000",
                    )
                })
                .help("Number of animation ticks to run"),
        )
        .arg(
            Arg::with_name(DELAY)
                .required(false)
                .long(DELAY)
                .short("d")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        60_000,
                        "Could not parse the tick delay",
                        "The tick delay must be between 0 and 60000 milliseconds",
                    )
                })
                .help("Delay between ticks, in milliseconds"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse the thread count",
                        &format!("The thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads for the per-tick scan"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .help("Cycle a fixed palette instead of bouncing RGB channels"),
        )
        .arg(
            Arg::with_name(STEP)
                .required(false)
                .long(STEP)
                .short("c")
                .takes_value(true)
                .default_value("2")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        64,
                        "Could not parse the color step",
                        "The color step must be between 1 and 64",
                    )
                })
                .help("Speed of the bouncing color sweep"),
        )
        .get_matches()
}

fn write_image(outfile: &str, buffer: &PixelBuffer) -> Result<(), std::io::Error> {
    let (width, height) = buffer.dimensions();
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(buffer.samples(), width as u32, height as u32, ColorType::RGB(8))?;
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();

    let size: (usize, usize) = parse_pair(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing the raster size");
    let translate: (f64, f64) = parse_pair(matches.value_of(TRANSLATE).unwrap(), ',')
        .expect("Error parsing the pan offset");
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap()).expect("Error parsing the zoom");
    let ticks =
        usize::from_str(matches.value_of(TICKS).unwrap()).expect("Error parsing the tick count");
    let delay =
        u64::from_str(matches.value_of(DELAY).unwrap()).expect("Error parsing the tick delay");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Error parsing the thread count");
    let step =
        i32::from_str(matches.value_of(STEP).unwrap()).expect("Error parsing the color step");

    let view = ViewTransform {
        zoom,
        translate_x: translate.0,
        translate_y: translate.1,
    };
    let sweep = if matches.is_present(PALETTE) {
        SweepPolicy::Cycle(PaletteCycle::rainbow())
    } else {
        SweepPolicy::Bounce(ChannelBounce::new(step))
    };
    let config = DriverConfig {
        delay: Duration::from_millis(delay),
        threads,
        ..DriverConfig::default()
    };

    let mut driver = AnimationDriver::new(config, sweep);
    let mut buffer = PixelBuffer::new(size.0, size.1);
    if let Err(e) = driver.build_view(&view, size.0, size.1, &mut buffer) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = driver.enqueue(ticks) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
    driver.drain(&mut buffer, &mut ThreadScheduler);

    if let Err(e) = write_image(matches.value_of(OUTPUT).unwrap(), &buffer) {
        eprintln!("Could not write {}: {}", matches.value_of(OUTPUT).unwrap(), e);
        std::process::exit(1);
    }
}
