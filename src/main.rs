extern crate clap;
extern crate env_logger;
extern crate image;
#[macro_use]
extern crate log;
extern crate mandelzoom;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::ColorType;
use mandelzoom::{
    escape_count, ComplexFixed, ConfigError, FrameRenderer, Palette, PlaneBounds, Precision,
    ZoomSequence,
};
use num::Complex;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

/// Given a string and a separator, returns the two values separated
/// by the separator.
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

/// A specific implementation of parse_pair using a comma and
/// expecting floating point numbers.
fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
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

fn validate_decay(s: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(d) => {
            if d > 0.0 && d <= 1.0 {
                Ok(())
            } else {
                Err("Decay factor must be greater than zero and at most one".to_string())
            }
        }
        Err(_) => Err("Could not parse decay factor".to_string()),
    }
}

const OUTDIR: &str = "outdir";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const FRAMES: &str = "frames";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const TARGET_LEFTLOWER: &str = "target-leftlower";
const TARGET_RIGHTUPPER: &str = "target-rightupper";
const DECAY: &str = "decay";
const PRECISION: &str = "precision";
const DIGITS: &str = "digits";
const THREADS: &str = "threads";
const PREVIEW: &str = "preview";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelzoom")
        .version("0.1.0")
        .about("Mandelbrot zoom-sequence renderer")
        .arg(
            Arg::with_name(OUTDIR)
                .required(false)
                .long(OUTDIR)
                .short("o")
                .takes_value(true)
                .default_value("images")
                .help("Directory the frames are written into"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1000x1000")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse frame size"))
                .help("Size of each output frame"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration budget per point"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .required(false)
                .long(FRAMES)
                .short("f")
                .takes_value(true)
                .default_value("10")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse frame count",
                        "Frame count must be between 1 and 1000000",
                    )
                })
                .help("Nominal number of frames to the target window"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,-2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the starting window"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2,2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the starting window"),
        )
        .arg(
            Arg::with_name(TARGET_LEFTLOWER)
                .required(false)
                .long(TARGET_LEFTLOWER)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-1.2576470439078538,0.3780652779236957")
                .validator(|s| {
                    validate_pair::<f64>(&s, ',', "Could not parse target left lower corner")
                })
                .help("Left lower corner of the target window"),
        )
        .arg(
            Arg::with_name(TARGET_RIGHTUPPER)
                .required(false)
                .long(TARGET_RIGHTUPPER)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-1.2576470439074896,0.3780652779240597")
                .validator(|s| {
                    validate_pair::<f64>(&s, ',', "Could not parse target right upper corner")
                })
                .help("Right upper corner of the target window"),
        )
        .arg(
            Arg::with_name(DECAY)
                .required(false)
                .long(DECAY)
                .short("d")
                .takes_value(true)
                .default_value("0.9")
                .validator(|s| validate_decay(&s))
                .help("Factor every zoom step shrinks by, per frame"),
        )
        .arg(
            Arg::with_name(PRECISION)
                .required(false)
                .long(PRECISION)
                .takes_value(true)
                .default_value("fixed")
                .possible_values(&["fixed", "arbitrary"])
                .help("Arithmetic the escape kernel runs on"),
        )
        .arg(
            Arg::with_name(DIGITS)
                .required(false)
                .long(DIGITS)
                .takes_value(true)
                .default_value("10")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        10_000,
                        "Could not parse digit count",
                        "Digit count must be between 1 and 10000",
                    )
                })
                .help("Significant decimal digits at arbitrary precision"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("0")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 0 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the render; zero means one per CPU"),
        )
        .arg(
            Arg::with_name(PREVIEW)
                .required(false)
                .long(PREVIEW)
                .takes_value(false)
                .help("Print a character-cell preview of the full set and exit"),
        )
        .get_matches()
}

fn fail(err: ConfigError) -> ! {
    eprintln!("Render failure: {}", err);
    std::process::exit(1);
}

/// Unpacks the ARGB raster into the byte order the PNG encoder wants
/// and writes one frame.
fn write_frame(
    path: &Path,
    raster: &[u32],
    width: usize,
    height: usize,
) -> Result<(), std::io::Error> {
    let mut bytes = Vec::with_capacity(raster.len() * 4);
    for &argb in raster {
        bytes.push((argb >> 16) as u8);
        bytes.push((argb >> 8) as u8);
        bytes.push(argb as u8);
        bytes.push((argb >> 24) as u8);
    }
    image::save_buffer(
        path,
        &bytes,
        width as u32,
        height as u32,
        ColorType::RGBA(8),
    )
}

/// The character-cell sanity check: the classic full view, one
/// sample per character, asterisks for members of the set.
fn preview(limit: usize) {
    let mut im = 1.0_f64;
    while im >= -1.0 {
        let mut re = -2.0_f64;
        while re <= 0.5 {
            let inside = escape_count(ComplexFixed::new(re, im), limit) == limit;
            print!("{}", if inside { '*' } else { ' ' });
            re += 0.025;
        }
        println!();
        im -= 0.05;
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = args();

    let size = parse_pair::<usize>(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing frame dimensions");
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count");
    let frames =
        usize::from_str(matches.value_of(FRAMES).unwrap()).expect("Could not parse frame count");
    let decay =
        f64::from_str(matches.value_of(DECAY).unwrap()).expect("Could not parse decay factor");
    let digits =
        u32::from_str(matches.value_of(DIGITS).unwrap()).expect("Could not parse digit count");
    let leftlower = parse_complex(matches.value_of(LEFTLOWER).unwrap())
        .expect("Error parsing left lower point");
    let rightupper = parse_complex(matches.value_of(RIGHTUPPER).unwrap())
        .expect("Error parsing right upper point");
    let target_leftlower = parse_complex(matches.value_of(TARGET_LEFTLOWER).unwrap())
        .expect("Error parsing target left lower point");
    let target_rightupper = parse_complex(matches.value_of(TARGET_RIGHTUPPER).unwrap())
        .expect("Error parsing target right upper point");
    let threads = match usize::from_str(matches.value_of(THREADS).unwrap())
        .expect("Could not parse thread count")
    {
        0 => num_cpus::get(),
        n => n,
    };
    let precision = match matches.value_of(PRECISION).unwrap() {
        "arbitrary" => Precision::Arbitrary { digits },
        _ => Precision::Fixed,
    };

    if matches.is_present(PREVIEW) {
        preview(iterations);
        return;
    }

    let start = PlaneBounds::from_corners(leftlower, rightupper).unwrap_or_else(|e| fail(e));
    let target = PlaneBounds::from_corners(target_leftlower, target_rightupper)
        .unwrap_or_else(|e| fail(e));
    let renderer = FrameRenderer::new(size.0, size.1, iterations, precision, Palette::default())
        .unwrap_or_else(|e| fail(e));
    let zoom = ZoomSequence::new(start, target, frames, decay).unwrap_or_else(|e| fail(e));

    let outdir = PathBuf::from(matches.value_of(OUTDIR).unwrap());
    if let Err(e) = std::fs::create_dir_all(&outdir) {
        eprintln!("Could not create {}: {}", outdir.display(), e);
        std::process::exit(1);
    }

    let mut unresolvable_warned = false;
    for (index, bounds) in zoom.enumerate() {
        if !unresolvable_warned && !bounds.resolvable(size.0, size.1, precision.epsilon()) {
            warn!(
                "frame {} spans less than one representable step per pixel; \
                 deeper frames will alias until the precision is raised",
                index + 1
            );
            unresolvable_warned = true;
        }
        let started = Instant::now();
        let raster = renderer.render_threaded(&bounds, threads);
        let path = outdir.join(format!("frame{:03}.png", index + 1));
        match write_frame(&path, &raster, size.0, size.1) {
            Ok(()) => println!(
                "Saved frame {} as {} in {} ms",
                index + 1,
                path.display(),
                started.elapsed().as_millis()
            ),
            Err(e) => error!("Could not write {}: {}", path.display(), e),
        }
    }
}
