// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate log;
extern crate nebulabrot;
extern crate num;

use clap::{App, Arg, ArgMatches};
use log::{info, warn, LevelFilter};
use nebulabrot::colorize::DEFAULT_GAIN;
use nebulabrot::{NebulaRenderer, RenderConfig, SeedPolicy, Shaping};
use num::Complex;
use std::str::FromStr;
use std::time::Instant;

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

fn validate_range<T: FromStr + PartialOrd>(
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

fn validate_positive(
    s: &str,
    isnotanumber_err: &str,
    isnotpositive_err: &str,
) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(()),
        Ok(_) => Err(isnotpositive_err.to_string()),
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const WIDTH: &str = "width";
const ITERATIONS: &str = "iterations";
const BAILOUT: &str = "bailout";
const OVERSAMPLING: &str = "oversampling";
const SATURATION: &str = "saturation";
const SHAPING: &str = "shaping";
const GAIN: &str = "gain";
const POLICY: &str = "policy";
const VERBOSE: &str = "verbose";

fn args<'a>() -> ArgMatches<'a> {
    App::new("nebulabrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Nebulabrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("nebulabrot.bmp")
                .help("Output file; the extension picks the format"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("2732x1536")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.5,0.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse view center"))
                .help("Center of the view on the complex plane"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("4.0")
                .validator(|s| {
                    validate_positive(
                        &s,
                        "Could not parse view width",
                        "View width must be positive",
                    )
                })
                .help("Width of the view on the complex plane"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("8192")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration cap per orbit"),
        )
        .arg(
            Arg::with_name(BAILOUT)
                .long(BAILOUT)
                .short("b")
                .takes_value(true)
                .default_value("3.0")
                .validator(|s| {
                    validate_positive(
                        &s,
                        "Could not parse bailout radius",
                        "Bailout radius must be positive",
                    )
                })
                .help("Orbit magnitude that counts as escape"),
        )
        .arg(
            Arg::with_name(OVERSAMPLING)
                .long(OVERSAMPLING)
                .short("p")
                .takes_value(true)
                .default_value("4")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        64,
                        "Could not parse oversampling factor",
                        "Oversampling factor must be between 1 and 64",
                    )
                })
                .help("Samples per pixel along each axis"),
        )
        .arg(
            Arg::with_name(SATURATION)
                .long(SATURATION)
                .takes_value(true)
                .default_value("0.6")
                .validator(|s| {
                    validate_range(
                        &s,
                        0.0,
                        1.0,
                        "Could not parse saturation",
                        "Saturation must be between 0 and 1",
                    )
                })
                .help("Color saturation"),
        )
        .arg(
            Arg::with_name(SHAPING)
                .long(SHAPING)
                .takes_value(true)
                .possible_values(&["cuberoot", "linear"])
                .default_value("cuberoot")
                .help("Curve mapping density to lightness"),
        )
        .arg(
            Arg::with_name(GAIN)
                .long(GAIN)
                .takes_value(true)
                .validator(|s| {
                    validate_positive(&s, "Could not parse gain", "Gain must be positive")
                })
                .help("Slope of the linear shaping curve; needs --shaping linear"),
        )
        .arg(
            Arg::with_name(POLICY)
                .long(POLICY)
                .takes_value(true)
                .possible_values(&["retained", "escaped"])
                .default_value("retained")
                .help("Plot the orbits of bounded seeds, or of escaping ones"),
        )
        .arg(
            Arg::with_name(VERBOSE)
                .short("v")
                .multiple(true)
                .help("Log more; repeat for more detail"),
        )
        .get_matches()
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches.value_of(name).unwrap_or_default()
}

// The validators have already run, so every value parses.
fn config_from(matches: &ArgMatches) -> RenderConfig {
    let (width, height) = parse_pair(value(matches, SIZE), 'x').unwrap_or_default();
    let center = parse_complex(value(matches, CENTER)).unwrap_or_default();
    let shaping = match value(matches, SHAPING) {
        "linear" => Shaping::Linear {
            gain: matches
                .value_of(GAIN)
                .and_then(|s| f64::from_str(s).ok())
                .unwrap_or(DEFAULT_GAIN),
        },
        _ => {
            if matches.is_present(GAIN) {
                warn!("--gain only applies with --shaping linear; ignoring it");
            }
            Shaping::Cuberoot
        }
    };
    let policy = match value(matches, POLICY) {
        "escaped" => SeedPolicy::Escaped,
        _ => SeedPolicy::Retained,
    };
    RenderConfig {
        width,
        height,
        center,
        view_width: f64::from_str(value(matches, WIDTH)).unwrap_or_default(),
        iterations: usize::from_str(value(matches, ITERATIONS)).unwrap_or_default(),
        bailout: f64::from_str(value(matches, BAILOUT)).unwrap_or_default(),
        oversampling: usize::from_str(value(matches, OVERSAMPLING)).unwrap_or_default(),
        saturation: f64::from_str(value(matches, SATURATION)).unwrap_or_default(),
        shaping,
        policy,
    }
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(matches: &ArgMatches) -> nebulabrot::Result<()> {
    let start = Instant::now();
    let config = config_from(matches);
    let renderer = NebulaRenderer::new(&config)?;

    info!("calculating...");
    let phase = Instant::now();
    let (grid, _) = renderer.calculate();
    info!("calculated in {:?}", phase.elapsed());

    info!("rendering...");
    let phase = Instant::now();
    let image = renderer.colorize(&grid);
    info!("rendered in {:?}", phase.elapsed());

    let output = matches.value_of(OUTPUT).unwrap_or("nebulabrot.bmp");
    info!("saving to {}...", output);
    image.save(output)?;

    info!("total time: {:?}", start.elapsed());
    Ok(())
}

fn main() {
    let matches = args();
    init_logging(matches.occurrences_of(VERBOSE));
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
