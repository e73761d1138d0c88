// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate newtonfractal;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use newtonfractal::config::{parse_complex, parse_size};
use newtonfractal::{encode, RenderConfig, RootSpec};
use std::str::FromStr;

fn validate_parse<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
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

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const RADIUS: &str = "radius";
const ITERATIONS: &str = "iterations";
const BANDS: &str = "bands";
const ROOTS: &str = "roots";
const ROOT: &str = "root";
const PALETTE: &str = "palette";
const SEED: &str = "seed";
const BACKDROP: &str = "backdrop";

fn args<'a>() -> ArgMatches<'a> {
    App::new("newton")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Newton fractal renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; .ppm and .pnm are plain text, others go by extension"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("640x400")
                .validator(|s| match parse_size(&s) {
                    Some((w, h)) if w > 0 && h > 0 => Ok(()),
                    _ => Err("Could not parse output image size".to_string()),
                })
                .help("Size of output image, as WIDTHxHEIGHT or just HEIGHT for an 8:5 image"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .default_value("5.0")
                .validator(|s| match f32::from_str(&s) {
                    Ok(r) if r.is_finite() && r > 0.0 => Ok(()),
                    _ => Err("Radius must be a positive number".to_string()),
                })
                .help("Height of the sampled region of the complex plane"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("60")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        100_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 0 and 100000",
                    )
                })
                .help("Number of Newton steps per pixel"),
        )
        .arg(
            Arg::with_name(BANDS)
                .required(false)
                .long(BANDS)
                .short("b")
                .takes_value(true)
                .default_value("8")
                .validator(|s| validate_parse::<usize>(&s, "Could not parse band count"))
                .help("Number of horizontal bands to render in parallel; 0 for one per CPU"),
        )
        .arg(
            Arg::with_name(ROOTS)
                .required(false)
                .long(ROOTS)
                .short("n")
                .takes_value(true)
                .default_value("20")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1000,
                        "Could not parse root count",
                        "Root count must be between 1 and 1000",
                    )
                })
                .help("Number of roots in the generated ring"),
        )
        .arg(
            Arg::with_name(ROOT)
                .required(false)
                .long(ROOT)
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(|s| match parse_complex(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse root, expected RE,IM".to_string()),
                })
                .help("An explicit root as RE,IM; repeat for more.  Replaces the ring"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        65_536,
                        "Could not parse palette size",
                        "Palette size must be between 1 and 65536",
                    )
                })
                .help("Number of colours in the palette"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .default_value("69")
                .validator(|s| validate_parse::<u64>(&s, "Could not parse palette seed"))
                .help("Seed for the palette"),
        )
        .arg(
            Arg::with_name(BACKDROP)
                .required(false)
                .long(BACKDROP)
                .takes_value(true)
                .help("An image to load alongside the render"),
        )
        .get_matches()
}

fn config_from(matches: &ArgMatches) -> Result<RenderConfig, Error> {
    let size = matches.value_of(SIZE).and_then(parse_size);
    let (width, height) = size.ok_or_else(|| format_err!("Error parsing image dimensions"))?;
    let roots = match matches.values_of(ROOT) {
        Some(values) => RootSpec::Explicit(
            values
                .map(|v| parse_complex(v).ok_or_else(|| format_err!("Error parsing root {}", v)))
                .collect::<Result<Vec<_>, Error>>()?,
        ),
        None => RootSpec::Ring(usize::from_str(matches.value_of(ROOTS).unwrap_or("20"))?),
    };

    Ok(RenderConfig {
        width,
        height,
        radius: f32::from_str(matches.value_of(RADIUS).unwrap_or("5.0"))?,
        iterations: usize::from_str(matches.value_of(ITERATIONS).unwrap_or("60"))?,
        bands: usize::from_str(matches.value_of(BANDS).unwrap_or("8"))?,
        roots,
        palette_size: usize::from_str(matches.value_of(PALETTE).unwrap_or("100"))?,
        seed: u64::from_str(matches.value_of(SEED).unwrap_or("69"))?,
    })
}

/// The backdrop is loaded and reported on, but nothing is drawn from it.
fn load_backdrop(path: &str) {
    match image::open(path) {
        Ok(backdrop) => {
            let backdrop = backdrop.to_rgba();
            info!(
                "loaded backdrop {} ({}x{})",
                path,
                backdrop.width(),
                backdrop.height()
            );
        }
        Err(e) => warn!("could not load backdrop {}: {}", path, e),
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = config_from(matches)?;
    if let Some(path) = matches.value_of(BACKDROP) {
        load_backdrop(path);
    }

    info!(
        "rendering {}x{} with {} bands on {} cpus",
        config.width,
        config.height,
        config.band_count(),
        num_cpus::get()
    );
    let palette = config.palette()?;
    let classes = config.render()?;
    encode::save(matches.value_of(OUTPUT).unwrap_or("newton.ppm"), &classes, &palette)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
