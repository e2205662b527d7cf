extern crate clap;
extern crate env_logger;
extern crate image;
extern crate mandelbrot;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::bmp::BMPEncoder;
use image::ColorType;
use mandelbrot::{render, Colorizer, Palette, PixelBuffer, RenderConfig};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

fn validate_num<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
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
const START_X: &str = "start-x";
const END_X: &str = "end-x";
const START_Y: &str = "start-y";
const END_Y: &str = "end-y";
const ROWS: &str = "rows";
const COLS: &str = "cols";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const COLORIZER: &str = "colorizer";
const PALETTE: &str = "palette";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelbrot")
        .version("0.1.0")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(START_X)
                .required(false)
                .long(START_X)
                .short("x")
                .takes_value(true)
                .default_value("-2.0")
                .validator(|s| validate_num::<f64>(&s, "Could not parse the starting x bound"))
                .help("Start of the window on the real axis"),
        )
        .arg(
            Arg::with_name(END_X)
                .required(false)
                .long(END_X)
                .short("X")
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| validate_num::<f64>(&s, "Could not parse the ending x bound"))
                .help("End of the window on the real axis"),
        )
        .arg(
            Arg::with_name(START_Y)
                .required(false)
                .long(START_Y)
                .short("y")
                .takes_value(true)
                .default_value("-2.0")
                .validator(|s| validate_num::<f64>(&s, "Could not parse the starting y bound"))
                .help("Start of the window on the imaginary axis"),
        )
        .arg(
            Arg::with_name(END_Y)
                .required(false)
                .long(END_Y)
                .short("Y")
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| validate_num::<f64>(&s, "Could not parse the ending y bound"))
                .help("End of the window on the imaginary axis"),
        )
        .arg(
            Arg::with_name(ROWS)
                .required(false)
                .long(ROWS)
                .short("r")
                .takes_value(true)
                .default_value("256")
                .validator(|s| {
                    validate_range::<usize>(
                        &s,
                        1,
                        usize::max_value(),
                        "Could not parse the row count",
                        "Row count must be at least 1",
                    )
                })
                .help("Number of rows in the output image"),
        )
        .arg(
            Arg::with_name(COLS)
                .required(false)
                .long(COLS)
                .short("c")
                .takes_value(true)
                .default_value("256")
                .validator(|s| {
                    validate_range::<usize>(
                        &s,
                        1,
                        usize::max_value(),
                        "Could not parse the column count",
                        "Column count must be at least 1",
                    )
                })
                .help("Number of columns in the output image"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("m")
                .takes_value(true)
                .default_value("1024")
                .validator(|s| {
                    validate_range::<u32>(
                        &s,
                        1,
                        u32::max_value(),
                        "Could not parse the iteration cap",
                        "Iteration cap must be at least 1",
                    )
                })
                .help("Escape iteration cap"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("n")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse the thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of rendering threads"),
        )
        .arg(
            Arg::with_name(COLORIZER)
                .required(false)
                .long(COLORIZER)
                .short("z")
                .takes_value(true)
                .default_value("scaled")
                .possible_values(&["scaled", "mono"])
                .help("Escape-count-to-color policy"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("violet")
                .help("Color table: violet, gray, or a file of 256 #RRGGBB lines"),
        )
        .get_matches()
}

fn resolve_palette(choice: &str) -> Result<Palette, String> {
    match choice {
        "violet" => Ok(Palette::violet()),
        "gray" => Ok(Palette::grayscale()),
        path => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("could not read palette file {}: {}", path, e))?;
            Palette::from_hex_lines(&text).map_err(|e| format!("{}: {}", path, e))
        }
    }
}

fn write_image(outfile: &str, buffer: &PixelBuffer, palette: &Palette) -> Result<(), std::io::Error> {
    let mut rgb = Vec::with_capacity(buffer.len() * 3);
    for &index in buffer.as_bytes() {
        let color = palette.get(index);
        rgb.push(color.r);
        rgb.push(color.g);
        rgb.push(color.b);
    }

    let path = Path::new(outfile);
    let mut output = File::create(&path)?;
    let mut encoder = BMPEncoder::new(&mut output);
    encoder.encode(
        &rgb,
        buffer.cols() as u32,
        buffer.rows() as u32,
        ColorType::RGB(8),
    )?;
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = args();
    let config = RenderConfig {
        start_x: f64::from_str(matches.value_of(START_X).unwrap())
            .expect("Could not parse the starting x bound."),
        end_x: f64::from_str(matches.value_of(END_X).unwrap())
            .expect("Could not parse the ending x bound."),
        start_y: f64::from_str(matches.value_of(START_Y).unwrap())
            .expect("Could not parse the starting y bound."),
        end_y: f64::from_str(matches.value_of(END_Y).unwrap())
            .expect("Could not parse the ending y bound."),
        rows: usize::from_str(matches.value_of(ROWS).unwrap())
            .expect("Could not parse the row count."),
        cols: usize::from_str(matches.value_of(COLS).unwrap())
            .expect("Could not parse the column count."),
        max_iters: u32::from_str(matches.value_of(ITERATIONS).unwrap())
            .expect("Could not parse the iteration cap."),
        workers: usize::from_str(matches.value_of(THREADS).unwrap())
            .expect("Could not parse the thread count."),
        colorizer: Colorizer::from_str(matches.value_of(COLORIZER).unwrap())
            .expect("Could not parse the colorizer policy."),
    };

    let palette = match resolve_palette(matches.value_of(PALETTE).unwrap()) {
        Ok(palette) => palette,
        Err(e) => {
            eprintln!("Palette failure: {}", e);
            std::process::exit(1);
        }
    };

    let outfile = matches.value_of(OUTPUT).unwrap();
    match render(&config) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(buffer) => {
            if let Err(e) = write_image(outfile, &buffer, &palette) {
                eprintln!("Could not write {}: {}", outfile, e);
                std::process::exit(1);
            }
        }
    }
}
