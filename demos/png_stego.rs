// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Example: hide and recover a message in a PNG image.
//!
//! Only the real-valued DCT algorithms in RGB mode survive the trip through
//! 8-bit pixels. FFT algorithms need the imaginary planes kept alongside, and
//! YUV planes are rebuilt from rounded RGB on reload.
use spectral_stego::{ColorSpace, EmbedParams, PlanarImage};

fn load_params(path: Option<&String>) -> EmbedParams {
    match path {
        Some(p) => {
            let json = std::fs::read_to_string(p).expect("Could not read params file");
            EmbedParams::from_json(&json).expect("Invalid params")
        }
        None => EmbedParams::default(),
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: png_stego <input.png> <message> [params.json]");
        eprintln!("       png_stego --decode <stego.png> [params.json]");
        std::process::exit(1);
    }

    if args[1] == "--decode" {
        let params = load_params(args.get(3));
        let rgba = image::open(&args[2]).expect("Could not open image").to_rgba8();
        let (width, height) = (rgba.width() as usize, rgba.height() as usize);
        let planar = PlanarImage::from_rgba(rgba.as_raw(), width, height).expect("Bad pixel buffer");
        match planar.extract(&params) {
            Ok(text) => println!("Decoded message: {text}"),
            Err(e) => eprintln!("Decode failed: {e}"),
        }
    } else {
        let params = load_params(args.get(3));
        if params.algorithm.is_complex() {
            eprintln!("warning: {} needs the imaginary planes and will not survive PNG", params.algorithm);
        }
        if params.color_space == ColorSpace::Yuv {
            eprintln!("warning: YUV planes are rebuilt from rounded RGB and will not survive PNG");
        }
        let rgba = image::open(&args[1]).expect("Could not open image").to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());
        let mut planar = PlanarImage::from_rgba(rgba.as_raw(), width as usize, height as usize)
            .expect("Bad pixel buffer");

        let capacity = spectral_stego::capacity(width as usize, height as usize, &params).expect("Invalid params");
        println!("Capacity: {} bits, up to {} escaped bytes", capacity.bits, capacity.max_message_bytes);

        let report = planar.embed(&args[2], &params).expect("Embed failed");
        println!("Used {} of {} bits", report.required_bits, report.capacity_bits);

        let out = image::RgbaImage::from_raw(width, height, planar.to_rgba()).expect("Buffer size mismatch");
        let out_path = args[1].replace(".png", "_stego.png").replace(".PNG", "_stego.png");
        out.save(&out_path).expect("Could not write output");
        println!("Stego image written to: {out_path}");
    }
}
