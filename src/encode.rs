// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a finished classification buffer into pixels on disk.
//!
//! The native output is the plain-text pixmap: a `P3` line, a
//! `width height 255` line, and then one `r g b` line per pixel in
//! row-major order.  Anything that isn't `.ppm` or `.pnm` is handed to
//! the `image` crate, which picks an encoder from the extension.

use failure::Error;
use image::{self, ColorType};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use palette::Palette;
use scheduler::ClassMap;

/// Writes `classes` as a plain-text pixmap, colouring each root index
/// from `palette`.
pub fn write_ppm<W: Write>(output: W, classes: &ClassMap, palette: &Palette) -> io::Result<()> {
    let mut output = BufWriter::new(output);
    writeln!(output, "P3")?;
    writeln!(output, "{} {} 255", classes.width(), classes.height())?;
    for &class in classes.cells() {
        let [r, g, b] = palette.colour(class);
        writeln!(output, "{} {} {}", r, g, b)?;
    }
    output.flush()
}

/// Packs the image into tightly packed RGB8 bytes.
pub fn rgb_bytes(classes: &ClassMap, palette: &Palette) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(classes.cells().len() * 3);
    for &class in classes.cells() {
        pixels.extend_from_slice(&palette.colour(class));
    }
    pixels
}

/// Saves the image to `path`, choosing the format by extension.
pub fn save<P: AsRef<Path>>(path: P, classes: &ClassMap, palette: &Palette) -> Result<(), Error> {
    let path = path.as_ref();
    let plain = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("ppm") || ext.eq_ignore_ascii_case("pnm"))
        .unwrap_or(false);

    if plain {
        write_ppm(File::create(path)?, classes, palette)?;
    } else {
        image::save_buffer(
            path,
            &rgb_bytes(classes, palette),
            classes.width() as u32,
            classes.height() as u32,
            ColorType::RGB(8),
        )?;
    }
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;
    use planes::PlaneMapper;
    use polynomial::Polynomial;
    use scheduler::render;
    use std::str;

    fn quadratic() -> ClassMap {
        let polynomial =
            Polynomial::from_roots(vec![Complex::new(1.0, 0.0), Complex::new(-1.0, 0.0)]);
        let plane =
            PlaneMapper::new(2, 2, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        render(&polynomial, &plane, 50, 1).unwrap()
    }

    #[test]
    fn ppm_has_header_and_one_line_per_pixel() {
        let classes = quadratic();
        let palette = Palette::generate(2, 69).unwrap();
        let mut out = vec![];
        write_ppm(&mut out, &classes, &palette).unwrap();

        let text = str::from_utf8(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "P3");
        assert_eq!(lines[1], "2 2 255");
        assert_eq!(lines.len(), 2 + 4);
        assert!(text.ends_with('\n'));

        let [r, g, b] = palette.colour(1);
        assert_eq!(lines[2], format!("{} {} {}", r, g, b));
        let [r, g, b] = palette.colour(0);
        assert_eq!(lines[3], format!("{} {} {}", r, g, b));
        for line in &lines[2..] {
            let channels: Vec<u16> = line.split(' ').map(|c| c.parse().unwrap()).collect();
            assert_eq!(channels.len(), 3);
            assert!(channels.iter().all(|&c| c <= 255));
        }
    }

    #[test]
    fn rgb_bytes_follow_the_palette() {
        let classes = quadratic();
        let palette = Palette::generate(2, 5).unwrap();
        let bytes = rgb_bytes(&classes, &palette);
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[0..3], &palette.colour(1));
        assert_eq!(&bytes[3..6], &palette.colour(0));
    }

    #[test]
    fn save_picks_the_format_from_the_extension() {
        let dir = tempfile::tempdir().unwrap();
        let classes = quadratic();
        let palette = Palette::generate(4, 69).unwrap();

        let ppm = dir.path().join("out.ppm");
        save(&ppm, &classes, &palette).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        assert!(text.starts_with("P3\n2 2 255\n"));

        let png = dir.path().join("out.png");
        save(&png, &classes, &palette).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, palette.colour(1));
    }
}
