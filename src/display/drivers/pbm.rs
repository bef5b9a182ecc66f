/*
 *  display/drivers/pbm.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Frame sink that writes each presented frame to a PBM snapshot
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::BinaryColor;
use log::debug;

use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};
use crate::vframebuf::VarFrameBuf;

/// Write a frame as plain (P1) PBM.
///
/// PBM marks ink with 1, so lit pixels are written as 0 and the image
/// reads the same as the panel.
pub fn write_pbm<W: Write>(frame: &VarFrameBuf<BinaryColor>, out: &mut W) -> io::Result<()> {
    writeln!(out, "P1")?;
    writeln!(out, "{} {}", frame.width(), frame.height())?;

    let width = frame.width().max(1);
    for row in frame.as_slice().chunks(width) {
        let line: Vec<&str> = row
            .iter()
            .map(|p| if *p == BinaryColor::On { "0" } else { "1" })
            .collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Headless sink: every frame overwrites one snapshot file
#[derive(Debug)]
pub struct PbmSnapshot {
    path: PathBuf,
    capabilities: DisplayCapabilities,
    frames_written: u64,
}

impl PbmSnapshot {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            capabilities: DisplayCapabilities {
                width,
                height,
                is_round: false,
            },
            frames_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl DisplayDriver for PbmSnapshot {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.is_dir() {
                return Err(DisplayError::InitializationFailed(format!(
                    "snapshot directory {} does not exist",
                    dir.display()
                )));
            }
        }
        debug!("snapshots go to {}", self.path.display());
        Ok(())
    }

    fn present(&mut self, frame: &VarFrameBuf<BinaryColor>) -> Result<(), DisplayError> {
        self.check_frame(frame)?;
        let mut out = BufWriter::new(File::create(&self.path)?);
        write_pbm(frame, &mut out)?;
        out.flush()?;
        self.frames_written += 1;
        debug!("snapshot {} written", self.frames_written);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;

    #[test]
    fn plain_pbm_layout() {
        let mut frame = VarFrameBuf::new(3, 2, BinaryColor::Off);
        Pixel(Point::new(1, 0), BinaryColor::On).draw(&mut frame).unwrap();

        let mut out = Vec::new();
        write_pbm(&frame, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "P1\n3 2\n1 0 1\n1 1 1\n");
    }

    #[test]
    fn snapshot_file_is_rewritten_per_frame() {
        let path = std::env::temp_dir().join(format!("dialface-{}.pbm", std::process::id()));
        let mut sink = PbmSnapshot::new(&path, 4, 4);
        sink.init().unwrap();

        let frame = VarFrameBuf::new(4, 4, BinaryColor::On);
        sink.present(&frame).unwrap();
        sink.present(&frame).unwrap();
        assert_eq!(sink.frames_written(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("P1\n4 4\n0 0 0 0\n"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_directory_fails_init() {
        let mut sink = PbmSnapshot::new("/nonexistent-dialface-dir/face.pbm", 4, 4);
        assert!(matches!(sink.init(), Err(DisplayError::InitializationFailed(_))));
    }
}
