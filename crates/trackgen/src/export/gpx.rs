//! GPX export of the track centre line.
//!
//! Local metres are projected onto latitude/longitude around an anchor with an
//! equirectangular approximation, which is accurate enough at track scale.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use track_model::{DVec3, Track};

use crate::error::TrackError;

const METERS_PER_DEGREE: f64 = 111_000.0;

const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
const GPX_SCHEMA: &str = "http://www.topografix.com/GPX/1/1/gpx.xsd";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Geographic position of the local origin.
///
/// The default sits on the equator at the prime meridian, sea level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoAnchor {
    pub lat: f64,
    pub lon: f64,
    /// Elevation in metres added to every local `y`.
    pub elevation: f64,
}

impl GeoAnchor {
    pub fn new(lat: f64, lon: f64, elevation: f64) -> Self {
        Self {
            lat,
            lon,
            elevation,
        }
    }

    /// Projects a local point. +Z is north and +X (the left of the start) is west.
    pub fn project(&self, point: DVec3) -> (f64, f64, f64) {
        let lat = self.lat + point.z / METERS_PER_DEGREE;
        let lon = self.lon - point.x / (METERS_PER_DEGREE * self.lat.to_radians().cos());
        (lat, lon, self.elevation + point.y)
    }
}

/// Streams a GPX 1.1 document for the track's centre line into `out`.
pub fn write_gpx<W: Write>(
    mut out: W,
    track: &Track,
    name: &str,
    anchor: &GeoAnchor,
) -> Result<(), TrackError> {
    let name = escape_xml(name);

    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    write!(out, r#"<gpx version="1.1" creator="trackgen" xmlns="{GPX_NAMESPACE}""#)?;
    write!(out, r#" xmlns:xsi="{XSI_NAMESPACE}""#)?;
    writeln!(out, r#" xsi:schemaLocation="{GPX_NAMESPACE} {GPX_SCHEMA}">"#)?;
    writeln!(out, "  <metadata>")?;
    writeln!(out, "    <name>{name}</name>")?;
    writeln!(
        out,
        "    <desc>seed {} difficulty {:.2}</desc>",
        track.metadata.seed, track.metadata.difficulty
    )?;
    writeln!(out, "  </metadata>")?;
    writeln!(out, "  <trk>")?;
    writeln!(out, "    <name>{name}</name>")?;
    writeln!(out, "    <trkseg>")?;

    for point in track.centerline() {
        let (lat, lon, ele) = anchor.project(point);
        writeln!(
            out,
            r#"      <trkpt lat="{lat:.7}" lon="{lon:.7}"><ele>{ele:.2}</ele></trkpt>"#
        )?;
    }

    writeln!(out, "    </trkseg>")?;
    writeln!(out, "  </trk>")?;
    writeln!(out, "</gpx>")?;
    out.flush()?;
    Ok(())
}

/// GPX 1.1 document for the track's centre line.
pub fn generate_gpx(
    track: &Track,
    name: &str,
    anchor: &GeoAnchor,
) -> Result<String, TrackError> {
    let mut buffer = Vec::new();
    write_gpx(&mut buffer, track, name, anchor)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn save_gpx(
    path: impl AsRef<Path>,
    track: &Track,
    name: &str,
    anchor: &GeoAnchor,
) -> Result<(), TrackError> {
    let file = File::create(path)?;
    write_gpx(BufWriter::new(file), track, name, anchor)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
