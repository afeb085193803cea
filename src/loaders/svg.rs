//! Loads an SVG file and converts its `<path>` elements to flat shapes.
//!
//! Only the path-data grammar the bundled assets use is parsed:
//! `M/m L/l H/h V/v C/c S/s Q/q T/t Z/z` with implicit command
//! repetition. Curves are flattened to line segments at a fixed
//! resolution. Elliptical arcs are rejected with a parse error.

use std::path::Path;

use glam::Vec2;

use crate::error::{Error, Result};
use crate::math::color::parse_color;
use crate::math::shape::{Contour, FlatShape};

/// Line segments each curve command is flattened to.
const CURVE_SEGMENTS: usize = 16;

const POINT_MERGE_EPS: f32 = 1e-9;

/// One `<path>` element: flattened closed subpaths plus the fill color,
/// if the element declared a recognizable one.
#[derive(Debug, Clone)]
pub struct SvgPath {
    pub subpaths: Vec<Vec<Vec2>>,
    pub fill: Option<[f32; 3]>,
}

impl SvgPath {
    /// Decomposes the subpaths into flat shapes. The winding of the
    /// largest subpath is taken as the outer winding; reversed subpaths
    /// become holes of the shape that contains them.
    pub fn to_shapes(&self) -> Vec<FlatShape> {
        let contours: Vec<Contour> = self
            .subpaths
            .iter()
            .map(|points| Contour::new(points.clone()))
            .collect();

        let dominant_ccw = match contours
            .iter()
            .max_by(|a, b| {
                a.signed_area()
                    .abs()
                    .partial_cmp(&b.signed_area().abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            }) {
            Some(largest) => largest.is_ccw(),
            None => return Vec::new(),
        };

        let mut outlines: Vec<(Contour, Vec<Contour>)> = Vec::new();
        let mut holes: Vec<Contour> = Vec::new();
        for contour in contours {
            if contour.is_ccw() == dominant_ccw {
                outlines.push((contour, Vec::new()));
            } else {
                holes.push(contour);
            }
        }

        for hole in holes {
            let probe = hole.points[0];
            match outlines.iter_mut().find(|(o, _)| o.contains(probe)) {
                Some((_, hs)) => hs.push(hole),
                // An orphan reversed subpath still renders as a solid.
                None => outlines.push((hole, Vec::new())),
            }
        }

        outlines
            .into_iter()
            .map(|(outline, holes)| FlatShape::with_holes(outline, holes))
            .collect()
    }
}

/// Loads an SVG file and returns its paths, ready for shape decomposition.
pub fn load_svg_file(path: impl AsRef<Path>) -> Result<Vec<SvgPath>> {
    let path = path.as_ref();
    let fail = |reason: String| Error::AssetLoadFailed {
        path: path.display().to_string(),
        reason,
    };

    let text = std::fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
    let paths = parse_svg(&text).map_err(fail)?;
    if paths.is_empty() {
        return Err(fail("no <path> elements found".to_string()));
    }

    let total_subpaths: usize = paths.iter().map(|p| p.subpaths.len()).sum();
    log::info!(
        "loaded {:?}: {} paths, {} subpaths",
        path,
        paths.len(),
        total_subpaths
    );
    Ok(paths)
}

/// Parses SVG text into paths. Kept separate from file IO for tests.
pub fn parse_svg(text: &str) -> std::result::Result<Vec<SvgPath>, String> {
    let text = strip_comments(text);
    let mut paths = Vec::new();

    let mut rest: &str = &text;
    while let Some(start) = rest.find("<path") {
        let tag_start = &rest[start + "<path".len()..];
        let end = tag_start
            .find('>')
            .ok_or_else(|| "unterminated <path> element".to_string())?;
        let tag = &tag_start[..end];

        let attrs = parse_attrs(tag);
        let d = attrs
            .iter()
            .find(|(k, _)| k == "d")
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| "<path> element without d attribute".to_string())?;
        let fill = attrs
            .iter()
            .find(|(k, _)| k == "fill")
            .and_then(|(_, v)| parse_color(v));

        let subpaths = parse_path_data(d)?;
        if !subpaths.is_empty() {
            paths.push(SvgPath { subpaths, fill });
        }

        rest = &tag_start[end..];
    }

    Ok(paths)
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start..].find("-->") {
            Some(end) => rest = &rest[start + end + "-->".len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Splits `key="value"` pairs out of a tag body.
fn parse_attrs(tag: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let bytes = tag.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && !bytes[i].is_ascii_alphabetic() {
            i += 1;
        }
        let key_start = i;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b':') {
            i += 1;
        }
        let key = &tag[key_start..i];

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || (bytes[i] != b'"' && bytes[i] != b'\'') {
            continue;
        }
        let quote = bytes[i];
        i += 1;
        let value_start = i;
        while i < bytes.len() && bytes[i] != quote {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        attrs.push((key.to_string(), tag[value_start..i].to_string()));
        i += 1;
    }

    attrs
}

/// Parses a path-data string into closed, flattened subpaths.
pub fn parse_path_data(d: &str) -> std::result::Result<Vec<Vec<Vec2>>, String> {
    let mut lexer = Lexer::new(d);
    let mut subpaths = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();
    let mut pos = Vec2::ZERO;
    let mut start = Vec2::ZERO;
    let mut last_cubic_ctrl: Option<Vec2> = None;
    let mut last_quad_ctrl: Option<Vec2> = None;
    let mut cmd: Option<char> = None;

    while !lexer.at_end() {
        if let Some(c) = lexer.take_command() {
            cmd = Some(c);
        } else {
            // A number where a command is expected repeats the previous
            // command; after M/m the repetition is L/l.
            cmd = match cmd {
                Some('M') => Some('L'),
                Some('m') => Some('l'),
                Some(c) => Some(c),
                None => return Err("path data must start with a command".to_string()),
            };
        }

        let c = cmd.unwrap();
        let relative = c.is_ascii_lowercase();
        match c.to_ascii_uppercase() {
            'M' => {
                let p = lexer.point()?;
                flush_subpath(&mut current, &mut subpaths);
                pos = if relative { pos + p } else { p };
                start = pos;
                current.push(pos);
            }
            'L' => {
                let p = lexer.point()?;
                pos = if relative { pos + p } else { p };
                current.push(pos);
            }
            'H' => {
                let x = lexer.number()?;
                pos.x = if relative { pos.x + x } else { x };
                current.push(pos);
            }
            'V' => {
                let y = lexer.number()?;
                pos.y = if relative { pos.y + y } else { y };
                current.push(pos);
            }
            'C' => {
                let (c1, c2, end) = (lexer.point()?, lexer.point()?, lexer.point()?);
                let (c1, c2, end) = if relative {
                    (pos + c1, pos + c2, pos + end)
                } else {
                    (c1, c2, end)
                };
                flatten_cubic(&mut current, pos, c1, c2, end);
                last_cubic_ctrl = Some(c2);
                pos = end;
            }
            'S' => {
                let (c2, end) = (lexer.point()?, lexer.point()?);
                let (c2, end) = if relative { (pos + c2, pos + end) } else { (c2, end) };
                let c1 = reflect(last_cubic_ctrl, pos);
                flatten_cubic(&mut current, pos, c1, c2, end);
                last_cubic_ctrl = Some(c2);
                pos = end;
            }
            'Q' => {
                let (ctrl, end) = (lexer.point()?, lexer.point()?);
                let (ctrl, end) = if relative { (pos + ctrl, pos + end) } else { (ctrl, end) };
                flatten_quadratic(&mut current, pos, ctrl, end);
                last_quad_ctrl = Some(ctrl);
                pos = end;
            }
            'T' => {
                let end = lexer.point()?;
                let end = if relative { pos + end } else { end };
                let ctrl = reflect(last_quad_ctrl, pos);
                flatten_quadratic(&mut current, pos, ctrl, end);
                last_quad_ctrl = Some(ctrl);
                pos = end;
            }
            'Z' => {
                flush_subpath(&mut current, &mut subpaths);
                pos = start;
                // Drawing after Z without M continues from the closepath
                // point as a fresh subpath.
                current.push(pos);
            }
            'A' => return Err("elliptical arc commands are not supported".to_string()),
            other => return Err(format!("unsupported path command {other:?}")),
        }

        if !matches!(c.to_ascii_uppercase(), 'C' | 'S') {
            last_cubic_ctrl = None;
        }
        if !matches!(c.to_ascii_uppercase(), 'Q' | 'T') {
            last_quad_ctrl = None;
        }
    }

    flush_subpath(&mut current, &mut subpaths);
    Ok(subpaths)
}

/// Finishes a subpath: merges coincident neighbors, drops an explicit
/// closing point, and keeps only contours with area.
fn flush_subpath(current: &mut Vec<Vec2>, subpaths: &mut Vec<Vec<Vec2>>) {
    let mut points = std::mem::take(current);
    points.dedup_by(|a, b| a.distance_squared(*b) < POINT_MERGE_EPS);
    if points.len() > 1 {
        let closes = points[0].distance_squared(*points.last().unwrap()) < POINT_MERGE_EPS;
        if closes {
            points.pop();
        }
    }
    if points.len() >= 3 {
        subpaths.push(points);
    }
}

fn reflect(ctrl: Option<Vec2>, pos: Vec2) -> Vec2 {
    match ctrl {
        Some(c) => pos * 2.0 - c,
        None => pos,
    }
}

fn flatten_cubic(out: &mut Vec<Vec2>, p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2) {
    for i in 1..=CURVE_SEGMENTS {
        let t = i as f32 / CURVE_SEGMENTS as f32;
        let u = 1.0 - t;
        let p = p0 * (u * u * u)
            + c1 * (3.0 * u * u * t)
            + c2 * (3.0 * u * t * t)
            + p1 * (t * t * t);
        out.push(p);
    }
}

fn flatten_quadratic(out: &mut Vec<Vec2>, p0: Vec2, ctrl: Vec2, p1: Vec2) {
    for i in 1..=CURVE_SEGMENTS {
        let t = i as f32 / CURVE_SEGMENTS as f32;
        let u = 1.0 - t;
        let p = p0 * (u * u) + ctrl * (2.0 * u * t) + p1 * (t * t);
        out.push(p);
    }
}

struct Lexer<'a> {
    bytes: &'a [u8],
    text: &'a str,
    i: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            text,
            i: 0,
        }
    }

    fn skip_separators(&mut self) {
        while self.i < self.bytes.len()
            && (self.bytes[self.i].is_ascii_whitespace() || self.bytes[self.i] == b',')
        {
            self.i += 1;
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_separators();
        self.i >= self.bytes.len()
    }

    fn take_command(&mut self) -> Option<char> {
        self.skip_separators();
        if self.i < self.bytes.len() && self.bytes[self.i].is_ascii_alphabetic() {
            let c = self.bytes[self.i] as char;
            self.i += 1;
            Some(c)
        } else {
            None
        }
    }

    fn number(&mut self) -> std::result::Result<f32, String> {
        self.skip_separators();
        let start = self.i;
        let bytes = self.bytes;

        if self.i < bytes.len() && (bytes[self.i] == b'+' || bytes[self.i] == b'-') {
            self.i += 1;
        }
        let mut seen_dot = false;
        let mut seen_digit = false;
        while self.i < bytes.len() {
            match bytes[self.i] {
                b'0'..=b'9' => {
                    seen_digit = true;
                    self.i += 1;
                }
                b'.' if !seen_dot => {
                    seen_dot = true;
                    self.i += 1;
                }
                b'e' | b'E' if seen_digit => {
                    self.i += 1;
                    if self.i < bytes.len() && (bytes[self.i] == b'+' || bytes[self.i] == b'-') {
                        self.i += 1;
                    }
                    while self.i < bytes.len() && bytes[self.i].is_ascii_digit() {
                        self.i += 1;
                    }
                    break;
                }
                _ => break,
            }
        }

        if !seen_digit {
            return Err(format!(
                "expected a number at offset {start} in path data"
            ));
        }
        self.text[start..self.i]
            .parse()
            .map_err(|e| format!("bad number at offset {start}: {e}"))
    }

    fn point(&mut self) -> std::result::Result<Vec2, String> {
        Ok(Vec2::new(self.number()?, self.number()?))
    }
}
