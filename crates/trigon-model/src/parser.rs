use crate::config::LoaderConfig;
use crate::error::ParseError;
use crate::geometry::SceneGeometry;
use crate::lines::{Lines, Record};
use crate::scene::{Material, Triangle};

/// Triangles reserved up front at most; larger scenes grow on demand so a
/// bogus count cannot trigger a huge allocation before any data is read.
const RESERVE_LIMIT: usize = 1 << 16;

const AMBIENT: &[&str] = &["ambient", "ambient color"];
const DIFFUSE: &[&str] = &["diffuse", "diffuse color"];
const SPECULAR: &[&str] = &["specular", "specular color"];
const SHINE: &[&str] = &["shine", "shininess", "material shine"];
const VERTEX: [&str; 3] = ["v0", "v1", "v2"];
const FACE_NORMAL: &[&str] = &["face normal"];

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser<'s, 'c> {
    lines: Lines<'s>,
    config: &'c LoaderConfig,
}

impl<'s, 'c> Parser<'s, 'c> {
    pub fn new(src: &'s str, config: &'c LoaderConfig) -> Self {
        Self { lines: Lines::new(src), config }
    }

    // ── Scene ─────────────────────────────────────────────────────────────

    /// Parses the whole file. The geometry is only handed out once every
    /// declared block has been read.
    pub fn parse_scene(mut self) -> Result<SceneGeometry, ParseError> {
        self.lines.next_raw("header line")?;

        let triangle_count = self.parse_count("triangles")?;
        let (count_line, material_count) = self.parse_count_at("material count")?;
        if material_count > self.config.max_materials {
            return Err(ParseError::new(
                format!(
                    "material count {material_count} exceeds the maximum of {}",
                    self.config.max_materials
                ),
                count_line,
            ));
        }

        let materials = (0..material_count)
            .map(|_| self.parse_material())
            .collect::<Result<Vec<_>, _>>()?;

        self.lines.next_content("separator line before triangle data")?;

        let mut geometry = SceneGeometry::with_capacity(triangle_count.min(RESERVE_LIMIT));
        for _ in 0..triangle_count {
            let triangle = self.parse_triangle(&materials)?;
            // parse_triangle already rejected indices outside `materials`.
            let colors = triangle.material.map(|i| materials[i].vertex_color());
            geometry.push_triangle(&triangle, colors, self.config.normals);
        }

        let trailing = self.lines.drain_content();
        if trailing > 0 {
            log::debug!("ignoring {trailing} non-blank line(s) after the last triangle block");
        }

        Ok(geometry)
    }

    // ── Counts ────────────────────────────────────────────────────────────

    fn parse_count(&mut self, key: &str) -> Result<usize, ParseError> {
        self.parse_count_at(key).map(|(_, count)| count)
    }

    /// Parses `<key> = <integer>`. The key compares case-insensitively with a
    /// leading `#` stripped.
    fn parse_count_at(&mut self, key: &str) -> Result<(usize, usize), ParseError> {
        let (line, text) = self.lines.next_content(&format!("'{key} = <count>' line"))?;

        let Some((lhs, rhs)) = text.split_once('=') else {
            return Err(ParseError::new(
                format!("expected '{key} = <count>', got {:?}", text.trim()),
                line,
            ));
        };

        let found = normalize_key(lhs);
        if found != key {
            return Err(ParseError::new(
                format!("expected '{key}' count, got {found:?}"),
                line,
            ));
        }

        let value = rhs.trim();
        let count = value
            .parse::<usize>()
            .map_err(|_| ParseError::new(format!("invalid {key} value {value:?}"), line))?;

        Ok((line, count))
    }

    // ── Material ──────────────────────────────────────────────────────────

    fn parse_material(&mut self) -> Result<Material, ParseError> {
        let ambient = self.parse_vec3_record(AMBIENT)?;
        let diffuse = self.parse_vec3_record(DIFFUSE)?;
        let specular = self.parse_vec3_record(SPECULAR)?;

        let rec = self.lines.next_record("'shine' line")?;
        rec.expect_label(SHINE)?;
        rec.expect_field_count(1)?;
        let shininess = rec.float(0)?;

        Ok(Material { ambient, diffuse, specular, shininess })
    }

    fn parse_vec3_record(&mut self, labels: &[&str]) -> Result<[f32; 3], ParseError> {
        let rec = self.lines.next_record(&format!("'{}' line", labels[0]))?;
        rec.expect_label(labels)?;
        rec.expect_field_count(3)?;
        rec.vec3(0)
    }

    // ── Triangle ──────────────────────────────────────────────────────────

    fn parse_triangle(&mut self, materials: &[Material]) -> Result<Triangle, ParseError> {
        let mut triangle = Triangle::default();

        for (slot, label) in VERTEX.iter().enumerate() {
            let rec = self.lines.next_record(&format!("'{label}' line"))?;
            rec.expect_label(&[*label])?;
            rec.expect_field_count(7)?;

            triangle.vertices[slot] = rec.vec3(0)?;
            triangle.normals[slot] = rec.vec3(3)?;
            triangle.material[slot] = resolve_material(&rec, 6, materials.len())?;
        }

        let rec = self.lines.next_record("'face normal' line")?;
        rec.expect_label(FACE_NORMAL)?;
        rec.expect_field_count(3)?;
        triangle.face_normal = rec.vec3(0)?;

        Ok(triangle)
    }
}

fn resolve_material(rec: &Record<'_>, field: usize, material_count: usize) -> Result<usize, ParseError> {
    let index = rec.index(field)?;
    if index >= material_count {
        return Err(rec.error(format!(
            "material index {index} out of range (material count is {material_count})"
        )));
    }
    Ok(index)
}

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('#')
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
