//! Reader for the **trigon** triangle scene format.
//!
//! A scene file is line-oriented text: a header line, the triangle and
//! material counts, one four-line block per material, a separator line, then
//! one four-line block per triangle. The loader resolves each vertex's
//! material to its diffuse color and flattens everything into
//! [`SceneGeometry`], ready for vertex-buffer upload.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | `LoaderConfig`, `NormalSource` |
//! | [`error`] | `ParseError`, `LoadError` |
//! | [`geometry`] | `SceneGeometry` |
//! | [`scene`] | `Material`, `Triangle` |
//!
//! # Quick start
//!
//! ```rust
//! use trigon_model::parse_str;
//!
//! let src = "\
//! data
//! ## triangles = 1
//! Material count = 1
//! ambient color 0 0 0
//! diffuse color 1 0 0
//! specular color 0 0 0
//! material shine 0
//! -- 3*[pos(x,y,z) normal(x,y,z) color_index] face_normal[x y z]
//! v0 0 0 0 0 0 1 0
//! v1 1 0 0 0 0 1 0
//! v2 0 1 0 0 0 1 0
//! face normal 0 0 1
//! ";
//!
//! let geometry = parse_str(src).unwrap();
//! assert_eq!(geometry.triangle_count(), 1);
//! assert_eq!(&geometry.colors()[..4], &[1.0, 0.0, 0.0, 1.0]);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
mod lines;
mod parser;
pub mod scene;

use std::path::Path;

pub use config::{LoaderConfig, NormalSource};
pub use error::{LoadError, ParseError};
pub use geometry::SceneGeometry;
pub use scene::{Material, Triangle, Vec3};

use parser::Parser;

/// Parses scene source text with the default [`LoaderConfig`].
pub fn parse_str(src: &str) -> Result<SceneGeometry, ParseError> {
    parse_str_with(src, &LoaderConfig::default())
}

/// Parses scene source text.
pub fn parse_str_with(src: &str, config: &LoaderConfig) -> Result<SceneGeometry, ParseError> {
    Parser::new(src, config).parse_scene()
}

/// Reads and parses a scene file with the default [`LoaderConfig`].
pub fn load_model(path: impl AsRef<Path>) -> Result<SceneGeometry, LoadError> {
    load_model_with(path, &LoaderConfig::default())
}

/// Reads and parses a scene file.
///
/// Nothing is returned unless the whole file parses; a failure part-way
/// through drops everything read so far.
pub fn load_model_with(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> Result<SceneGeometry, LoadError> {
    let path = path.as_ref();
    let src = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let geometry = parse_str_with(&src, config).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "loaded scene '{}': {} triangle(s)",
        path.display(),
        geometry.triangle_count()
    );
    Ok(geometry)
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    const HEADER: &str = "data\n# triangles = {T}\nMaterial count = {M}\n";
    const RED: &str = "ambient 0 0 0\ndiffuse 1 0 0\nspecular 0 0 0\nshine 0\n";
    const GREEN: &str = "ambient color 0.1 0.1 0.1\ndiffuse color 0 1 0\nspecular color 1 1 1\nmaterial shine 8\n";
    const SEPARATOR: &str = "-- 3*[pos(x,y,z) normal(x,y,z) color_index] face_normal[x y z]\n";

    fn tri(m: [usize; 3]) -> String {
        format!(
            "v0 0 0 0 0 0 1 {}\nv1 1 0 0 0 0 1 {}\nv2 0 1 0 0 0 1 {}\nface normal 0 0 1\n",
            m[0], m[1], m[2]
        )
    }

    fn scene(triangles: usize, materials: &[&str], blocks: &[String]) -> String {
        let mut s = HEADER
            .replace("{T}", &triangles.to_string())
            .replace("{M}", &materials.len().to_string());
        materials.iter().for_each(|m| s.push_str(m));
        s.push_str(SEPARATOR);
        blocks.iter().for_each(|b| s.push_str(b));
        s
    }

    fn ok(src: &str) -> SceneGeometry { parse_str(src).unwrap() }
    fn err(src: &str) -> ParseError { parse_str(src).unwrap_err() }

    // ── well-formed scenes ────────────────────────────────────────────────

    #[test]
    fn single_red_triangle() {
        let g = ok(&scene(1, &[RED], &[tri([0, 0, 0])]));
        assert_eq!(g.triangle_count(), 1);
        assert_eq!(g.positions(), &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(g.colors(), &[1.0f32, 0.0, 0.0, 1.0].repeat(3)[..]);
    }

    #[test]
    fn buffer_lengths_follow_triangle_count() {
        let blocks: Vec<String> = (0..5).map(|i| tri([i % 2, 0, 1])).collect();
        let g = ok(&scene(5, &[RED, GREEN], &blocks));
        assert_eq!(g.triangle_count(), 5);
        assert_eq!(g.positions().len(), 45);
        assert_eq!(g.normals().len(), 45);
        assert_eq!(g.colors().len(), 60);
    }

    #[test]
    fn vertex_colors_follow_material_indices() {
        let g = ok(&scene(1, &[RED, GREEN], &[tri([1, 0, 1])]));
        let colors: Vec<&[f32]> = g.colors().chunks(4).collect();
        assert_eq!(colors[0], &[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(colors[1], &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(colors[2], &[0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn zero_triangles() {
        let g = ok(&scene(0, &[RED], &[]));
        assert!(g.is_empty());
        assert!(g.positions().is_empty());
    }

    #[test]
    fn blank_lines_and_crlf_between_records() {
        let src = scene(1, &[RED], &[tri([0, 0, 0])]).replace('\n', "\r\n\r\n");
        assert_eq!(ok(&src).triangle_count(), 1);
    }

    #[test]
    fn trailing_content_is_ignored() {
        let mut src = scene(1, &[RED], &[tri([0, 0, 0])]);
        src.push_str("end of data\n");
        assert_eq!(ok(&src).triangle_count(), 1);
    }

    #[test]
    fn blank_header_line_is_skipped() {
        let src = format!("\n{}", &scene(1, &[RED], &[tri([0, 0, 0])])["data\n".len()..]);
        assert!(src.starts_with("\n# triangles = 1"));
        assert_eq!(ok(&src).triangle_count(), 1);
        assert_eq!(ok("\n# triangles = 0\nMaterial count = 0\n--sep\n").triangle_count(), 0);
    }

    #[test]
    fn header_is_not_read_as_a_count() {
        let src = scene(0, &[RED], &[]).replacen("data", "# triangles = 7", 1);
        assert!(ok(&src).is_empty());
    }

    #[test]
    fn material_count_at_limit_is_accepted() {
        let config = LoaderConfig { max_materials: 2, ..Default::default() };
        let g = parse_str_with(&scene(1, &[RED, GREEN], &[tri([1, 1, 1])]), &config).unwrap();
        assert_eq!(&g.colors()[..4], &[0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn face_normals_when_requested() {
        let config = LoaderConfig { normals: NormalSource::Face, ..Default::default() };
        let src = scene(1, &[RED], &["v0 0 0 0 1 0 0 0\nv1 1 0 0 1 0 0 0\nv2 0 1 0 1 0 0 0\nface normal 0 0 -1\n".to_string()]);
        let g = parse_str_with(&src, &config).unwrap();
        assert_eq!(g.normals(), &[0.0f32, 0.0, -1.0].repeat(3)[..]);
    }

    // ── malformed scenes ──────────────────────────────────────────────────

    #[test]
    fn err_material_index_out_of_range() {
        let e = err(&scene(1, &[RED], &[tri([0, 1, 0])]));
        assert!(e.message.contains("out of range"));
        // header, 2 counts, 4 material lines, separator, v0 -> v1 is line 10.
        assert_eq!(e.line, 10);
    }

    #[test]
    fn err_fewer_triangles_than_declared() {
        let e = err(&scene(3, &[RED], &[tri([0, 0, 0]), tri([0, 0, 0])]));
        assert!(e.message.contains("unexpected end of file"));
    }

    #[test]
    fn err_fewer_materials_than_declared() {
        let src = scene(0, &[RED], &[]).replace("Material count = 1", "Material count = 2");
        err(&src);
    }

    #[test]
    fn err_material_count_over_limit() {
        let config = LoaderConfig { max_materials: 1, ..Default::default() };
        let e = parse_str_with(&scene(0, &[RED, GREEN], &[]), &config).unwrap_err();
        assert_eq!(e.line, 3);
    }

    #[test]
    fn err_bad_triangle_count() {
        err(&scene(1, &[RED], &[tri([0, 0, 0])]).replace("= 1\nMaterial", "= one\nMaterial"));
    }

    #[test]
    fn err_negative_material_count() {
        err(&scene(0, &[RED], &[]).replace("Material count = 1", "Material count = -1"));
    }

    #[test]
    fn err_wrong_vertex_label() {
        let src = scene(1, &[RED], &[tri([0, 0, 0])]).replace("v1 ", "v3 ");
        assert!(err(&src).message.contains("'v1'"));
    }

    #[test]
    fn err_extra_field_on_vertex() {
        let src = scene(1, &[RED], &[tri([0, 0, 0]).replacen(" 0\n", " 0 9\n", 1)]);
        err(&src);
    }

    #[test]
    fn err_missing_face_normal() {
        let block = tri([0, 0, 0]).replace("face normal 0 0 1\n", "");
        err(&scene(1, &[RED], &[block]));
    }

    #[test]
    fn err_material_lines_out_of_order() {
        let swapped = "diffuse 1 0 0\nambient 0 0 0\nspecular 0 0 0\nshine 0\n";
        err(&scene(0, &[swapped], &[]));
    }

    #[test]
    fn err_empty_file() { err(""); }

    // ── load_model ────────────────────────────────────────────────────────

    #[test]
    fn load_model_reads_file() {
        let path = std::env::temp_dir().join(format!("trigon-model-{}.in", std::process::id()));
        std::fs::write(&path, scene(2, &[RED], &[tri([0, 0, 0]), tri([0, 0, 0])])).unwrap();
        let g = load_model(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(g.unwrap().triangle_count(), 2);
    }

    #[test]
    fn load_model_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("trigon-model-does-not-exist.in");
        assert!(matches!(load_model(&path), Err(LoadError::Io { .. })));
    }
}
