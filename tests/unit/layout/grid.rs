use super::*;

const PORTRAIT_HERO: &str = "\
beige beige trans trans
hero hero trans trans
hero hero trans trans
hero hero blue vert
hero hero blue vert
logo trans2 blue vert";

fn spec_6x4() -> GridSpec {
    GridSpec {
        columns: 4,
        rows: 6,
        gap_px: 0.0,
    }
}

#[test]
fn resolves_spanned_areas_to_pixel_bounds() {
    // 6 rows x 4 columns over 1080x1080: cells are 270 wide, 180 tall.
    let grid = GridResolver::parse(PORTRAIT_HERO, spec_6x4(), 1080.0, 1080.0).unwrap();

    // hero spans rows 1-4, cols 0-1.
    let hero = grid.area_bounds("hero").unwrap();
    assert_eq!((hero.x, hero.y, hero.width, hero.height), (0.0, 180.0, 540.0, 720.0));

    // blue spans rows 3-5, col 2.
    let blue = grid.area_bounds("blue").unwrap();
    assert_eq!((blue.x, blue.y, blue.width, blue.height), (540.0, 540.0, 270.0, 540.0));

    // vert spans rows 3-5, col 3.
    let vert = grid.area_bounds("vert").unwrap();
    assert_eq!((vert.x, vert.y, vert.width, vert.height), (810.0, 540.0, 270.0, 540.0));
}

#[test]
fn resolution_is_deterministic() {
    let grid = GridResolver::parse(PORTRAIT_HERO, spec_6x4(), 1080.0, 1080.0).unwrap();
    let a = grid.area_bounds("hero").unwrap();
    let b = grid.area_bounds("hero").unwrap();
    assert_eq!(a, b);
}

#[test]
fn unknown_area_is_none_not_error() {
    let grid = GridResolver::parse(PORTRAIT_HERO, spec_6x4(), 1080.0, 1080.0).unwrap();
    assert!(grid.area_bounds("missing").is_none());
}

#[test]
fn quotes_are_stripped_from_tokens() {
    let template = "\"a\" \"a\"\n\"b\" \"b\"";
    let spec = GridSpec {
        columns: 2,
        rows: 2,
        gap_px: 0.0,
    };
    let grid = GridResolver::parse(template, spec, 100.0, 100.0).unwrap();
    let a = grid.area_bounds("a").unwrap();
    assert_eq!((a.x, a.y, a.width, a.height), (0.0, 0.0, 100.0, 50.0));
}

#[test]
fn gap_insets_each_area() {
    let template = "a b\nc d";
    let spec = GridSpec {
        columns: 2,
        rows: 2,
        gap_px: 5.0,
    };
    let grid = GridResolver::parse(template, spec, 100.0, 100.0).unwrap();
    let b = grid.area_bounds("b").unwrap();
    assert_eq!((b.x, b.y, b.width, b.height), (55.0, 5.0, 40.0, 40.0));
}

#[test]
fn rejects_row_count_mismatch() {
    let err = GridResolver::parse("a a a a\nb b b b", spec_6x4(), 1080.0, 1080.0).unwrap_err();
    assert!(matches!(err, TifoError::Template(_)));
}

#[test]
fn rejects_column_count_mismatch() {
    let template = "a a a\nb b b";
    let spec = GridSpec {
        columns: 2,
        rows: 2,
        gap_px: 0.0,
    };
    assert!(GridResolver::parse(template, spec, 100.0, 100.0).is_err());
}

#[test]
fn rejects_non_contiguous_area_reuse() {
    // `x` appears in two opposite corners: its bounding span covers cells it
    // does not actually occupy.
    let template = "x a\na x";
    let spec = GridSpec {
        columns: 2,
        rows: 2,
        gap_px: 0.0,
    };
    let err = GridResolver::parse(template, spec, 100.0, 100.0).unwrap_err();
    assert!(err.to_string().contains("contiguous"));
}

#[test]
fn rejects_l_shaped_area() {
    let template = "x x\nx a";
    let spec = GridSpec {
        columns: 2,
        rows: 2,
        gap_px: 0.0,
    };
    assert!(GridResolver::parse(template, spec, 100.0, 100.0).is_err());
}

#[test]
fn full_partition_covers_canvas_without_overlap() {
    let grid = GridResolver::parse(PORTRAIT_HERO, spec_6x4(), 1080.0, 1080.0).unwrap();
    let mut covered = 0.0;
    for area in grid.areas() {
        let b = grid.area_bounds(&area.name).unwrap();
        covered += b.width * b.height;
    }
    assert_eq!(covered, 1080.0 * 1080.0);
}
