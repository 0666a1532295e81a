use super::*;
use crate::composition::element::{FillStyle, PaintElement, PaintKind};
use crate::composition::model::{Block, Floater, split_by_layer};

const TEMPLATE: &str = "a b\nc d";

fn spec() -> GridSpec {
    GridSpec {
        columns: 2,
        rows: 2,
        gap_px: 0.0,
    }
}

fn theme() -> ColorTheme {
    *crate::catalog::themes::theme_by_name("royal").unwrap()
}

fn fill(layer: u32, r: u8) -> PaintElement {
    PaintElement::new(layer, PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(r, 0, 0))))
}

fn render(layers: &[LayerContent]) -> FrameRGBA {
    let mut assets = AssetStore::new(".");
    render_exploded_view(
        layers,
        TEMPLATE,
        spec(),
        &theme(),
        CanvasOptions::new(40, 40).unwrap(),
        &ExplodedOptions::default(),
        &mut assets,
    )
    .unwrap()
}

#[test]
fn output_is_one_and_a_half_times_base() {
    let layers = split_by_layer(&[Block::new("a").element(fill(0, 10))], &[]);
    let frame = render(&layers);
    assert_eq!((frame.width, frame.height), (60, 60));
}

#[test]
fn empty_layer_contributes_nothing() {
    // Layers 0 and 2 are populated; layer 1 is an empty gap.
    let blocks = vec![Block::new("a").element(fill(0, 10)).element(fill(2, 20))];
    let with_gap = split_by_layer(&blocks, &[]);
    assert!(with_gap[1].is_empty());

    // The same content retagged onto adjacent layers draws the same cards.
    let packed = vec![Block::new("a").element(fill(0, 10)).element(fill(1, 20))];
    let without_gap = split_by_layer(&packed, &[]);

    assert_eq!(render(&with_gap).data, render(&without_gap).data);
}

#[test]
fn view_is_deterministic() {
    let layers = split_by_layer(
        &[Block::new("a").element(fill(0, 10))],
        &[Floater::full_canvas().element(fill(1, 30))],
    );
    assert_eq!(render(&layers).data, render(&layers).data);
}

#[test]
fn unknown_area_layer_still_produces_a_view() {
    let layers = split_by_layer(&[Block::new("missing").element(fill(0, 10))], &[]);
    let frame = render(&layers);
    assert!(frame.data.iter().any(|&b| b != 0));
}

#[test]
fn with_grid_differs_from_without() {
    let layers = split_by_layer(&[Block::new("a").element(fill(0, 10))], &[]);
    let mut assets = AssetStore::new(".");
    let plain = render(&layers);
    let gridded = render_exploded_view_with_grid(
        &layers,
        TEMPLATE,
        spec(),
        &theme(),
        CanvasOptions::new(40, 40).unwrap(),
        &ExplodedOptions::default(),
        &mut assets,
    )
    .unwrap();
    assert_ne!(plain.data, gridded.data);
}
