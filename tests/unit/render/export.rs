use super::*;
use crate::composition::element::{FillStyle, PaintElement, PaintKind};
use crate::composition::model::{Block, Floater, split_by_layer};
use crate::foundation::color::Rgba8;

const TEMPLATE: &str = "a b\nc d";

fn request(theme: &ColorTheme) -> ExportRequest<'_> {
    ExportRequest {
        template: TEMPLATE,
        grid_spec: GridSpec {
            columns: 2,
            rows: 2,
            gap_px: 0.0,
        },
        theme,
        canvas: CanvasOptions::new(24, 24).unwrap(),
    }
}

fn fill(layer: u32, r: u8) -> PaintElement {
    PaintElement::new(layer, PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(r, 0, 0))))
}

fn sample_layers() -> Vec<LayerContent> {
    split_by_layer(
        &[
            Block::new("a").element(fill(0, 40)),
            Block::new("d").element(fill(2, 80)),
        ],
        &[Floater::full_canvas().element(fill(1, 120))],
    )
}

#[test]
fn bundle_contains_every_expected_key() {
    let theme = *crate::catalog::themes::theme_by_name("royal").unwrap();
    let req = request(&theme);
    let mut assets = AssetStore::new(".");
    let layers = sample_layers();

    let bundle = export_bundle(&layers, &req, &ExplodedOptions::default(), &mut assets).unwrap();
    let keys: Vec<&str> = bundle.keys().map(String::as_str).collect();
    for expected in [
        "layer0",
        "layer1",
        "layer2",
        "composite-all-layers",
        "grid-visualization",
        "exploded-view-3d",
        "exploded-view-3d-with-grid",
    ] {
        assert!(keys.contains(&expected), "missing key {expected}");
    }
    assert!(bundle.values().all(|v| v.starts_with("data:image/png;base64,")));
}

#[test]
fn single_layer_export_is_idempotent() {
    let theme = *crate::catalog::themes::theme_by_name("royal").unwrap();
    let req = request(&theme);
    let mut assets = AssetStore::new(".");
    let layers = sample_layers();

    let a = export_single_layer(&layers[1], 1, &req, &mut assets).unwrap();
    let b = export_single_layer(&layers[1], 1, &req, &mut assets).unwrap();
    assert_eq!(a, b);
}

#[test]
fn single_layer_capture_contains_only_that_layer() {
    let theme = *crate::catalog::themes::theme_by_name("royal").unwrap();
    let req = request(&theme);
    let mut assets = AssetStore::new(".");
    let layers = sample_layers();

    // Layer 2 fills only area "d" (bottom-right quadrant); the rest stays
    // transparent because each capture starts from a fresh canvas.
    let frame = render_single_layer(&layers[2], 2, &req, &mut assets).unwrap();
    let px = |x: usize, y: usize| {
        let i = (y * 24 + x) * 4;
        frame.data[i + 3]
    };
    assert_ne!(px(18, 18), 0);
    assert_eq!(px(4, 4), 0);
    assert_eq!(px(18, 4), 0);
}

#[test]
fn composite_paints_layers_in_ascending_order() {
    let theme = *crate::catalog::themes::theme_by_name("royal").unwrap();
    let req = request(&theme);
    let mut assets = AssetStore::new(".");

    // Two full-canvas floaters on layers 0 and 3: the higher layer must win.
    let layers = split_by_layer(
        &[],
        &[
            Floater::full_canvas().element(PaintElement::new(
                3,
                PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(0, 255, 0))),
            )),
            Floater::full_canvas().element(PaintElement::new(
                0,
                PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(255, 0, 0))),
            )),
        ],
    );
    let frame = render_composite(&layers, &req, &mut assets).unwrap();
    assert_eq!(&frame.data[..4], &[0, 255, 0, 255]);
}

#[test]
fn layer_by_layer_keys_match_layer_count() {
    let theme = *crate::catalog::themes::theme_by_name("royal").unwrap();
    let req = request(&theme);
    let mut assets = AssetStore::new(".");
    let layers = sample_layers();

    let map = export_layer_by_layer(&layers, &req, &mut assets).unwrap();
    assert_eq!(map.len(), layers.len());
    assert!(map.contains_key("layer0"));
    assert!(map.contains_key(&format!("layer{}", layers.len() - 1)));
}
