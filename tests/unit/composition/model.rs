use super::*;
use crate::composition::element::{FillStyle, PaintElement, PaintKind};
use crate::foundation::color::Rgba8;

fn fill(layer: u32) -> PaintElement {
    PaintElement::new(layer, PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(1, 2, 3))))
}

#[test]
fn split_spans_zero_to_max_observed_layer() {
    let blocks = vec![Block::new("hero").element(fill(0)).element(fill(4))];
    let layers = split_by_layer(&blocks, &[]);
    assert_eq!(layers.len(), 5);
    assert!(!layers[0].is_empty());
    assert!(layers[1].is_empty());
    assert!(layers[2].is_empty());
    assert!(layers[3].is_empty());
    assert!(!layers[4].is_empty());
}

#[test]
fn split_filters_elements_per_layer() {
    let blocks = vec![Block::new("hero").element(fill(0)).element(fill(2))];
    let floaters = vec![Floater::full_canvas().element(fill(2))];
    let layers = split_by_layer(&blocks, &floaters);

    assert_eq!(layers[0].blocks.len(), 1);
    assert_eq!(layers[0].floaters.len(), 0);
    assert_eq!(layers[0].blocks[0].elements.len(), 1);

    assert_eq!(layers[2].blocks.len(), 1);
    assert_eq!(layers[2].floaters.len(), 1);
    assert_eq!(layers[2].blocks[0].elements[0].layer, 2);
}

#[test]
fn split_preserves_insertion_order() {
    let blocks = vec![
        Block::new("a").element(fill(1)),
        Block::new("b").element(fill(1)),
        Block::new("c").element(fill(1)),
    ];
    let layers = split_by_layer(&blocks, &[]);
    let names: Vec<&str> = layers[1].blocks.iter().map(|b| b.grid_area.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn split_of_empty_input_is_empty() {
    assert!(split_by_layer(&[], &[]).is_empty());
    // Containers with no elements contribute no layers either.
    let blocks = vec![Block::new("hero")];
    assert!(split_by_layer(&blocks, &[]).is_empty());
}

#[test]
fn block_padding_and_builder_chain() {
    let b = Block::new("hero").padding(12.0).element(fill(0));
    assert_eq!(b.padding, 12.0);
    assert_eq!(b.elements.len(), 1);
}

#[test]
fn floater_bounds_default_to_full_canvas() {
    let f = Floater::full_canvas();
    assert!(f.bounds.is_none());
    let f = Floater::at(crate::foundation::core::BoundingBox::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(f.bounds.unwrap().width, 3.0);
}
