use crate::{
    composition::element::PaintElement,
    foundation::core::BoundingBox,
};

/// Paint-element container bound to a named grid area.
///
/// Bounds resolve at render time through the grid resolver; content is
/// clipped to the resolved area (minus padding). Blocks are built fresh per
/// render pass and discarded afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub grid_area: String,
    #[serde(default)]
    pub padding: f64,
    pub elements: Vec<PaintElement>,
}

impl Block {
    pub fn new(grid_area: impl Into<String>) -> Self {
        Self {
            grid_area: grid_area.into(),
            padding: 0.0,
            elements: Vec::new(),
        }
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn element(mut self, element: PaintElement) -> Self {
        self.elements.push(element);
        self
    }
}

/// Paint-element container bound to an explicit rectangle, or the full
/// canvas when `bounds` is `None`. Independent of grid naming.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Floater {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    pub elements: Vec<PaintElement>,
}

impl Floater {
    pub fn full_canvas() -> Self {
        Self {
            bounds: None,
            elements: Vec::new(),
        }
    }

    pub fn at(bounds: BoundingBox) -> Self {
        Self {
            bounds: Some(bounds),
            elements: Vec::new(),
        }
    }

    pub fn element(mut self, element: PaintElement) -> Self {
        self.elements.push(element);
        self
    }
}

/// One layer's worth of content, used by the per-layer exporters and the
/// exploded view. Index in the surrounding `Vec` is the layer number.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerContent {
    pub blocks: Vec<Block>,
    pub floaters: Vec<Floater>,
}

impl LayerContent {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.floaters.is_empty()
    }
}

/// Group blocks' and floaters' elements by layer number.
///
/// The result has one entry per layer from 0 to the maximum observed layer
/// inclusive; containers appear in a layer only with the elements tagged for
/// it, preserving insertion order. Layers nothing paints into are present
/// but empty.
pub fn split_by_layer(blocks: &[Block], floaters: &[Floater]) -> Vec<LayerContent> {
    let max_layer = blocks
        .iter()
        .flat_map(|b| b.elements.iter())
        .chain(floaters.iter().flat_map(|f| f.elements.iter()))
        .map(|el| el.layer)
        .max();

    let Some(max_layer) = max_layer else {
        return Vec::new();
    };

    let mut layers = vec![LayerContent::default(); (max_layer as usize) + 1];

    for (n, content) in layers.iter_mut().enumerate() {
        let n = n as u32;
        for floater in floaters {
            let elements: Vec<PaintElement> = floater
                .elements
                .iter()
                .filter(|el| el.layer == n)
                .cloned()
                .collect();
            if !elements.is_empty() {
                content.floaters.push(Floater {
                    bounds: floater.bounds,
                    elements,
                });
            }
        }
        for block in blocks {
            let elements: Vec<PaintElement> = block
                .elements
                .iter()
                .filter(|el| el.layer == n)
                .cloned()
                .collect();
            if !elements.is_empty() {
                content.blocks.push(Block {
                    grid_area: block.grid_area.clone(),
                    padding: block.padding,
                    elements,
                });
            }
        }
    }

    layers
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
