use super::*;
use crate::catalog::layouts::layout_by_name;
use crate::catalog::themes::theme_by_name;
use crate::composition::model::split_by_layer;

fn sample_spec() -> PostSpec {
    PostSpec {
        content: PostContent::Matchday(MatchInfo {
            home: "Union".to_string(),
            away: "Rovers".to_string(),
            competition: "League One".to_string(),
            kickoff: "Sat 15:00".to_string(),
            venue: "Eastside Park".to_string(),
        }),
        photos: vec!["img/squad.jpg".to_string(), "img/stadium.jpg".to_string()],
        logo: Some("brand/crest.svg".to_string()),
    }
}

#[test]
fn same_seed_composes_identical_posts() {
    let layout = layout_by_name("portrait-hero").unwrap();
    let theme = theme_by_name("royal").unwrap();
    let fonts = FontSet::default();
    let spec = sample_spec();

    let mut rng_a = VarietyRng::new(99);
    let mut rng_b = VarietyRng::new(99);
    let (blocks_a, floaters_a) = compose_post(layout, theme, &fonts, &spec, &mut rng_a);
    let (blocks_b, floaters_b) = compose_post(layout, theme, &fonts, &spec, &mut rng_b);

    assert_eq!(blocks_a, blocks_b);
    assert_eq!(floaters_a, floaters_b);
}

#[test]
fn every_layout_composes_without_unknown_areas() {
    let theme = theme_by_name("royal").unwrap();
    let fonts = FontSet::default();
    let spec = sample_spec();

    for layout in crate::catalog::layouts::LAYOUTS {
        let mut rng = VarietyRng::new(7);
        let (blocks, _) = compose_post(layout, theme, &fonts, &spec, &mut rng);
        for block in &blocks {
            assert!(
                layout.role_for(&block.grid_area).is_some(),
                "layout '{}' produced block for unknown area '{}'",
                layout.name,
                block.grid_area
            );
        }
    }
}

#[test]
fn background_floater_is_always_present_on_layer_zero() {
    let layout = layout_by_name("banner-split").unwrap();
    let theme = theme_by_name("midnight").unwrap();
    let fonts = FontSet::default();

    // No photos: the gradient background stands in.
    let spec = PostSpec {
        photos: Vec::new(),
        logo: None,
        ..sample_spec()
    };
    let mut rng = VarietyRng::new(1);
    let (blocks, floaters) = compose_post(layout, theme, &fonts, &spec, &mut rng);

    assert!(floaters.iter().any(|f| f.elements.iter().any(|e| e.layer == 0)));
    let layers = split_by_layer(&blocks, &floaters);
    assert!(!layers.is_empty());
    assert!(!layers[0].is_empty());
}

#[test]
fn player_spotlight_includes_number_line() {
    let layout = layout_by_name("quad").unwrap();
    let theme = theme_by_name("royal").unwrap();
    let fonts = FontSet::default();
    let spec = PostSpec {
        content: PostContent::PlayerSpotlight(PlayerInfo {
            name: "A. Keita".to_string(),
            number: 10,
            position: "Midfield".to_string(),
            quote: Some("We go again".to_string()),
        }),
        photos: vec!["img/keita.jpg".to_string()],
        logo: None,
    };
    let mut rng = VarietyRng::new(5);
    let (blocks, _) = compose_post(layout, theme, &fonts, &spec, &mut rng);

    let overlay_texts: Vec<String> = blocks
        .iter()
        .flat_map(|b| b.elements.iter())
        .filter_map(|el| match &el.kind {
            crate::composition::element::PaintKind::Overlay(spec) => Some(
                spec.lines
                    .iter()
                    .map(|l| l.text.clone())
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
            _ => None,
        })
        .collect();
    assert!(overlay_texts.iter().any(|t| t.contains("#10")));
}

#[test]
fn post_spec_json_roundtrip() {
    let spec = sample_spec();
    let s = serde_json::to_string(&spec).unwrap();
    let de: PostSpec = serde_json::from_str(&s).unwrap();
    assert_eq!(de, spec);
}
