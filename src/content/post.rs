use crate::{
    catalog::{layouts::AreaRole, layouts::Layout, themes::ColorTheme},
    composition::{
        element::OverlayAnchor,
        model::{Block, Floater},
    },
    content::builders::{
        FontSet, background_gradient, background_photo, body_line, fill_block, gradient_block,
        headline_block, headline_line, hero_photo_block, logo_block, overlay_block,
        vertical_label_block, watermark_pattern,
    },
    foundation::math::VarietyRng,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchInfo {
    pub home: String,
    pub away: String,
    pub competition: String,
    pub kickoff: String,
    pub venue: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrainingInfo {
    pub title: String,
    pub date: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub number: u32,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

/// The three post kinds the generator produces.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostContent {
    Matchday(MatchInfo),
    Training(TrainingInfo),
    PlayerSpotlight(PlayerInfo),
}

impl PostContent {
    fn headline(&self) -> String {
        match self {
            PostContent::Matchday(_) => "Matchday".to_string(),
            PostContent::Training(info) => info.title.clone(),
            PostContent::PlayerSpotlight(info) => info.name.clone(),
        }
    }

    fn side_label(&self) -> String {
        match self {
            PostContent::Matchday(info) => info.competition.clone(),
            PostContent::Training(_) => "Training".to_string(),
            PostContent::PlayerSpotlight(info) => info.position.clone(),
        }
    }
}

/// Content plus the assets it draws on.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PostSpec {
    pub content: PostContent,
    /// Candidate background/hero photos; the rng picks among them.
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

// Layer plan shared by all post kinds.
const LAYER_BACKGROUND: u32 = 0;
const LAYER_PANELS: u32 = 1;
const LAYER_WATERMARK: u32 = 2;
const LAYER_MEDIA: u32 = 3;
const LAYER_TEXT: u32 = 4;

/// Assemble a full post: walk the layout's roles once and attach the right
/// builders. All variety (photo pick, watermark toggle, plate toggle,
/// accent gradient) is drawn from the injected rng, so a seed pins the
/// output exactly.
pub fn compose_post(
    layout: &Layout,
    theme: &ColorTheme,
    fonts: &FontSet,
    spec: &PostSpec,
    rng: &mut VarietyRng,
) -> (Vec<Block>, Vec<Floater>) {
    let mut blocks = Vec::new();
    let mut floaters = Vec::new();

    let background_photo_src = rng.pick(&spec.photos).cloned();
    match &background_photo_src {
        Some(src) => floaters.push(background_photo(src.clone(), LAYER_BACKGROUND, theme)),
        None => floaters.push(background_gradient(LAYER_BACKGROUND, theme)),
    }

    if rng.chance(0.6) {
        floaters.push(watermark_pattern(
            spec.content.side_label(),
            LAYER_WATERMARK,
            theme,
            fonts,
        ));
    }

    let mut headline_placed = false;
    let mut overlay_placed = false;

    for (area, role) in layout.roles() {
        match role {
            AreaRole::Backdrop => {}
            AreaRole::Hero => match rng.pick(&spec.photos) {
                Some(src) => blocks.push(hero_photo_block(area, src.clone(), LAYER_MEDIA)),
                None => blocks.push(gradient_block(area, LAYER_PANELS, theme)),
            },
            AreaRole::Accent => {
                if rng.chance(0.5) {
                    blocks.push(gradient_block(area, LAYER_PANELS, theme));
                } else {
                    blocks.push(fill_block(area, theme.blue, LAYER_PANELS));
                }
                if !overlay_placed {
                    blocks.push(overlay_for(area, &spec.content, theme, fonts));
                    overlay_placed = true;
                }
            }
            AreaRole::Neutral => {
                blocks.push(fill_block(area, theme.beige, LAYER_PANELS));
                if !headline_placed {
                    blocks.push(headline_block(
                        area,
                        spec.content.headline(),
                        LAYER_TEXT,
                        theme,
                        fonts,
                    ));
                    headline_placed = true;
                }
            }
            AreaRole::VerticalText => {
                blocks.push(fill_block(area, theme.blue, LAYER_PANELS));
                blocks.push(vertical_label_block(
                    area,
                    spec.content.side_label(),
                    LAYER_TEXT,
                    theme,
                    fonts,
                ));
            }
            AreaRole::Logo => {
                if let Some(logo) = &spec.logo {
                    let with_plate = rng.chance(0.5);
                    blocks.push(logo_block(area, logo.clone(), LAYER_MEDIA, theme, with_plate));
                }
            }
        }
    }

    (blocks, floaters)
}

fn overlay_for(
    area: &str,
    content: &PostContent,
    theme: &ColorTheme,
    fonts: &FontSet,
) -> Block {
    let lines = match content {
        PostContent::Matchday(info) => vec![
            headline_line(format!("{} v {}", info.home, info.away), 30.0, theme.paper, fonts),
            body_line(info.kickoff.clone(), 22.0, theme.paper, fonts),
            body_line(info.venue.clone(), 20.0, theme.paper, fonts),
        ],
        PostContent::Training(info) => {
            let mut lines = vec![
                headline_line(info.title.clone(), 28.0, theme.paper, fonts),
                body_line(info.date.clone(), 22.0, theme.paper, fonts),
                body_line(info.location.clone(), 20.0, theme.paper, fonts),
            ];
            if let Some(note) = &info.note {
                lines.push(body_line(note.clone(), 18.0, theme.paper, fonts));
            }
            lines
        }
        PostContent::PlayerSpotlight(info) => {
            let mut lines = vec![
                headline_line(format!("#{}", info.number), 44.0, theme.accent, fonts),
                headline_line(info.name.clone(), 28.0, theme.paper, fonts),
                body_line(info.position.clone(), 20.0, theme.paper, fonts),
            ];
            if let Some(quote) = &info.quote {
                lines.push(body_line(format!("\u{201c}{quote}\u{201d}"), 18.0, theme.paper, fonts));
            }
            lines
        }
    };
    overlay_block(area, lines, OverlayAnchor::Center, LAYER_TEXT)
}

#[cfg(test)]
#[path = "../../tests/unit/content/post.rs"]
mod tests;
