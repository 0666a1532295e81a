use crate::foundation::error::{TifoError, TifoResult};

/// Semantic purpose of a grid area, assigned at layout-definition time.
///
/// Builders attach content by role; area-name strings never carry meaning
/// beyond identifying a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AreaRole {
    /// Transparent window onto the canvas-wide background.
    Backdrop,
    /// Primary photo region.
    Hero,
    /// Brand-color panel.
    Accent,
    /// Quiet panel (beige/paper) for headlines and copy.
    Neutral,
    /// Narrow panel carrying rotated text.
    VerticalText,
    /// Crest/logo slot.
    Logo,
}

/// A named grid-template layout plus the role of every area it defines.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    pub name: &'static str,
    pub template: &'static str,
    roles: &'static [(&'static str, AreaRole)],
}

impl Layout {
    pub fn role_for(&self, area: &str) -> Option<AreaRole> {
        self.roles
            .iter()
            .find(|(name, _)| *name == area)
            .map(|(_, role)| *role)
    }

    /// All `(area, role)` assignments, in definition order.
    pub fn roles(&self) -> impl Iterator<Item = (&'static str, AreaRole)> {
        self.roles.iter().copied()
    }

    /// Areas carrying a given role, in definition order.
    pub fn areas_with_role(&self, role: AreaRole) -> impl Iterator<Item = &'static str> {
        self.roles
            .iter()
            .filter(move |(_, r)| *r == role)
            .map(|(name, _)| *name)
    }
}

/// Built-in layouts. All are 6 rows x 4 columns and partition the full grid:
/// every cell belongs to exactly one named rectangular area.
pub const LAYOUTS: &[Layout] = &[
    Layout {
        name: "portrait-hero",
        template: "\
beige beige trans trans
hero hero trans trans
hero hero trans trans
hero hero blue vert
hero hero blue vert
logo plate blue vert",
        roles: &[
            ("beige", AreaRole::Neutral),
            ("hero", AreaRole::Hero),
            ("trans", AreaRole::Backdrop),
            ("blue", AreaRole::Accent),
            ("vert", AreaRole::VerticalText),
            ("logo", AreaRole::Logo),
            ("plate", AreaRole::Backdrop),
        ],
    },
    Layout {
        name: "banner-split",
        template: "\
hero hero hero hero
hero hero hero hero
hero hero hero hero
beige beige blue blue
beige beige blue blue
logo logo blue blue",
        roles: &[
            ("hero", AreaRole::Hero),
            ("beige", AreaRole::Neutral),
            ("blue", AreaRole::Accent),
            ("logo", AreaRole::Logo),
        ],
    },
    Layout {
        name: "sidebar-left",
        template: "\
vert beige beige beige
vert beige beige beige
vert hero hero hero
vert hero hero hero
vert hero hero hero
vert logo blue blue",
        roles: &[
            ("vert", AreaRole::VerticalText),
            ("beige", AreaRole::Neutral),
            ("hero", AreaRole::Hero),
            ("logo", AreaRole::Logo),
            ("blue", AreaRole::Accent),
        ],
    },
    Layout {
        name: "stacked-story",
        template: "\
trans trans trans trans
hero hero hero hero
hero hero hero hero
hero hero hero hero
blue blue beige beige
logo logo beige beige",
        roles: &[
            ("trans", AreaRole::Backdrop),
            ("hero", AreaRole::Hero),
            ("blue", AreaRole::Accent),
            ("beige", AreaRole::Neutral),
            ("logo", AreaRole::Logo),
        ],
    },
    Layout {
        name: "poster-column",
        template: "\
beige blue blue vert
hero hero hero vert
hero hero hero vert
hero hero hero vert
hero hero hero vert
logo trans trans vert",
        roles: &[
            ("beige", AreaRole::Neutral),
            ("blue", AreaRole::Accent),
            ("vert", AreaRole::VerticalText),
            ("hero", AreaRole::Hero),
            ("logo", AreaRole::Logo),
            ("trans", AreaRole::Backdrop),
        ],
    },
    Layout {
        name: "quad",
        template: "\
hero hero blue blue
hero hero blue blue
hero hero blue blue
beige beige duo duo
beige beige duo duo
logo logo duo duo",
        roles: &[
            ("hero", AreaRole::Hero),
            ("blue", AreaRole::Accent),
            ("beige", AreaRole::Neutral),
            ("duo", AreaRole::Hero),
            ("logo", AreaRole::Logo),
        ],
    },
];

/// Look up a layout by name; a miss is a hard configuration error.
pub fn layout_by_name(name: &str) -> TifoResult<&'static Layout> {
    LAYOUTS
        .iter()
        .find(|l| l.name == name)
        .ok_or_else(|| TifoError::catalog(format!("no layout named '{name}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grid::{GridResolver, GridSpec};

    #[test]
    fn every_builtin_layout_parses_and_partitions_the_canvas() {
        for layout in LAYOUTS {
            let grid = GridResolver::parse(
                layout.template,
                GridSpec::default(),
                1080.0,
                1080.0,
            )
            .unwrap_or_else(|e| panic!("layout '{}' failed to parse: {e}", layout.name));

            let covered: f64 = grid
                .areas()
                .map(|area| {
                    let b = grid.area_bounds(&area.name).unwrap();
                    b.width * b.height
                })
                .sum();
            assert_eq!(covered, 1080.0 * 1080.0, "layout '{}' leaves gaps", layout.name);
        }
    }

    #[test]
    fn every_area_has_a_role() {
        for layout in LAYOUTS {
            let grid = GridResolver::parse(
                layout.template,
                GridSpec::default(),
                1080.0,
                1080.0,
            )
            .unwrap();
            for area in grid.areas() {
                assert!(
                    layout.role_for(&area.name).is_some(),
                    "layout '{}' area '{}' has no role",
                    layout.name,
                    area.name
                );
            }
        }
    }

    #[test]
    fn portrait_hero_matches_reference_bounds() {
        let layout = layout_by_name("portrait-hero").unwrap();
        let grid =
            GridResolver::parse(layout.template, GridSpec::default(), 1080.0, 1080.0).unwrap();
        // hero spans rows 1-4, cols 0-1 of the 6x4 grid (270x180 cells).
        let hero = grid.area_bounds("hero").unwrap();
        assert_eq!(
            (hero.x, hero.y, hero.width, hero.height),
            (0.0, 180.0, 540.0, 720.0)
        );
    }

    #[test]
    fn unknown_layout_is_catalog_error() {
        assert!(matches!(
            layout_by_name("hexagon"),
            Err(TifoError::Catalog(_))
        ));
    }

    #[test]
    fn roles_iterate_in_definition_order() {
        let layout = layout_by_name("banner-split").unwrap();
        let heroes: Vec<_> = layout.areas_with_role(AreaRole::Hero).collect();
        assert_eq!(heroes, ["hero"]);
    }
}
