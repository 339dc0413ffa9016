//! Built-in icon designs
//!
//! Letter icons are laid out on a 32 unit grid; everything else uses the
//! 512 unit app icon space.

use crate::color::Color;
use crate::error::Result;
use crate::gradient::{Gradient, GradientStop};
use crate::scene::{Fill, RadialSpec, Scene, Shape};

/// App icon background blue
pub const BRAND_BLUE: Color = Color::rgb(0, 128, 255);

/// Near-black body of the starry sorcerer hat
pub const HAT_DARK: Color = Color::rgb(30, 30, 50);

const PURPLE: Color = Color::rgb(147, 51, 234);
const MAGENTA: Color = Color::rgb(192, 38, 211);
const AMBER: Color = Color::rgb(245, 158, 11);

const LETTER_GRID: f64 = 32.0;
const APP_SPACE: f64 = 512.0;

/// Default catalog entry
pub const DEFAULT_ICON: &str = "wand";

const NAMES: &[&str] = &[
    "letter-e-tray",
    "letter-e",
    "letter-h-tray",
    "letter-h",
    "letter-s",
    "sparkle-s",
    "wizard-hat",
    "sorcerer-hat",
    "sorcerer-hat-stars",
    "magic-wand",
    "wand",
];

/// All catalog names, in display order
pub fn names() -> &'static [&'static str] {
    NAMES
}

/// Look up a built-in scene by name
pub fn lookup(name: &str) -> anyhow::Result<Scene> {
    let scene = match name {
        "letter-e-tray" => letter_e(None, Color::BLACK),
        "letter-e" => letter_e(Some(BRAND_BLUE), Color::WHITE),
        "letter-h-tray" => letter_h(None, Color::BLACK),
        "letter-h" => letter_h(Some(BRAND_BLUE), Color::WHITE),
        "letter-s" => letter_s(),
        "sparkle-s" => sparkle_s(),
        "wizard-hat" => wizard_hat(),
        "sorcerer-hat" => sorcerer_hat(),
        "sorcerer-hat-stars" => sorcerer_hat_stars(),
        "magic-wand" => magic_wand(),
        "wand" => wand()?,
        _ => {
            return Err(anyhow::anyhow!(
                "Unknown icon: {}. Available icons: {}",
                name,
                NAMES.join(", ")
            ))
        }
    };
    Ok(scene.named(name))
}

fn solid(color: Color) -> Fill {
    Fill::Solid(color)
}

/// Add solid rects whose corners are inclusive pixel coordinates, so
/// `[6, 8, 9, 24]` covers 4 x 17 units
fn on_grid(scene: Scene, rects: &[[f64; 4]], color: Color) -> Scene {
    rects.iter().fold(scene, |scene, &[x0, y0, x1, y1]| {
        scene.with_shape(Shape::rect(x0, y0, x1 + 1.0, y1 + 1.0, solid(color)))
    })
}

fn letter_scene(background: Option<Color>) -> Scene {
    let scene = Scene::new(LETTER_GRID);
    match background {
        Some(color) => scene.with_background(color),
        None => scene,
    }
}

fn letter_e(background: Option<Color>, ink: Color) -> Scene {
    on_grid(
        letter_scene(background),
        &[
            [8.0, 8.0, 11.0, 24.0],
            [11.0, 8.0, 24.0, 11.0],
            [11.0, 15.0, 21.0, 18.0],
            [11.0, 21.0, 24.0, 24.0],
        ],
        ink,
    )
}

fn letter_h(background: Option<Color>, ink: Color) -> Scene {
    on_grid(
        letter_scene(background),
        &[
            [6.0, 8.0, 9.0, 24.0],
            [23.0, 8.0, 26.0, 24.0],
            [9.0, 15.0, 23.0, 18.0],
        ],
        ink,
    )
}

/// Block "S" strokes on the 32 unit grid
const S_STROKES: [[f64; 4]; 5] = [
    [9.0, 8.0, 24.0, 11.0],
    [6.0, 8.0, 9.0, 16.0],
    [9.0, 14.0, 23.0, 17.0],
    [23.0, 16.0, 26.0, 24.0],
    [6.0, 21.0, 23.0, 24.0],
];

fn letter_s() -> Scene {
    on_grid(letter_scene(Some(BRAND_BLUE)), &S_STROKES, Color::WHITE)
}

fn sparkle_s() -> Scene {
    // the sparkle is authored in app space, so lift the grid strokes there
    let lift = APP_SPACE / LETTER_GRID;
    let strokes: Vec<[f64; 4]> = S_STROKES
        .iter()
        .map(|r| [r[0] * lift, r[1] * lift, r[2] * lift, r[3] * lift])
        .collect();
    on_grid(
        Scene::new(APP_SPACE).with_background(BRAND_BLUE),
        &strokes,
        Color::WHITE,
    )
    .with_shape(Shape::star((420.0, 90.0), 45.0, 18.0, 4, 0.0, solid(Color::WHITE)))
}

fn wizard_hat() -> Scene {
    Scene::new(APP_SPACE)
        .with_background(BRAND_BLUE)
        .with_shape(Shape::polygon(
            &[(256.0, 40.0), (140.0, 340.0), (372.0, 340.0)],
            solid(Color::WHITE),
        ))
        .with_shape(Shape::ellipse(60.0, 310.0, 452.0, 420.0, solid(Color::WHITE)))
        // band where brim meets cone
        .with_shape(Shape::ellipse(150.0, 325.0, 362.0, 395.0, solid(BRAND_BLUE)))
}

fn sorcerer_body(scene: Scene, color: Color) -> Scene {
    scene
        .with_shape(Shape::polygon(
            &[(256.0, 30.0), (130.0, 440.0), (382.0, 440.0)],
            solid(color),
        ))
        .with_shape(Shape::ellipse(120.0, 380.0, 392.0, 480.0, solid(color)))
}

fn sorcerer_hat() -> Scene {
    sorcerer_body(Scene::new(APP_SPACE).with_background(BRAND_BLUE), Color::WHITE)
}

fn sorcerer_hat_stars() -> Scene {
    let stars = [
        (256.0, 120.0, 18.0, 8.0),
        (220.0, 260.0, 24.0, 10.0),
        (292.0, 260.0, 24.0, 10.0),
        (198.0, 395.0, 40.0, 18.0),
        (314.0, 395.0, 40.0, 18.0),
    ];
    // stars are punched out in the background color
    stars.iter().fold(
        sorcerer_body(Scene::new(APP_SPACE).with_background(BRAND_BLUE), HAT_DARK),
        |scene, &(cx, cy, outer, inner)| {
            scene.with_shape(Shape::star((cx, cy), outer, inner, 5, 90.0, solid(BRAND_BLUE)))
        },
    )
}

fn magic_wand() -> Scene {
    Scene::new(APP_SPACE)
        .with_background(BRAND_BLUE)
        .with_shape(Shape::polygon(
            &[(380.0, 420.0), (400.0, 400.0), (140.0, 100.0), (120.0, 120.0)],
            solid(Color::WHITE),
        ))
        .with_shape(Shape::star((110.0, 90.0), 50.0, 20.0, 4, 0.0, solid(Color::WHITE)))
}

/// Purple to magenta to amber, used by the wand sparkle
pub fn sparkle_gradient() -> Result<Gradient> {
    Gradient::new(vec![
        GradientStop::new(0.0, PURPLE),
        GradientStop::new(0.7, MAGENTA),
        GradientStop::new(1.0, AMBER),
    ])
}

fn wand() -> Result<Scene> {
    let scene = Scene::new(APP_SPACE)
        .with_shape(Shape::polygon(
            &[(52.0, 428.0), (87.0, 463.0), (328.0, 230.0), (293.0, 195.0)],
            solid(Color::BLACK),
        ))
        .with_shape(Shape::star(
            (370.0, 145.0),
            115.0,
            40.0,
            4,
            90.0,
            Fill::Radial(RadialSpec {
                stops: sparkle_gradient()?,
                center: None,
                outer_radius: Some(115.0),
            }),
        ));
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supersample::{DownsampleFilter, RenderConfig};

    fn exact() -> RenderConfig {
        RenderConfig::default().with_filter(DownsampleFilter::Box)
    }

    #[test]
    fn test_every_name_resolves() {
        for name in names() {
            let scene = lookup(name).unwrap_or_else(|err| panic!("{err}"));
            assert_eq!(scene.name.as_deref(), Some(*name));
            assert!(!scene.shapes.is_empty());
        }
        let err = lookup("no-such-icon").unwrap_err();
        assert!(err.to_string().contains("letter-e-tray"));
        assert!(names().contains(&DEFAULT_ICON));
    }

    #[test]
    fn test_every_scene_renders() {
        let config = RenderConfig::default();
        for name in names() {
            let scene = lookup(name).unwrap();
            let canvas = scene.render(32, &config).unwrap();
            assert_eq!((canvas.width(), canvas.height()), (32, 32), "{name}");
        }
    }

    #[test]
    fn test_sparkle_gradient_stops() {
        let gradient = sparkle_gradient().unwrap();
        assert_eq!(gradient.stops().len(), 3);
        assert_eq!(gradient.evaluate(0.0, 115.0), PURPLE);
        assert_eq!(gradient.evaluate(115.0, 115.0), AMBER);
    }

    #[test]
    fn test_tray_icons_are_transparent() {
        let scene = lookup("letter-e-tray").unwrap();
        let canvas = scene.render(32, &exact()).unwrap();
        assert_eq!(canvas.get(0, 0).map(|c| c.a), Some(0));
        // vertical bar of the E
        assert_eq!(canvas.get(9, 16), Some(Color::BLACK));
    }

    #[test]
    fn test_letter_e_and_tray_share_geometry() {
        let config = exact();
        let tray = lookup("letter-e-tray").unwrap().render(64, &config).unwrap();
        let app = lookup("letter-e").unwrap().render(64, &config).unwrap();
        for (x, y) in [(19, 32), (30, 19), (40, 45)] {
            let ink = tray.get(x, y).unwrap();
            assert_eq!(ink, Color::BLACK, "({x}, {y})");
            assert_eq!(app.get(x, y), Some(Color::WHITE), "({x}, {y})");
        }
    }

    #[test]
    fn test_grid_rects_are_inclusive() {
        // the H's left bar spans columns 6..=9 and rows 8..=24 at 32px
        let scene = lookup("letter-h-tray").unwrap();
        let canvas = scene.render(32, &exact()).unwrap();
        for (x, y) in [(6, 8), (9, 8), (6, 24), (9, 24)] {
            assert_eq!(canvas.get(x, y), Some(Color::BLACK), "({x}, {y})");
        }
        assert_eq!(canvas.get(5, 16).map(|c| c.a), Some(0));
        assert_eq!(canvas.get(10, 10).map(|c| c.a), Some(0));
        assert_eq!(canvas.get(6, 25).map(|c| c.a), Some(0));
    }
}
