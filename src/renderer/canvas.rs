//! Canvas 2D presenter for the browser
//!
//! Draws quads with `CanvasRenderingContext2d`, writes the HUD into DOM
//! elements, and plays cues through the Web Audio manager.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::{Appearance, Presenter, SoundId, colors, css_rgba, ndc_to_pixels};
use crate::audio::AudioManager;
use crate::sim::BlockSkin;

/// DOM ids of the HUD fields
const SCORE_ID: &str = "scoreDisplay";
const HEALTH_ID: &str = "healthDisplay";
const LEVEL_ID: &str = "levelDisplay";

pub struct CanvasPresenter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    document: Document,
    skins: HashMap<BlockSkin, HtmlImageElement>,
    shooter: Option<HtmlImageElement>,
    audio: AudioManager,
}

impl CanvasPresenter {
    /// Returns `None` if the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement, document: Document, audio: AudioManager) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let skins = BlockSkin::ALL
            .iter()
            .filter_map(|skin| {
                let img = load_image(&format!("{}.jpg", skin.texture_name()))?;
                Some((*skin, img))
            })
            .collect();

        Some(Self {
            canvas,
            ctx,
            document,
            skins,
            shooter: load_image("gun.jpeg"),
            audio,
        })
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn fill(&self, color: [f32; 4], rect: (f64, f64, f64, f64)) {
        self.ctx.set_fill_style_str(&css_rgba(color));
        self.ctx.fill_rect(rect.0, rect.1, rect.2, rect.3);
    }
}

/// Start loading an image; it draws as a placeholder until complete
fn load_image(src: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    img.set_src(src);
    Some(img)
}

fn is_ready(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}

impl Presenter for CanvasPresenter {
    fn begin_frame(&mut self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.fill(colors::BACKGROUND, (0.0, 0.0, w, h));
    }

    fn draw_entity(&mut self, appearance: Appearance, x: f32, y: f32, width: f32, height: f32) {
        let rect = ndc_to_pixels(
            x,
            y,
            width,
            height,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        let texture = match appearance {
            Appearance::Skin(skin) => self.skins.get(&skin),
            Appearance::Shooter => self.shooter.as_ref(),
            Appearance::Flat(color) => {
                self.fill(color, rect);
                return;
            }
        };

        match texture.filter(|img| is_ready(img)) {
            Some(img) => {
                let _ = self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        img, rect.0, rect.1, rect.2, rect.3,
                    );
            }
            None => self.fill(colors::PLACEHOLDER, rect),
        }
    }

    fn update_score_display(&mut self, score: u64) {
        self.set_text(SCORE_ID, &score.to_string());
    }

    fn update_health_display(&mut self, health: i32) {
        self.set_text(HEALTH_ID, &health.to_string());
    }

    fn update_level_display(&mut self, level: u8) {
        self.set_text(LEVEL_ID, &level.to_string());
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.audio.play(sound);
    }
}
