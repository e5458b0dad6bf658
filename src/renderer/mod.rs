//! Canvas-2D rendering
//!
//! The render side of the core/shell split: given the current game state,
//! draw the field, pylons, and craft. Reads the state, never mutates it;
//! HUD text lives in the DOM and is updated by the shell.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::{GameState, Phase};

const BACKGROUND: &str = "#0d1220";
const PYLON_FILL: &str = "#2f9e63";
const PYLON_LIP: &str = "#47c57f";
const CRAFT_FILL: &str = "#f2b64a";
const CRAFT_DOWNED: &str = "#e05252";
const BOUND_LINE: &str = "#273050";

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, canvas })
    }

    /// Scale from world units to canvas pixels
    fn scale(&self) -> f64 {
        self.canvas.width() as f64 / FIELD_WIDTH as f64
    }

    /// Draw one frame
    pub fn render(&self, state: &GameState) {
        let s = self.scale();
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;

        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        // Ceiling and floor
        self.ctx.set_fill_style_str(BOUND_LINE);
        self.ctx.fill_rect(0.0, 0.0, w, 2.0);
        self.ctx
            .fill_rect(0.0, FIELD_HEIGHT as f64 * s - 2.0, w, 2.0);

        for pylon in &state.pylons {
            let x = pylon.x as f64 * s;
            let width = PYLON_WIDTH as f64 * s;
            let gap_top = pylon.gap_top() as f64 * s;
            let gap_bottom = pylon.gap_bottom() as f64 * s;

            self.ctx.set_fill_style_str(PYLON_FILL);
            if gap_top > 0.0 {
                self.ctx.fill_rect(x, 0.0, width, gap_top);
            }
            let floor = FIELD_HEIGHT as f64 * s;
            if gap_bottom < floor {
                self.ctx.fill_rect(x, gap_bottom, width, floor - gap_bottom);
            }

            // Lip highlight on the gap edges
            self.ctx.set_fill_style_str(PYLON_LIP);
            if gap_top > 0.0 {
                self.ctx.fill_rect(x, gap_top - 6.0 * s, width, 6.0 * s);
            }
            if gap_bottom < floor {
                self.ctx.fill_rect(x, gap_bottom, width, 6.0 * s);
            }
        }

        let downed = matches!(state.phase, Phase::Over);
        self.ctx
            .set_fill_style_str(if downed { CRAFT_DOWNED } else { CRAFT_FILL });
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            CRAFT_X as f64 * s,
            state.craft.y as f64 * s,
            CRAFT_RADIUS as f64 * s,
            0.0,
            TAU,
        );
        self.ctx.fill();
    }
}
