//! Fixed canvas draw script.
//!
//! The op sequence, coordinates, colors and text must stay byte-identical:
//! hashes already stored in the registry were produced from this exact
//! drawing.

use serde::Serialize;

/// Text drawn by the probe.
pub const CANVAS_PROBE_TEXT: &str = "RxStation canvas probe <canvas> 1.0";

const CANVAS_WIDTH: u32 = 240;
const CANVAS_HEIGHT: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    TextBaseline { value: &'static str },
    Font { value: &'static str },
    FillStyle { value: &'static str },
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    FillText { text: &'static str, x: f64, y: f64 },
}

/// Canvas size plus the ordered draw operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasScript {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

impl CanvasScript {
    /// The probe drawing.
    pub fn probe() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            ops: vec![
                DrawOp::TextBaseline { value: "top" },
                DrawOp::Font { value: "14px 'Arial'" },
                DrawOp::TextBaseline { value: "alphabetic" },
                DrawOp::FillStyle { value: "#f60" },
                DrawOp::FillRect { x: 125.0, y: 1.0, width: 62.0, height: 20.0 },
                DrawOp::FillStyle { value: "#069" },
                DrawOp::FillText { text: CANVAS_PROBE_TEXT, x: 2.0, y: 15.0 },
                DrawOp::FillStyle { value: "rgba(102, 204, 0, 0.7)" },
                DrawOp::FillText { text: CANVAS_PROBE_TEXT, x: 4.0, y: 17.0 },
            ],
        }
    }
}
