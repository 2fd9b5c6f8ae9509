use crate::Board;
use kolam::{Drawing, KnotworkStyle};
use serde::Serialize;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn style_from_js(style: JsValue) -> Result<KnotworkStyle, JsValue> {
    if style.is_undefined() || style.is_null() {
        return Ok(KnotworkStyle::default());
    }
    let s: KnotworkStyle = serde_wasm_bindgen::from_value(style)
        .map_err(|e| error::err("invalid_style", e.to_string(), None))?;
    s.validate().map_err(|e| error::from_kolam(&e))?;
    Ok(s)
}

// Plain JS objects rather than `Map`s for every serde map
fn to_js<T: Serialize>(v: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn drawing_for(board: &Board, style: JsValue) -> Result<Drawing, JsValue> {
    let style = style_from_js(style)?;
    board.inner.knotwork(&style).map_err(|e| {
        log::warn!("knotwork failed: {e}");
        error::from_kolam(&e)
    })
}

#[wasm_bindgen]
impl Board {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Board {
        crate::Board::rs_new()
    }

    // Pulli
    pub fn add_pulli(&mut self, x: f64, y: f64) -> Option<u32> {
        self.inner.add_pulli(x, y).ok()
    }
    pub fn add_pulli_res(&mut self, x: f64, y: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        match self.inner.add_pulli(x, y) {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::from_kolam(&e),
        }
    }
    pub fn remove_pulli(&mut self, id: u32) -> bool {
        self.inner.remove_pulli(id)
    }
    pub fn remove_pulli_at(&mut self, x: f64, y: f64) -> Option<u32> {
        self.inner.remove_pulli_at(x, y)
    }
    pub fn pick(&self, x: f64, y: f64) -> Option<u32> {
        self.inner.pick(x, y)
    }
    pub fn pulli_count(&self) -> u32 {
        self.inner.pulli_count() as u32
    }

    // Links
    pub fn add_link(&mut self, a: u32, b: u32) -> bool {
        self.inner.add_link(a, b).unwrap_or(false)
    }
    pub fn add_link_res(&mut self, a: u32, b: u32) -> JsValue {
        match self.inner.add_link(a, b) {
            Ok(added) => error::ok(JsValue::from_bool(added)),
            Err(e) => error::from_kolam(&e),
        }
    }
    pub fn remove_link(&mut self, a: u32, b: u32) -> bool {
        self.inner.remove_link(a, b)
    }
    pub fn link_count(&self) -> u32 {
        self.inner.link_count() as u32
    }
    /// Add-link tool click; returns the outcome as `{kind, ...}`.
    pub fn link_click(&mut self, x: f64, y: f64) -> JsValue {
        let outcome = self.inner.link_click(x, y);
        serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)
    }
    pub fn unlink_click(&mut self, x: f64, y: f64) -> JsValue {
        let outcome = self.inner.unlink_click(x, y);
        serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)
    }
    pub fn selected(&self) -> Option<u32> {
        self.inner.selected()
    }
    pub fn clear(&mut self) {
        self.inner.clear()
    }

    // Typed arrays getters
    pub fn get_pulli_data(&self) -> JsValue {
        let mut ids = Vec::with_capacity(self.inner.pulli_count());
        let mut pos = Vec::with_capacity(self.inner.pulli_count() * 2);
        for (id, p) in self.inner.pulli_iter() {
            ids.push(id);
            pos.push(p.x);
            pos.push(p.y);
        }
        let obj = crate::interop::new_obj();
        crate::interop::set_kv(&obj, "ids", &crate::interop::arr_u32(&ids).into());
        crate::interop::set_kv(&obj, "positions", &crate::interop::arr_f64(&pos).into());
        obj.into()
    }
    pub fn get_link_data(&self) -> JsValue {
        let endpoints: Vec<u32> = self.inner.links().iter().flat_map(|&(a, b)| [a, b]).collect();
        let obj = crate::interop::new_obj();
        crate::interop::set_kv(&obj, "endpoints", &crate::interop::arr_u32(&endpoints).into());
        obj.into()
    }

    // Save / load
    pub fn to_text(&self) -> Option<String> {
        self.inner.to_text().ok()
    }
    pub fn load_text_res(&mut self, s: &str) -> JsValue {
        match self.inner.load_text(s) {
            Ok(()) => error::ok(JsValue::from_f64(self.inner.pulli_count() as f64)),
            Err(e) => error::parse(&e),
        }
    }

    pub fn to_json(&self) -> JsValue {
        match self.inner.to_json_value() {
            Ok(v) => to_js(&v).unwrap_or(JsValue::NULL),
            Err(_) => JsValue::NULL,
        }
    }
    pub fn load_json_res(&mut self, v: JsValue) -> JsValue {
        let val = match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => val,
            Err(e) => return error::err("parse", e.to_string(), None),
        };
        match self.inner.load_json_value(val) {
            Ok(()) => error::ok(JsValue::from_f64(self.inner.pulli_count() as f64)),
            Err(e) => error::from_kolam(&e),
        }
    }

    // Knotwork
    /// Render with an optional style object; the value is the serialized
    /// drawing (markers, skeleton, arcs).
    pub fn knotwork_res(&self, style: JsValue) -> JsValue {
        let drawing = match drawing_for(self, style) {
            Ok(d) => d,
            Err(e) => return e,
        };
        match to_js(&drawing) {
            Ok(v) => error::ok(v),
            Err(e) => error::err("serialize", e.to_string(), None),
        }
    }
    pub fn knotwork_svg_res(&self, style: JsValue, stroke_width: f64, show_skeleton: bool) -> JsValue {
        if !stroke_width.is_finite() {
            return error::non_finite("stroke_width");
        }
        match drawing_for(self, style) {
            Ok(d) => error::ok(JsValue::from_str(&d.to_svg_document(stroke_width, show_skeleton))),
            Err(e) => e,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
