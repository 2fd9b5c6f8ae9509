use wasm_bindgen::prelude::*;
use js_sys::{Object, Reflect};
use kolam::{KolamError, ParseError};

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

/// Stable string code of a core error, as seen by the front end.
pub fn code(e: &KolamError) -> &'static str {
    match e {
        KolamError::NonFinite { .. } => "non_finite",
        KolamError::ZeroLength => "zero_length",
        KolamError::UnknownPoint(_) => "invalid_id",
        KolamError::SelfLoop(_) => "self_loop",
        KolamError::ZeroLengthEdge { .. } => "zero_length_edge",
        KolamError::MissingEdge { .. } => "missing_edge",
        KolamError::DuplicateEdge { .. } => "duplicate_edge",
        KolamError::Invariant(_) => "invariant",
        KolamError::LimitExceeded { .. } => "limit_exceeded",
        KolamError::InvalidStyle(_) => "invalid_style",
        KolamError::Parse(_) => "parse",
    }
}

pub fn parse(e: &ParseError) -> JsValue {
    let d = new_obj();
    set_kv(&d, "offset", &JsValue::from_f64(e.offset as f64));
    err("parse", e.to_string(), Some(d.into()))
}

pub fn from_kolam(e: &KolamError) -> JsValue {
    match e {
        KolamError::Parse(p) => parse(p),
        KolamError::UnknownPoint(id) => invalid_id("pulli", *id),
        KolamError::LimitExceeded { what, max } => {
            let d = new_obj();
            set_kv(&d, "what", &JsValue::from_str(what));
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
            err(code(e), e.to_string(), Some(d.into()))
        }
        _ => err(code(e), e.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kolam::{ParseErrorKind, WorkItem, Turn};

    #[test]
    fn codes_are_stable() {
        assert_eq!(code(&KolamError::SelfLoop(3)), "self_loop");
        assert_eq!(code(&KolamError::UnknownPoint(3)), "invalid_id");
        assert_eq!(
            code(&KolamError::Invariant(WorkItem { from: 0, to: 1, turn: Turn::Left })),
            "invariant"
        );
        assert_eq!(
            code(&ParseError::new(4, ParseErrorKind::OddEdgeList).into()),
            "parse"
        );
    }
}
