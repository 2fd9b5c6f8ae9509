use crate::model::Point;
use crate::Drawing;

// Drawings live in Y-up math space; SVG is Y-down
fn flip(p: Point) -> Point {
    Point::new(p.x, -p.y)
}

pub fn to_svg_paths_impl(d: &Drawing) -> Vec<String> {
    let mut paths = Vec::with_capacity(d.arcs.len());
    for arc in d.arcs.iter() {
        let c = arc.curve.to_bezier();
        let (p0, p1, p2, p3) = (flip(c.p0), flip(c.p1), flip(c.p2), flip(c.p3));
        paths.push(format!(
            "M {} {} C {} {}, {} {}, {} {}",
            p0.x, p0.y, p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
        ));
    }
    paths
}

pub fn to_svg_document_impl(d: &Drawing, stroke_width: f64, show_skeleton: bool) -> String {
    let pad = stroke_width.max(0.0) * 2.0 + 1.0;
    let (x, y, w, h) = match d.bounds() {
        Some((lo, hi)) => (lo.x - pad, -hi.y - pad, hi.x - lo.x + 2.0 * pad, hi.y - lo.y + 2.0 * pad),
        None => (0.0, 0.0, 1.0, 1.0),
    };
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n",
        x, y, w, h
    );
    if show_skeleton {
        for s in d.skeleton.iter() {
            let (a, b) = (flip(s.a), flip(s.b));
            out.push_str(&format!(
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"grey\" stroke-width=\"{}\"/>\n",
                a.x, a.y, b.x, b.y, stroke_width / 2.0
            ));
        }
    }
    for (arc, path) in d.arcs.iter().zip(to_svg_paths_impl(d)) {
        out.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\"/>\n",
            path,
            arc.color.to_hex(),
            stroke_width
        ));
    }
    for m in d.markers.iter() {
        let m = flip(*m);
        out.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"black\"/>\n",
            m.x, m.y, stroke_width
        ));
    }
    out.push_str("</svg>\n");
    out
}
