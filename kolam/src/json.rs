use crate::geometry::limits;
use crate::{Graph, KolamError, ParseError, ParseErrorKind, Point};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const VERSION: u32 = 1;

pub fn to_json_impl(g: &Graph) -> Value {
    #[derive(Serialize)]
    struct GraphSer<'a> {
        version: u32,
        points: &'a [Point],
        edges: Vec<[u32; 2]>,
    }
    let ser = GraphSer {
        version: VERSION,
        points: g.points(),
        edges: g.edges().into_iter().map(|(a, b)| [a, b]).collect(),
    };
    serde_json::to_value(ser).unwrap_or(Value::Null)
}

fn doc_err(msg: impl Into<String>) -> KolamError {
    KolamError::Parse(ParseError::new(0, ParseErrorKind::Document(msg.into())))
}

pub fn from_json_impl(v: Value) -> Result<Graph, KolamError> {
    #[derive(Deserialize)]
    struct GraphDe {
        version: Option<u32>,
        points: Vec<Point>,
        #[serde(default)]
        edges: Vec<[u32; 2]>,
    }
    let de: GraphDe = serde_json::from_value(v).map_err(|e| doc_err(e.to_string()))?;
    if let Some(ver) = de.version {
        if ver != VERSION {
            return Err(doc_err(format!("unsupported version {ver}")));
        }
    }
    if de.points.len() > limits::MAX_POINTS || de.edges.len() > limits::MAX_EDGES {
        return Err(KolamError::Parse(ParseError::new(0, ParseErrorKind::TooLarge)));
    }
    // Indices refer to the document's list, which may repeat a point
    let mut g = Graph::new();
    let mut ids = Vec::with_capacity(de.points.len());
    for p in de.points {
        ids.push(g.add_point(p)?);
    }
    for [a, b] in de.edges {
        let ua = *ids.get(a as usize).ok_or(KolamError::UnknownPoint(a))?;
        let ub = *ids.get(b as usize).ok_or(KolamError::UnknownPoint(b))?;
        if g.has_edge(ua, ub) {
            return Err(KolamError::DuplicateEdge { a: ua, b: ub });
        }
        g.add_edge(ua, ub)?;
    }
    log::debug!("loaded {} points and {} edges from json", g.point_count(), g.edge_count());
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_shape() {
        let mut g = Graph::new();
        g.add_segment(Point::new(1.0, 0.0), Point::new(0.0, 0.5)).unwrap();
        let v = g.to_json_value();
        assert_eq!(
            v,
            json!({
                "version": 1,
                "points": [{"x": 1.0, "y": 0.0}, {"x": 0.0, "y": 0.5}],
                "edges": [[1, 0]],
            })
        );
        let back = Graph::from_json_value(v).unwrap();
        assert_eq!(back.points(), g.points());
        assert_eq!(back.edges(), g.edges());
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(matches!(
            Graph::from_json_value(json!({"points": "nope"})),
            Err(KolamError::Parse(_))
        ));
        assert!(matches!(
            Graph::from_json_value(json!({"version": 2, "points": []})),
            Err(KolamError::Parse(_))
        ));
        assert_eq!(
            Graph::from_json_value(json!({"points": [{"x": 0.0, "y": 0.0}], "edges": [[0, 3]]})).unwrap_err(),
            KolamError::UnknownPoint(3)
        );
        assert!(matches!(
            Graph::from_json_value(json!({
                "points": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 0.0}],
                "edges": [[0, 1], [1, 0]],
            })),
            Err(KolamError::DuplicateEdge { .. })
        ));
        assert!(matches!(
            Graph::from_json_value(json!({"points": [{"x": 0.0, "y": 0.0}], "edges": [[0, 0]]})),
            Err(KolamError::SelfLoop(0))
        ));
    }
}
