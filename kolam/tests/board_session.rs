//! A full editing session on the board, as the front end drives it.

use kolam::{Board, ClickOutcome, Interpolation, KnotworkStyle};

#[test]
fn sketch_render_save_reload() {
    let mut b = Board::new();
    // Square of pulli, screen coordinates
    let corners = [(100.0, 100.0), (200.0, 100.0), (200.0, 200.0), (100.0, 200.0)];
    for (x, y) in corners {
        b.add_pulli(x, y).unwrap();
    }
    for i in 0..4 {
        let (x0, y0) = corners[i];
        let (x1, y1) = corners[(i + 1) % 4];
        assert!(matches!(b.link_click(x0 + 3.0, y0 - 3.0), ClickOutcome::Selected { .. }));
        assert!(matches!(b.link_click(x1, y1), ClickOutcome::Linked { .. }));
    }
    assert_eq!(b.link_count(), 4);

    let style = KnotworkStyle { interpolation: Interpolation::Hermite, ..Default::default() };
    let drawing = b.knotwork(&style).unwrap();
    assert_eq!(drawing.arcs.len(), 16);
    // Math space: every sampled point lies below the x axis
    assert!(drawing.arcs.iter().flat_map(|a| &a.points).all(|p| p.y < 0.0));
    let svg = drawing.to_svg_document(2.0, false);
    assert_eq!(svg.matches("<path ").count(), 16);

    let saved = b.to_text().unwrap();
    let mut reloaded = Board::new();
    reloaded.load_text(&saved).unwrap();
    assert_eq!(reloaded.pulli_count(), 4);
    assert_eq!(reloaded.link_count(), 4);
    assert_eq!(reloaded.knotwork(&style).unwrap().arcs, drawing.arcs);
}

#[test]
fn erasing_a_corner_opens_the_loop() {
    let mut b = Board::new();
    let ids: Vec<u32> = [(0.0, 0.0), (60.0, 0.0), (60.0, 60.0)]
        .iter()
        .map(|&(x, y)| b.add_pulli(x, y).unwrap())
        .collect();
    b.add_link(ids[0], ids[1]).unwrap();
    b.add_link(ids[1], ids[2]).unwrap();
    b.add_link(ids[2], ids[0]).unwrap();
    assert_eq!(b.knotwork(&KnotworkStyle::default()).unwrap().arcs.len(), 12);

    assert_eq!(b.remove_pulli_at(58.0, 58.0), Some(ids[2]));
    assert_eq!(b.link_count(), 1);
    let d = b.knotwork(&KnotworkStyle::default()).unwrap();
    assert_eq!(d.arcs.len(), 4);
    assert_eq!(d.markers.len(), 2);

    b.clear();
    assert_eq!(b.pulli_count(), 0);
    assert!(b.knotwork(&KnotworkStyle::default()).unwrap().arcs.is_empty());
    assert_eq!(b.to_text().unwrap(), " - ");
}
