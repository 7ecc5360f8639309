//! Behaviour of the canvas through its public API.

use rstest::rstest;

use drawing_shell::{Borders, Canvas, Connectivity, DrawError};

// ==================== Helpers ====================

/// Canvas whose pixels are given by `picture`; spaces stay background
fn canvas_from(picture: &[&str]) -> Canvas {
    let width = picture[0].chars().count() as i32;
    let mut canvas = Canvas::new(width, picture.len() as i32).unwrap();
    for (y, row) in picture.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            if ch != ' ' {
                let (x, y) = (x as i32 + 1, y as i32 + 1);
                canvas.draw_line(x, y, x, y, Some(ch)).unwrap();
            }
        }
    }
    canvas
}

/// Rendered rows without the borders
fn interior(canvas: &Canvas) -> Vec<String> {
    let text = canvas.render_to_string(Borders::default()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    lines[1..lines.len() - 1]
        .iter()
        .map(|line| line[1..line.len() - 1].to_string())
        .collect()
}

fn assert_exclusive(canvas: &Canvas) {
    for y in 1..=canvas.height() {
        for x in 1..=canvas.width() {
            assert_eq!(canvas.owners(x, y).len(), 1, "pixel ({x}, {y})");
        }
    }
}

/// Small deterministic generator for operation sequences
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) % bound
    }

    fn coordinate(&mut self, limit: i32) -> i32 {
        self.next(limit as u64 + 6) as i32 - 3
    }
}

// ==================== Scenarios ====================

#[test]
fn test_rectangle_round_trip() {
    let mut canvas = Canvas::new(3, 3).unwrap();
    canvas.draw_rectangle(1, -6, 3, 2, None).unwrap();
    assert_eq!(
        canvas.render_to_string(Borders::default()).unwrap(),
        "-----\n|x x|\n|xxx|\n|   |\n-----\n"
    );

    canvas.fill(2, 1, '*', Connectivity::Four).unwrap();
    assert_eq!(interior(&canvas), vec!["x*x", "xxx", "   "]);
}

#[test]
fn test_boundary_clipping() {
    let mut canvas = Canvas::new(3, 3).unwrap();
    canvas.draw_line(2, 2, 10, 2, None).unwrap();
    assert_eq!(interior(&canvas), vec!["   ", " xx", "   "]);
}

#[test]
fn test_out_of_range_geometry_is_ignored() {
    let mut canvas = Canvas::new(3, 3).unwrap();
    canvas.draw_line(-5, 1, 0, 1, Some('#')).unwrap();
    canvas.draw_line(1, 4, 3, 4, Some('#')).unwrap();
    canvas.draw_rectangle(5, 5, 9, 9, Some('#')).unwrap();
    canvas.fill(0, 0, '#', Connectivity::Four).unwrap();
    canvas.fill(4, 1, '#', Connectivity::Eight).unwrap();
    assert_eq!(interior(&canvas), vec!["   "; 3]);
}

#[test]
fn test_allocation_failure_then_recover() {
    let err = Canvas::new(i32::MAX, i32::MAX).unwrap_err();
    assert!(matches!(err, DrawError::AllocationFailed { .. }));
    assert!(err.is_recoverable());

    let mut canvas = Canvas::new(3, 3).unwrap();
    canvas.fill(2, 2, ':', Connectivity::Four).unwrap();
    assert_eq!(
        canvas.render_to_string(Borders::default()).unwrap(),
        "-----\n|:::|\n|:::|\n|:::|\n-----\n"
    );
}

#[test]
fn test_eight_way_fill_through_corners() {
    let mut canvas = Canvas::new(9, 2).unwrap();
    canvas.draw_line(1, 1, 1, 1, None).unwrap();
    canvas.draw_line(2, 2, 2, 2, None).unwrap();
    canvas.draw_line(3, 1, 5, 1, None).unwrap();
    canvas.draw_line(6, 2, 9, 2, None).unwrap();

    let mut four = canvas.clone();
    four.fill(1, 2, '@', Connectivity::Four).unwrap();
    assert_eq!(interior(&four), vec!["x xxx    ", "@x   xxxx"]);

    canvas.fill(1, 2, '@', Connectivity::Eight).unwrap();
    assert_eq!(interior(&canvas), vec!["x@xxx@@@@", "@x@@@xxxx"]);
}

#[test]
fn test_fill_large_canvas_around_point() {
    let mut canvas = Canvas::new(2000, 2000).unwrap();
    canvas.draw_line(2, 2, 2, 2, None).unwrap();
    canvas.fill(1, 1, '@', Connectivity::Four).unwrap();

    assert_eq!(canvas.color_at(2, 2), Some('x'));
    assert_eq!(canvas.color_at(1, 1), Some('@'));
    assert_eq!(canvas.color_at(2000, 2000), Some('@'));
    assert_eq!(canvas.colors().collect::<Vec<_>>(), vec!['@', 'x']);
}

#[test]
fn test_huge_sparse_canvas() {
    let mut canvas = Canvas::new(i32::MAX, 1000).unwrap();
    canvas.draw_line(1_000_000, 1, 1_000_000, 1000, Some('|')).unwrap();
    canvas.fill(1, 500, '<', Connectivity::Four).unwrap();

    assert_eq!(canvas.color_at(999_999, 1000), Some('<'));
    assert_eq!(canvas.color_at(1_000_000, 1), Some('|'));
    assert_eq!(canvas.color_at(1_000_001, 1), Some(' '));
    assert_eq!(canvas.color_at(i32::MAX, 1000), Some(' '));
}

#[test]
fn test_fill_wide_checkerboard() {
    // Two rows of single-pixel runs joined only through their corners
    let width = 100_000;
    let mut canvas = Canvas::new(width, 2).unwrap();
    for x in (1..=width).rev() {
        let y = if x % 2 == 1 { 1 } else { 2 };
        canvas.draw_line(x, y, x, y, Some('#')).unwrap();
    }

    canvas.fill(1, 1, '@', Connectivity::Eight).unwrap();

    let rows = interior(&canvas);
    let filled: usize = rows.iter().map(|row| row.matches('@').count()).sum();
    assert_eq!(filled, width as usize);
    assert_eq!(canvas.color_at(width, 2), Some('@'));
    assert_eq!(canvas.color_at(2, 1), Some(' '));
    assert_eq!(canvas.colors().collect::<Vec<_>>(), vec![' ', '@']);
}

// ==================== Properties ====================

#[rstest]
#[case(1, 2, 3, 2)]
#[case(2, 1, 2, 3)]
#[case(i32::MIN, 2, i32::MAX, 2)]
#[case(2, i32::MIN, 2, i32::MAX)]
#[case(i32::MAX, 1, i32::MAX, 3)]
#[case(-5, 1, 0, 1)]
#[case(2, 2, 2, 2)]
fn test_line_endpoints_commute(#[case] x1: i32, #[case] y1: i32, #[case] x2: i32, #[case] y2: i32) {
    let mut forward = Canvas::new(4, 3).unwrap();
    forward.draw_line(x1, y1, x2, y2, Some('o')).unwrap();
    let mut backward = Canvas::new(4, 3).unwrap();
    backward.draw_line(x2, y2, x1, y1, Some('o')).unwrap();

    assert_eq!(interior(&forward), interior(&backward));
}

#[rstest]
#[case::line(false)]
#[case::rectangle(true)]
fn test_drawing_twice_is_idempotent(#[case] rectangle: bool) {
    let draw = |canvas: &mut Canvas| {
        if rectangle {
            canvas.draw_rectangle(2, 1, 4, 3, Some('#')).unwrap();
        } else {
            canvas.draw_line(1, 2, 5, 2, Some('#')).unwrap();
        }
    };

    let mut once = Canvas::new(5, 4).unwrap();
    draw(&mut once);
    let mut twice = once.clone();
    draw(&mut twice);

    assert_eq!(interior(&once), interior(&twice));
    let colors = |canvas: &Canvas| canvas.colors().collect::<Vec<_>>();
    assert_eq!(colors(&once), colors(&twice));
}

#[rstest]
#[case(Connectivity::Four)]
#[case(Connectivity::Eight)]
fn test_fill_with_current_color_is_noop(#[case] connectivity: Connectivity) {
    let mut canvas = canvas_from(&["ab ", " b ", "  a"]);
    let before = interior(&canvas);
    canvas.fill(2, 2, 'b', connectivity).unwrap();
    canvas.fill(3, 1, ' ', connectivity).unwrap();
    assert_eq!(interior(&canvas), before);
}

#[test]
fn test_degenerate_shapes_are_points() {
    let mut canvas = Canvas::new(3, 3).unwrap();
    canvas.draw_line(2, 2, 2, 2, Some('.')).unwrap();
    assert_eq!(interior(&canvas), vec!["   ", " . ", "   "]);

    let mut canvas = Canvas::new(3, 3).unwrap();
    canvas.draw_rectangle(3, 1, 3, 1, Some('.')).unwrap();
    assert_eq!(interior(&canvas), vec!["  .", "   ", "   "]);
}

#[rstest]
#[case(Connectivity::Four, 1)]
#[case(Connectivity::Eight, 18)]
fn test_checkerboard_connectivity(#[case] connectivity: Connectivity, #[case] expected: usize) {
    let mut canvas = Canvas::new(6, 6).unwrap();
    for y in 1..=6 {
        for x in 1..=6 {
            if (x + y) % 2 == 0 {
                canvas.draw_line(x, y, x, y, Some('#')).unwrap();
            }
        }
    }

    canvas.fill(3, 3, '@', connectivity).unwrap();

    let changed = interior(&canvas).concat().chars().filter(|&c| c == '@').count();
    assert_eq!(changed, expected);
    assert_eq!(canvas.color_at(3, 3), Some('@'));
    assert_exclusive(&canvas);
}

#[test]
fn test_exclusive_ownership_under_random_operations() {
    let colors = ['a', 'b', 'c', ' '];
    let mut rng = Lcg(7);
    let mut canvas = Canvas::new(12, 9).unwrap();

    for _ in 0..300 {
        let color = colors[rng.next(colors.len() as u64) as usize];
        match rng.next(3) {
            0 => {
                let (x, y) = (rng.coordinate(12), rng.coordinate(9));
                let result = if rng.next(2) == 0 {
                    canvas.draw_line(x, y, rng.coordinate(12), y, Some(color))
                } else {
                    canvas.draw_line(x, y, x, rng.coordinate(9), Some(color))
                };
                result.unwrap();
            }
            1 => canvas
                .draw_rectangle(
                    rng.coordinate(12),
                    rng.coordinate(9),
                    rng.coordinate(12),
                    rng.coordinate(9),
                    Some(color),
                )
                .unwrap(),
            _ => {
                let connectivity = if rng.next(2) == 0 {
                    Connectivity::Four
                } else {
                    Connectivity::Eight
                };
                canvas
                    .fill(rng.coordinate(12), rng.coordinate(9), color, connectivity)
                    .unwrap();
            }
        }
        assert_exclusive(&canvas);
    }
}

// ==================== Mazes ====================

#[test]
fn test_fill_follows_serpentine_corridor() {
    let mut canvas = canvas_from(&[
        " #####",
        "     #",
        "#### #",
        "     #",
        " #####",
    ]);
    canvas.fill(1, 5, '.', Connectivity::Four).unwrap();
    assert_eq!(
        interior(&canvas),
        vec![".#####", ".....#", "####.#", ".....#", ".#####"]
    );
}

#[rstest]
#[case(Connectivity::Four)]
#[case(Connectivity::Eight)]
fn test_fill_stops_at_closed_outline(#[case] connectivity: Connectivity) {
    let mut canvas = Canvas::new(7, 5).unwrap();
    canvas.draw_rectangle(2, 2, 6, 4, Some('#')).unwrap();

    canvas.fill(1, 1, 'o', connectivity).unwrap();
    assert_eq!(
        interior(&canvas),
        vec!["ooooooo", "o#####o", "o#   #o", "o#####o", "ooooooo"]
    );

    canvas.fill(4, 3, 'i', connectivity).unwrap();
    assert_eq!(interior(&canvas)[2], "o#iii#o");
    assert!(!canvas.colors().any(|c| c == ' '));
}

#[test]
fn test_diagonal_corridor() {
    let picture = ["#    ", " #   ", "  #  ", "   # ", "    #"];

    // The wall itself is only connected through corners
    let mut canvas = canvas_from(&picture);
    canvas.fill(1, 1, '@', Connectivity::Four).unwrap();
    assert_eq!(interior(&canvas)[1], " #   ");
    canvas.fill(1, 1, '#', Connectivity::Four).unwrap();
    canvas.fill(1, 1, '@', Connectivity::Eight).unwrap();
    assert_eq!(
        interior(&canvas),
        vec!["@    ", " @   ", "  @  ", "   @ ", "    @"]
    );

    // Blank cells on both sides of the wall touch at its corners
    let mut canvas = canvas_from(&picture);
    canvas.fill(2, 1, '.', Connectivity::Four).unwrap();
    assert_eq!(
        interior(&canvas),
        vec!["#....", " #...", "  #..", "   #.", "    #"]
    );

    let mut canvas = canvas_from(&picture);
    canvas.fill(2, 1, '.', Connectivity::Eight).unwrap();
    assert_eq!(
        interior(&canvas),
        vec!["#....", ".#...", "..#..", "...#.", "....#"]
    );
}

#[test]
fn test_non_axis_aligned_line_is_rejected_whole() {
    let mut canvas = Canvas::new(4, 4).unwrap();
    let err = canvas.draw_line(1, 1, 4, 4, Some('#')).unwrap_err();
    assert!(matches!(err, DrawError::UnsupportedLine { .. }));
    assert_eq!(interior(&canvas), vec!["    "; 4]);
}
