//! Integer line rasterization
//!
//! Endpoints are pixel coordinates. Vertical and horizontal lines are plain
//! spans; everything else goes through Bresenham, stepping along the major
//! axis and advancing the minor axis whenever the error term carries.
//!
//! Plotting can be limited to a window. The walk then starts at the first
//! major-axis step inside the window, so an edge that runs far off screen
//! costs no more than the pixels that could be visible.

/// Largest endpoint magnitude `rasterize_line_clipped` accepts
pub const MAX_COORD: i64 = 1 << 59;

/// Float endpoints are clipped to the frame grown by this many pixels on
/// every side before they are truncated to integers. Lines that stay
/// inside it are rasterized exactly.
pub const GUARD_BAND: f64 = (1u64 << 58) as f64;

/// Inclusive pixel rectangle that plotting is limited to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    x_min: i64,
    x_max: i64,
    y_min: i64,
    y_max: i64,
}

impl Window {
    const UNBOUNDED: Self = Self {
        x_min: i32::MIN as i64,
        x_max: i32::MAX as i64,
        y_min: i32::MIN as i64,
        y_max: i32::MAX as i64,
    };

    fn frame(width: u32, height: u32) -> Self {
        Self {
            x_min: 0,
            x_max: i64::from(width) - 1,
            y_min: 0,
            y_max: i64::from(height) - 1,
        }
    }
}

/// Plot every pixel of the line from (x1, y1) to (x2, y2), endpoints included.
///
/// The pixel set does not depend on endpoint order.
pub fn rasterize_line<F>(x1: i32, y1: i32, x2: i32, y2: i32, plot: F)
where
    F: FnMut(i32, i32),
{
    walk(x1.into(), y1.into(), x2.into(), y2.into(), Window::UNBOUNDED, plot);
}

/// Like `rasterize_line`, but only the pixels inside `0..width` x
/// `0..height` are plotted. Those pixels are the same ones the unclipped
/// line would plot there.
///
/// Endpoints may lie far outside the frame, up to `MAX_COORD`; a line with
/// an endpoint beyond that plots nothing.
pub fn rasterize_line_clipped<F>(x1: i64, y1: i64, x2: i64, y2: i64, width: u32, height: u32, plot: F)
where
    F: FnMut(i32, i32),
{
    if width == 0 || height == 0 {
        return;
    }
    if [x1, y1, x2, y2].iter().any(|v| v.unsigned_abs() > MAX_COORD.unsigned_abs()) {
        return;
    }
    walk(x1, y1, x2, y2, Window::frame(width, height), plot);
}

/// Number of pixels in the line between two points, visible or not
pub fn line_len(x1: i64, y1: i64, x2: i64, y2: i64) -> u64 {
    x1.abs_diff(x2).max(y1.abs_diff(y2)).saturating_add(1)
}

fn walk<F>(mut x1: i64, mut y1: i64, mut x2: i64, mut y2: i64, win: Window, mut plot: F)
where
    F: FnMut(i32, i32),
{

    if x1 == x2 {
        if (win.x_min..=win.x_max).contains(&x1) {
            for y in y1.min(y2).max(win.y_min)..=y1.max(y2).min(win.y_max) {
                plot(x1 as i32, y as i32);
            }
        }
        return;
    }
    if y1 == y2 {
        if (win.y_min..=win.y_max).contains(&y1) {
            for x in x1.min(x2).max(win.x_min)..=x1.max(x2).min(win.x_max) {
                plot(x as i32, y1 as i32);
            }
        }
        return;
    }

    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();

    if dx >= dy {
        // X-major: walk x left to right
        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }
        let fac = if y1 < y2 { 1 } else { -1 };
        let first = win.x_min.max(x1) - x1;
        let last = win.x_max.min(x2) - x1;
        step_major(first, last, dx, dy, |k, n| {
            let y = y1 + fac * n;
            if (win.y_min..=win.y_max).contains(&y) {
                plot((x1 + k) as i32, y as i32);
            }
        });
    } else {
        // Y-major: walk y top to bottom
        if y1 > y2 {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }
        let fac = if x1 < x2 { 1 } else { -1 };
        let first = win.y_min.max(y1) - y1;
        let last = win.y_max.min(y2) - y1;
        step_major(first, last, dy, dx, |k, n| {
            let x = x1 + fac * n;
            if (win.x_min..=win.x_max).contains(&x) {
                plot(x as i32, (y1 + k) as i32);
            }
        });
    }
}

/// Visit major-axis steps `first..=last` of a line `major` steps long that
/// rises `minor` steps in total, with `minor <= major`.
///
/// The minor offset at step k is `(2k * minor + major) / (2 * major)`,
/// rounded down. It is computed directly for `first` and carried from there
/// with the usual Bresenham error term.
fn step_major<F>(first: i64, last: i64, major: i64, minor: i64, mut visit: F)
where
    F: FnMut(i64, i64),
{
    if first > last {
        return;
    }
    let two_major = 2 * major;
    let two_minor = 2 * minor;
    let carry = two_major - two_minor;

    // 2 * first * minor passes i64 for lines thousands of frames long
    let start = 2 * i128::from(first) * i128::from(minor) + i128::from(major);
    let mut n = (start / i128::from(two_major)) as i64;
    let mut err = (start % i128::from(two_major)) as i64;

    for k in first..=last {
        visit(k, n);
        // err + two_minor >= two_major, without the sum
        if err >= carry {
            err -= carry;
            n += 1;
        } else {
            err += two_minor;
        }
    }
}

/// Cohen-Sutherland clip of a float segment against the frame grown by
/// `GUARD_BAND`, then truncation toward zero.
///
/// Endpoints already inside the band are truncated unchanged. Returns None
/// when the segment misses the band or has a non-finite coordinate.
pub fn clip_to_guard_band(
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    width: u32,
    height: u32,
) -> Option<[i64; 4]> {
    const INSIDE: u8 = 0;
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const BOTTOM: u8 = 4;
    const TOP: u8 = 8;
    // Converges in at most 4 rounds; the cap covers rounding at the edges
    const MAX_ITERATIONS: u32 = 16;

    if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
        return None;
    }

    let x_min = -GUARD_BAND;
    let y_min = -GUARD_BAND;
    let x_max = f64::from(width) + GUARD_BAND;
    let y_max = f64::from(height) + GUARD_BAND;

    let outcode = |x: f64, y: f64| -> u8 {
        let mut code = INSIDE;
        if x < x_min {
            code |= LEFT;
        } else if x > x_max {
            code |= RIGHT;
        }
        if y < y_min {
            code |= TOP;
        } else if y > y_max {
            code |= BOTTOM;
        }
        code
    };

    let (mut x1, mut y1) = (f64::from(x1), f64::from(y1));
    let (mut x2, mut y2) = (f64::from(x2), f64::from(y2));
    let mut code1 = outcode(x1, y1);
    let mut code2 = outcode(x2, y2);

    for _ in 0..MAX_ITERATIONS {
        if (code1 | code2) == INSIDE {
            return Some([x1 as i64, y1 as i64, x2 as i64, y2 as i64]);
        }
        if (code1 & code2) != 0 {
            return None;
        }

        let out = if code1 != INSIDE { code1 } else { code2 };
        let (x, y) = if out & TOP != 0 {
            (x1 + (x2 - x1) * (y_min - y1) / (y2 - y1), y_min)
        } else if out & BOTTOM != 0 {
            (x1 + (x2 - x1) * (y_max - y1) / (y2 - y1), y_max)
        } else if out & RIGHT != 0 {
            (x_max, y1 + (y2 - y1) * (x_max - x1) / (x2 - x1))
        } else {
            (x_min, y1 + (y2 - y1) * (x_min - x1) / (x2 - x1))
        };

        if out == code1 {
            x1 = x;
            y1 = y;
            code1 = outcode(x1, y1);
        } else {
            x2 = x;
            y2 = y;
            code2 = outcode(x2, y2);
        }
    }
    None
}

/// Collect the pixels of a line in plotting order
pub fn line_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
    let len = line_len(x1.into(), y1.into(), x2.into(), y2.into());
    let mut points = Vec::with_capacity(usize::try_from(len).unwrap_or(usize::MAX).min(1 << 16));
    rasterize_line(x1, y1, x2, y2, |x, y| points.push((x, y)));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn pixel_set(x1: i32, y1: i32, x2: i32, y2: i32) -> BTreeSet<(i32, i32)> {
        line_points(x1, y1, x2, y2).into_iter().collect()
    }

    #[test]
    fn test_diagonal_45_degrees() {
        assert_eq!(line_points(0, 0, 3, 3), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_single_point() {
        assert_eq!(line_points(4, 7, 4, 7), vec![(4, 7)]);
    }

    #[test]
    fn test_horizontal_either_direction() {
        let expected: BTreeSet<_> = (2..=6).map(|x| (x, 5)).collect();
        assert_eq!(pixel_set(2, 5, 6, 5), expected);
        assert_eq!(pixel_set(6, 5, 2, 5), expected);
    }

    #[test]
    fn test_vertical_either_direction() {
        let expected: BTreeSet<_> = (1..=4).map(|y| (3, y)).collect();
        assert_eq!(pixel_set(3, 1, 3, 4), expected);
        // Upward lines are drawn too, not skipped
        assert_eq!(pixel_set(3, 4, 3, 1), expected);
    }

    #[test]
    fn test_shallow_line_steps() {
        assert_eq!(
            line_points(0, 0, 5, 2),
            vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]
        );
    }

    #[test]
    fn test_steep_line_steps() {
        assert_eq!(
            line_points(0, 0, 2, 5),
            vec![(0, 0), (0, 1), (1, 2), (1, 3), (2, 4), (2, 5)]
        );
    }

    #[test]
    fn test_endpoint_order_does_not_matter() {
        let ends = [
            (0, 0, 7, 3),
            (0, 0, 3, 7),
            (-4, 9, 6, -2),
            (10, 1, -3, 5),
            (2, 2, 9, 9),
            (5, -5, -5, 5),
        ];
        for &(x1, y1, x2, y2) in &ends {
            assert_eq!(
                pixel_set(x1, y1, x2, y2),
                pixel_set(x2, y2, x1, y1),
                "asymmetric line ({},{})-({},{})",
                x1,
                y1,
                x2,
                y2
            );
        }
    }

    #[test]
    fn test_lines_are_connected_and_hit_both_ends() {
        for x2 in -6..=6 {
            for y2 in -6..=6 {
                let points = line_points(0, 0, x2, y2);
                let major = x2.abs().max(y2.abs());
                assert_eq!(points.len() as i32, major + 1, "to ({},{})", x2, y2);
                let set: BTreeSet<_> = points.iter().copied().collect();
                assert!(set.contains(&(0, 0)));
                assert!(set.contains(&(x2, y2)), "missed end ({},{})", x2, y2);

                let mut sorted = points.clone();
                sorted.sort_by_key(|&(x, y)| if x2.abs() >= y2.abs() { x } else { y });
                for pair in sorted.windows(2) {
                    let (ax, ay) = pair[0];
                    let (bx, by) = pair[1];
                    assert!(
                        (ax - bx).abs() <= 1 && (ay - by).abs() <= 1,
                        "gap between {:?} and {:?}",
                        pair[0],
                        pair[1]
                    );
                }
            }
        }
    }

    #[test]
    fn test_clipped_matches_unclipped_inside_window() {
        let (width, height) = (6, 5);
        for x1 in -8..=8 {
            for y1 in -8..=8 {
                for &(x2, y2) in &[(9, 2), (-7, 6), (3, -9), (0, 0), (4, 4), (8, -8)] {
                    let expected: Vec<_> = line_points(x1, y1, x2, y2)
                        .into_iter()
                        .filter(|&(x, y)| x >= 0 && x < 6 && y >= 0 && y < 5)
                        .collect();
                    let mut got = Vec::new();
                    rasterize_line_clipped(
                        x1.into(),
                        y1.into(),
                        x2.into(),
                        y2.into(),
                        width,
                        height,
                        |x, y| got.push((x, y)),
                    );
                    assert_eq!(got, expected, "({},{})-({},{})", x1, y1, x2, y2);
                }
            }
        }
    }

    #[test]
    fn test_clipped_walk_skips_off_screen_span() {
        let mut calls = 0;
        let mut rows = BTreeSet::new();
        rasterize_line_clipped(-400_000_000, 1, 400_000_000, 7, 64, 48, |_, y| {
            calls += 1;
            rows.insert(y);
        });
        assert_eq!(calls, 64);
        // Halfway along a 6-row rise: row 4 throughout
        assert_eq!(rows.into_iter().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_full_i32_span_does_not_overflow() {
        let points = line_points(i32::MIN, 0, i32::MIN + 3, 0);
        assert_eq!(points.len(), 4);

        let mut plotted = Vec::new();
        rasterize_line_clipped(
            i32::MIN.into(),
            i32::MIN.into(),
            i32::MAX.into(),
            i32::MAX.into(),
            16,
            16,
            |x, y| plotted.push((x, y)),
        );
        assert_eq!(plotted, (0..16).map(|i| (i, i)).collect::<Vec<_>>());

        let mut steep = 0;
        rasterize_line_clipped(-MAX_COORD, 3, MAX_COORD, 5, 8, 8, |_, _| steep += 1);
        assert_eq!(steep, 8);
    }

    #[test]
    fn test_clipped_rejects_out_of_range_and_empty_frames() {
        let mut calls = 0;
        rasterize_line_clipped(0, 0, MAX_COORD + 1, 0, 8, 8, |_, _| calls += 1);
        rasterize_line_clipped(i64::MIN, 0, 3, 3, 8, 8, |_, _| calls += 1);
        rasterize_line_clipped(0, 0, 5, 5, 0, 8, |_, _| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_line_len() {
        assert_eq!(line_len(0, 0, 0, 0), 1);
        assert_eq!(line_len(0, 0, 5, 2), 6);
        assert_eq!(line_len(i32::MIN.into(), 0, i32::MAX.into(), 0), 1 << 32);
        assert_eq!(line_len(i64::MIN, 0, i64::MAX, 0), u64::MAX);
    }

    #[test]
    fn test_guard_band_keeps_nearby_endpoints() {
        assert_eq!(
            clip_to_guard_band(1.7, 2.9, 10.2, -3.5, 64, 48),
            Some([1, 2, 10, -3])
        );
        assert_eq!(
            clip_to_guard_band(-1.6e9, -6.0e8, 32.0, 24.0, 64, 48),
            Some([-1_600_000_000, -600_000_000, 32, 24])
        );
    }

    #[test]
    fn test_guard_band_clips_far_endpoints() {
        let [x1, y1, x2, y2] = clip_to_guard_band(-1.0e30, 10.0, 1.0e30, 10.0, 64, 48).unwrap();
        assert_eq!((y1, y2), (10, 10));
        assert_eq!(x1, -(1 << 58));
        assert_eq!(x2, (1 << 58) + 64);

        // Both ends left of the band
        assert_eq!(clip_to_guard_band(-1.0e30, -5.0, -1.0e30, 5.0, 64, 48), None);
        assert_eq!(clip_to_guard_band(f32::NAN, 0.0, 1.0, 1.0, 64, 48), None);
        assert_eq!(clip_to_guard_band(0.0, 0.0, f32::INFINITY, 1.0, 64, 48), None);
    }
}
