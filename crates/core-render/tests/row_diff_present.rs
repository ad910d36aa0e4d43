use core_actions::AnimationDriver;
use core_events::CommandEvent;
use core_model::{Algorithm, LayoutRegion, ListGenerator, ListSpec, Viewport};
use core_render::{BoardView, Frame, Palette, RenderEngine, Rgb, Surface, TerminalSurface, compose};
use proptest::prelude::*;

fn driver(cols: u16, rows: u16) -> AnimationDriver {
    let spec = ListSpec {
        len: 50,
        min: 0,
        max: 100,
    };
    AnimationDriver::new(ListGenerator::seeded(spec, 21), Viewport::new(cols, rows))
}

fn draw(surface: &mut TerminalSurface<Vec<u8>>, d: &AnimationDriver) {
    compose(surface, &BoardView::from_driver(d), &Palette::default());
    surface.present().unwrap();
}

#[test]
fn unchanged_board_presents_nothing() {
    let d = driver(104, 40);
    let mut s = TerminalSurface::new(Vec::new(), Palette::default(), 104, 40);
    draw(&mut s, &d);
    assert!(s.last_report().full);
    assert_eq!(s.last_report().rows_repainted, 40);
    let bytes_after_first = s.writer().len();
    draw(&mut s, &d);
    assert_eq!(s.last_report().rows_repainted, 0);
    assert_eq!(s.last_report().rows_skipped, 40);
    // only the trailing color reset is written
    assert!(s.writer().len() - bytes_after_first < 16);
}

#[test]
fn single_step_leaves_help_rows_alone() {
    let mut d = driver(104, 40).with_algorithm(Algorithm::Selection);
    let mut s = TerminalSurface::new(Vec::new(), Palette::default(), 104, 40);
    draw(&mut s, &d);
    d.dispatch(CommandEvent::Start);
    draw(&mut s, &d);
    d.tick();
    draw(&mut s, &d);
    let r = s.last_report();
    assert!(!r.full);
    assert!(r.rows_repainted > 0);
    // title and both help lines are unchanged
    assert!(r.rows_skipped >= 3);
}

#[test]
fn resize_forces_full_frame() {
    let mut d = driver(104, 40);
    let mut s = TerminalSurface::new(Vec::new(), Palette::default(), 104, 40);
    draw(&mut s, &d);
    d.resize(Viewport::new(80, 30));
    s.resize(80, 30);
    draw(&mut s, &d);
    assert!(s.last_report().full);
    assert_eq!(s.last_report().rows_repainted, 30);
    assert_eq!(s.frame().width, 80);
    assert_eq!(s.engine().metrics_snapshot().resize_invalidations, 1);
}

#[test]
fn reset_with_forced_full_repaints_everything() {
    let mut d = driver(60, 20);
    let mut s = TerminalSurface::new(Vec::new(), Palette::default(), 60, 20);
    draw(&mut s, &d);
    let r = d.dispatch(CommandEvent::Reset);
    assert!(r.array_replaced);
    s.force_full();
    draw(&mut s, &d);
    assert!(s.last_report().full);
    assert_eq!(s.last_report().rows_repainted, 20);
}

#[test]
fn batching_keeps_commands_below_cells() {
    let d = driver(104, 40);
    let mut s = TerminalSurface::new(Vec::new(), Palette::default(), 104, 40);
    draw(&mut s, &d);
    let snap = s.engine().metrics_snapshot();
    assert_eq!(snap.cells_printed, 104 * 40);
    // two-column bars: at most one print per bar plus the margins
    assert!(snap.print_commands < snap.cells_printed / 2 + 40 * 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fill_rect_touches_only_clipped_area(
        w in 0u16..30, h in 0u16..20,
        x in 0u16..40, y in 0u16..30,
        rw in 0u16..50, rh in 0u16..50,
    ) {
        let mut f = Frame::new(w, h);
        let red = Rgb(255, 0, 0);
        f.fill_rect(LayoutRegion::new(x, y, rw, rh), red);
        for cy in 0..h {
            for cx in 0..w {
                let inside = cx >= x && cx < x.saturating_add(rw) && cy >= y && cy < y.saturating_add(rh);
                let bg = f.get(cx, cy).map(|c| c.bg);
                prop_assert_eq!(bg == Some(red), inside);
            }
        }
    }

    #[test]
    fn repeat_present_skips_every_row(values in proptest::collection::vec(-50i32..50, 0..80), cols in 1u16..120, rows in 1u16..50) {
        let mut frame = Frame::new(cols, rows);
        for (i, v) in values.iter().enumerate() {
            let x = (i as u16) % cols;
            let height = (v.unsigned_abs() as u16) % (rows + 1);
            frame.fill_rect(LayoutRegion::new(x, rows - height, 1, height), Rgb(v.unsigned_abs() as u8, 0, 0));
        }
        let mut eng = RenderEngine::new();
        let mut out = Vec::new();
        let first = eng.present(&frame, &Palette::default(), &mut out).unwrap();
        prop_assert_eq!(first.rows_repainted, rows);
        let second = eng.present(&frame, &Palette::default(), &mut out).unwrap();
        prop_assert_eq!(second.rows_repainted, 0);
    }
}
