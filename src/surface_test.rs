use super::*;

fn disc(x: f64) -> DrawCmd {
    DrawCmd::Circle { center: Point::new(x, 0.0), radius: 1.0, fill: Some(Hsla::white()), stroke: None }
}

#[test]
fn recording_surface_logs_writes_in_order() {
    let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
    assert!(surface.clear().is_ok());
    assert!(surface.draw(&disc(1.0)).is_ok());
    assert!(surface.resize(Size::new(20.0, 5.0)).is_ok());
    assert_eq!(
        surface.writes(),
        vec![SurfaceWrite::Clear, SurfaceWrite::Draw(disc(1.0)), SurfaceWrite::Resize(Size::new(20.0, 5.0))]
    );
    assert_eq!(surface.size(), Size::new(20.0, 5.0));
}

#[test]
fn clones_share_the_log() {
    let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
    let spy = surface.clone();
    assert!(surface.draw(&disc(2.0)).is_ok());
    assert_eq!(spy.write_count(), 1);
    spy.reset();
    assert_eq!(surface.write_count(), 0);
}

#[test]
fn last_frame_starts_after_latest_clear() {
    let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
    assert!(surface.clear().is_ok());
    assert!(surface.draw(&disc(1.0)).is_ok());
    assert!(surface.clear().is_ok());
    assert!(surface.draw(&disc(2.0)).is_ok());
    assert!(surface.draw(&disc(3.0)).is_ok());
    assert_eq!(surface.last_frame(), vec![disc(2.0), disc(3.0)]);
}

#[test]
fn last_frame_without_clear_returns_everything() {
    let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
    assert!(surface.draw(&disc(1.0)).is_ok());
    assert_eq!(surface.last_frame().len(), 1);
}

#[test]
fn gradient_runs_along_css_angle() {
    use std::f64::consts::FRAC_PI_4;

    let gradient = LinearGradient::new(3.0 * FRAC_PI_4, Hsla::white(), Hsla::white());
    let (start, end) = gradient.endpoints(Point::new(0.0, 0.0), 10.0);
    let half = 10.0 * FRAC_PI_4.sin();
    assert!((start.x + half).abs() < 1e-9 && (start.y + half).abs() < 1e-9);
    assert!((end.x - half).abs() < 1e-9 && (end.y - half).abs() < 1e-9);

    let (top, bottom) = LinearGradient::new(std::f64::consts::PI, Hsla::white(), Hsla::white())
        .endpoints(Point::new(5.0, 5.0), 2.0);
    assert!((top.x - 5.0).abs() < 1e-9 && (top.y - 3.0).abs() < 1e-9);
    assert!((bottom.x - 5.0).abs() < 1e-9 && (bottom.y - 7.0).abs() < 1e-9);
}

#[test]
fn gradient_fade_scales_both_stops() {
    let gradient = LinearGradient::new(0.0, Hsla::white(), Hsla::white().with_alpha(0.5)).fade(0.5);
    assert_eq!((gradient.from.alpha, gradient.to.alpha), (0.5, 0.25));
}

#[test]
fn blend_maps_to_composite_keywords() {
    assert_eq!(Blend::default().composite_operation(), "source-over");
    assert_eq!(Blend::Difference.composite_operation(), "difference");
}
