use retrofx::color::{Hsla, Hsva, Palette, Rgba};

fn assert_rgba_close(got: Rgba, want: Rgba) {
    let d = |a: u8, b: u8| (a as i16 - b as i16).abs();
    assert!(
        d(got.r, want.r) <= 1 && d(got.g, want.g) <= 1 && d(got.b, want.b) <= 1,
        "color mismatch: got {got:?}, want {want:?}"
    );
    assert_eq!(got.a, want.a, "alpha mismatch: got {got:?}, want {want:?}");
}

// ── conversions ─────────────────────────────────────────────────────────────

#[test]
fn hsla_primaries_convert_exactly() {
    assert_rgba_close(Hsla::new(0.0, 1.0, 0.5, 1.0).into(), Rgba::opaque(255, 0, 0));
    assert_rgba_close(Hsla::new(120.0, 1.0, 0.5, 1.0).into(), Rgba::opaque(0, 255, 0));
    assert_rgba_close(Hsla::new(240.0, 1.0, 0.5, 1.0).into(), Rgba::opaque(0, 0, 255));
}

#[test]
fn hsla_grays_ignore_hue() {
    for h in [0.0, 90.0, 123.0, 300.0] {
        assert_rgba_close(Hsla::new(h, 0.0, 0.5, 1.0).into(), Rgba::opaque(128, 128, 128));
    }
    assert_rgba_close(Hsla::new(45.0, 1.0, 0.0, 1.0).into(), Rgba::BLACK);
    assert_rgba_close(Hsla::new(45.0, 1.0, 1.0, 1.0).into(), Rgba::WHITE);
}

#[test]
fn hue_wraps_past_360() {
    let a: Rgba = Hsla::new(420.0, 1.0, 0.5, 1.0).into();
    let b: Rgba = Hsla::new(60.0, 1.0, 0.5, 1.0).into();
    assert_eq!(a, b, "hue 420 should equal hue 60");
}

#[test]
fn hsva_full_value_maps_to_half_lightness() {
    // A fully saturated, full-value HSV color is the same as HSL at l=0.5.
    let hsl: Hsla = Hsva::new(0.0, 1.0, 1.0, 1.0).into();
    assert!((hsl.s - 1.0).abs() < 1e-6, "saturation drifted: {}", hsl.s);
    assert!((hsl.l - 0.5).abs() < 1e-6, "lightness drifted: {}", hsl.l);
    assert_rgba_close(Hsva::new(0.0, 1.0, 1.0, 1.0).into(), Rgba::opaque(255, 0, 0));
}

#[test]
fn rgba_to_hsla_round_trips() {
    for c in [
        Rgba::opaque(255, 0, 0),
        Rgba::opaque(0, 128, 255),
        Rgba::opaque(40, 200, 90),
        Rgba::gray(77),
    ] {
        let back: Rgba = Hsla::from(c).into();
        assert_rgba_close(back, c);
    }
}

#[test]
fn alpha_is_preserved() {
    let c: Rgba = Hsla::new(200.0, 0.5, 0.5, 0.25).into();
    assert_eq!(c.a, 64);
}

// ── palette ─────────────────────────────────────────────────────────────────

#[test]
fn grayscale_palette_layout_matches_the_classic_ramp() {
    let p = Palette::grayscale();
    assert_eq!(p.color(0), Rgba::BLACK, "index 0 must be black");
    assert_eq!(p.color(255), Rgba::gray(0), "index 255 is the darkest ramp entry");
    assert_eq!(p.color(1), Rgba::gray(254), "index 1 is the brightest ramp entry");
    // Brightness rises as the index falls.
    for i in 1..255u8 {
        assert!(
            p.color(i).r > p.color(i + 1).r,
            "ramp not monotonic at index {i}"
        );
    }
}

#[test]
fn palette_set_overrides_one_entry() {
    let mut p = Palette::new();
    p.set(42, Rgba::opaque(1, 2, 3));
    assert_eq!(p.color(42), Rgba::opaque(1, 2, 3));
    assert_eq!(p.color(41), Rgba::BLACK);
}
