use retrofx::animation::{Effect, FrameCtx};
use retrofx::effects::Starfield;
use retrofx::gfx::PixelBuffer;

fn ctx(frame: u64, w: usize, h: usize) -> FrameCtx {
    FrameCtx {
        t: frame as f32 / 60.0,
        dt: 1.0 / 60.0,
        frame,
        w,
        h,
    }
}

#[test]
fn stars_fly_toward_the_viewer() {
    let mut field = Starfield::new(64);
    let before: Vec<f32> = field.stars().iter().map(|s| s.z).collect();

    field.update(&ctx(0, 96, 64));

    for (star, z0) in field.stars().iter().zip(before) {
        assert!(
            star.z < z0 || star.z > z0 + 100.0,
            "star neither advanced nor respawned: {z0} -> {}",
            star.z
        );
    }
}

#[test]
fn stars_respawn_at_the_far_plane() {
    let mut field = Starfield::new(256);

    // Enough ticks to force every star through the near plane at least once.
    for frame in 0..300u64 {
        field.update(&ctx(frame, 96, 64));
        for star in field.stars() {
            assert!(
                star.z >= 1.0 - 3.0 && star.z <= 400.0,
                "star escaped the depth range: z={}",
                star.z
            );
        }
    }

    // Speeds stay in the original 2..=3 range and never change.
    for star in field.stars() {
        assert!((2..=3).contains(&star.speed), "bad speed {}", star.speed);
    }
}

#[test]
fn star_count_is_fixed_after_init() {
    let mut field = Starfield::new(128);
    for frame in 0..500u64 {
        field.update(&ctx(frame, 96, 64));
        assert_eq!(field.stars().len(), 128);
    }
}

#[test]
fn render_clears_and_plots_within_bounds() {
    let mut field = Starfield::new(1024);
    let mut fb = PixelBuffer::new(96, 64);

    // Pre-dirty the buffer with a color no grayscale star can produce;
    // render must own every byte.
    fb.fill(retrofx::color::Rgba::opaque(9, 8, 7));

    field.update(&ctx(0, 96, 64));
    field.render(&ctx(0, 96, 64), &mut fb);

    let mut lit = 0usize;
    for px in fb.as_bytes().chunks_exact(4) {
        if px[0] == 9 && px[1] == 8 && px[2] == 7 {
            panic!("render left stale background pixels behind");
        }
        if px[0] > 0 {
            lit += 1;
            assert_eq!(px[0], px[1], "starfield pixels must be grayscale");
            assert_eq!(px[1], px[2], "starfield pixels must be grayscale");
        }
    }
    assert!(lit > 0, "no stars were plotted");
    // Plotting happens through bounds-checked set_pixel, so simply reaching
    // this point on a 1024-star field exercises the clipping path.
}

#[test]
fn small_buffers_are_safe() {
    let mut field = Starfield::new(512);
    let mut fb = PixelBuffer::new(2, 2);
    for frame in 0..50u64 {
        field.update(&ctx(frame, 2, 2));
        field.render(&ctx(frame, 2, 2), &mut fb);
    }
}
