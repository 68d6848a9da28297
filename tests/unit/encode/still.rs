use super::*;

#[test]
fn png_round_trips_through_the_image_crate() {
    let dir = std::env::temp_dir().join(format!("ternvid_still_{}", std::process::id()));
    let path = dir.join("nested").join("still.png");
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![10, 20, 30, 255, 0, 0, 0, 0],
        premultiplied: true,
    };
    write_png(&path, &frame).unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
    // Transparent pixels flatten to white.
    assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
}

#[test]
fn short_buffers_are_rejected() {
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 4],
        premultiplied: true,
    };
    let path = std::env::temp_dir().join("ternvid_never_written.png");
    assert!(matches!(
        write_png(&path, &frame),
        Err(TernvidError::Validation(_))
    ));
}
