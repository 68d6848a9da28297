use super::*;

fn frame(rgb: [u8; 3]) -> FrameRGBA {
    let mut data = Vec::new();
    for _ in 0..16 {
        data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    FrameRGBA {
        width: 4,
        height: 4,
        data,
        premultiplied: true,
    }
}

fn out_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ternvid_gif_{}", std::process::id()));
    dir.join(name)
}

#[test]
fn writes_a_decodable_looping_gif() {
    use image::AnimationDecoder as _;

    let path = out_path("three.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&path));
    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        fps: 5.0,
    })
    .unwrap();
    for (i, c) in [[255, 0, 0], [0, 255, 0], [0, 0, 255]].into_iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), &frame(c)).unwrap();
    }
    sink.end().unwrap();

    let file = std::io::BufReader::new(File::open(&path).unwrap());
    let decoder = image::codecs::gif::GifDecoder::new(file).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 200);
    let px = frames[1].buffer().get_pixel(0, 0);
    assert!(px[1] > 200 && px[0] < 50, "got {px:?}");
}

#[test]
fn out_of_order_frames_are_rejected() {
    let path = out_path("order.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&path));
    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        fps: 10.0,
    })
    .unwrap();
    sink.push_frame(FrameIndex(1), &frame([0, 0, 0])).unwrap();
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &frame([0, 0, 0])),
        Err(TernvidError::Encode(_))
    ));
}

#[test]
fn delay_follows_fps() {
    let (num, den) = frame_delay(10.0).numer_denom_ms();
    assert_eq!(num / den, 100);
}

#[test]
fn end_without_begin_fails() {
    let mut sink = GifSink::new(GifSinkOpts::new(out_path("never.gif")));
    assert!(sink.end().is_err());
}
