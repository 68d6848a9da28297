use super::*;

#[test]
fn rates_print_without_trailing_fraction() {
    assert_eq!(format_rate(10.0), "10");
    assert_eq!(format_rate(12.5), "12.5");
}

#[test]
fn encoder_reads_raw_rgba_and_writes_h264() {
    let cfg = SinkConfig {
        width: 64,
        height: 48,
        fps: 7.5,
    };
    let args = encoder_args(&cfg, Path::new("out/video.mp4"));
    let args: Vec<String> = args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let after = |flag: &str| {
        let i = args.iter().position(|a| a == flag).unwrap();
        args[i + 1].clone()
    };
    assert_eq!(after("-s"), "64x48");
    assert_eq!(after("-r"), "7.5");
    assert_eq!(after("-f"), "rawvideo");
    assert_eq!(after("-c:v"), "libx264");
    assert!(args.windows(2).any(|w| w == ["-pix_fmt", "yuv420p"]));
    assert_eq!(args.last().map(String::as_str), Some("out/video.mp4"));
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let dir = std::env::temp_dir().join("ternvid_ffmpeg_odd");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(dir.join("out.mp4")));
    let res = sink.begin(SinkConfig {
        width: 15,
        height: 16,
        fps: 10.0,
    });
    assert!(matches!(res, Err(TernvidError::Validation(_))));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}
