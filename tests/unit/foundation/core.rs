use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_secs_to_frames_rounds_up_partial_frames() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(0.0), 0);
    assert_eq!(fps.secs_to_frames_ceil(0.3), 9);
    assert_eq!(fps.secs_to_frames_ceil(0.31), 10);
    assert!((fps.frames_to_secs(15) - 0.5).abs() < 1e-12);
}

#[test]
fn canvas_center_and_validation() {
    let canvas = Canvas {
        width: 200,
        height: 100,
    };
    assert_eq!(canvas.center(), Point::new(100.0, 50.0));
    assert!(canvas.validate().is_ok());
    assert!(
        Canvas {
            width: 0,
            height: 10
        }
        .validate()
        .is_err()
    );
}
