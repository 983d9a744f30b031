mod common;

use furniscan::{
  ClassificationResult, Detection, DetectionSet, PipelineError, Verdict, classify,
  classify_detections, classify_frame, classify_image,
  frame::Frame,
  input::ImageFileInputError,
  model::{Model, RecordedModelError},
};

use common::{recorded_model, write_corrupt_image, write_image};

#[test]
fn couch_tie_end_to_end() {
  let dir = tempfile::tempdir().unwrap();
  let image = write_image(dir.path(), "green_couch.png");
  let model = recorded_model(&[(
    "green_couch.png",
    &[("couch", 0.81), ("table", 0.81), ("chair", 0.40)],
  )]);

  let verdict = classify_image(&model, &image, "couch").unwrap();
  assert_eq!(
    verdict,
    Verdict::Classified(ClassificationResult {
      is_furniture: true,
      category: "couch".to_string(),
    })
  );
}

#[test]
fn category_is_reported_when_not_furniture() {
  let dir = tempfile::tempdir().unwrap();
  let image = write_image(dir.path(), "white_lamp.png");
  let model = recorded_model(&[("white_lamp.png", &[("lamp", 0.7), ("vase", 0.2)])]);

  let verdict = classify_image(&model, &image, "car").unwrap();
  assert!(!verdict.is_furniture());
  assert_eq!(verdict.category(), "lamp");
}

#[test]
fn nothing_detected_is_its_own_state() {
  let dir = tempfile::tempdir().unwrap();
  let image = write_image(dir.path(), "empty_room.png");
  let model = recorded_model(&[]);

  let verdict = classify_image(&model, &image, "couch").unwrap();
  assert_eq!(verdict, Verdict::NothingDetected);
  assert_eq!(verdict.category(), Verdict::NOTHING_CATEGORY);
}

#[test]
fn corrupt_image_is_a_typed_failure() {
  let dir = tempfile::tempdir().unwrap();
  let image = write_corrupt_image(dir.path(), "busted_couch.png");
  let model = recorded_model(&[("busted_couch.png", &[("couch", 0.9)])]);

  let result = classify_image(&model, &image, "couch");
  assert!(matches!(
    result,
    Err(PipelineError::ImageLoad(ImageFileInputError::ImageLoadError { .. }))
  ));
}

#[test]
fn missing_image_is_a_typed_failure() {
  let dir = tempfile::tempdir().unwrap();
  let model = recorded_model(&[]);

  let result = classify_image(&model, dir.path().join("nowhere.png"), "couch");
  assert!(matches!(
    result,
    Err(PipelineError::ImageLoad(ImageFileInputError::IoError { .. }))
  ));
}

/// 总是失败的检测器
struct BrokenModel;

impl Model for BrokenModel {
  type Input = Frame;
  type Output = DetectionSet;
  type Error = RecordedModelError;

  fn infer(&self, _input: &Frame) -> Result<DetectionSet, RecordedModelError> {
    Err(RecordedModelError::SchemeMismatch)
  }
}

#[test]
fn model_failure_is_not_an_image_failure() {
  let dir = tempfile::tempdir().unwrap();
  let image = write_image(dir.path(), "blue_couch.png");

  let result = classify_image(&BrokenModel, &image, "couch");
  assert!(matches!(result, Err(PipelineError::Model(_))));
}

#[test]
fn frames_can_be_classified_directly() {
  let model = recorded_model(&[("good_couch.jpg", &[("bed", 0.3), ("sofa", 0.6)])]);
  let frame = Frame::new("/photos/good_couch.jpg", image::RgbImage::new(2, 2));

  let verdict = classify_frame(&model, &frame, "sofa").unwrap();
  assert_eq!(verdict, Verdict::Classified(classify("sofa", "sofa")));
}

#[test]
fn classify_truth_table() {
  let cases = [
    ("couch", "couch", true),
    ("couch", "car", false),
    ("car", "couch", false),
    ("car", "car", false),
  ];

  for (top, choice, expected) in cases {
    let result = classify(top, choice);
    assert_eq!(result.is_furniture, expected, "{top}/{choice}");
    assert_eq!(result.category, top);
  }
}

#[test]
fn detections_are_compared_numerically() {
  let detections: DetectionSet = vec![
    Detection::new("chair", 0.812_345_678_9),
    Detection::new("desk", 0.812_345_679_0),
  ]
  .into();

  assert_eq!(classify_detections(&detections, "desk").category(), "desk");
}
