//! Edge case and error handling tests
//!
//! Every fatal error kind, zero-area inputs, and the glow fallback.

use image::Rgba;
use portrait_card::{
    decode_image, encode_png, CardError, CardPipeline, FeatherBottomEdgeExt, FeatherConfig,
    GlowConfig, GlowSynthesizer, HaloSynthesisError, Image, PipelineConfig, RemoveBackgroundExt,
    ResizeInsideExt, SegmentationConfig, TemplateConfig, TemplateSet, TrimAlphaExt,
    MAX_BLUR_RADIUS,
};

fn solid_templates() -> TemplateSet {
    TemplateSet::from_images([("only.png", Image::from_pixel(100, 150, Rgba([0, 0, 0, 255])))])
}

#[test]
fn glow_on_zero_width_buffer_returns_input() {
    let subject: Image<Rgba<u8>> = Image::new(0, 32);
    let outcome = GlowSynthesizer::default().synthesize(subject.clone());
    assert!(outcome.is_degraded());
    assert_eq!(outcome.into_image(), subject);
}

#[test]
fn glow_on_zero_height_buffer_returns_input() {
    let subject: Image<Rgba<u8>> = Image::new(32, 0);
    let outcome = GlowSynthesizer::default().synthesize(subject.clone());
    assert_eq!(
        outcome.degradation(),
        Some(&HaloSynthesisError::EmptyImage {
            width: 32,
            height: 0
        })
    );
}

#[test]
fn oversized_glow_radius_degrades() {
    let config = GlowConfig {
        radius_fraction: 1.0,
        ..GlowConfig::default()
    };
    let size = MAX_BLUR_RADIUS + 1;
    let subject: Image<Rgba<u8>> = Image::from_pixel(size, size, Rgba([0, 0, 0, 255]));
    let outcome = GlowSynthesizer::new(config).synthesize(subject);
    assert!(matches!(
        outcome.degradation(),
        Some(HaloSynthesisError::RadiusOutOfRange { radius, max })
            if *radius == MAX_BLUR_RADIUS + 1 && *max == MAX_BLUR_RADIUS
    ));
}

#[test]
fn invalid_amplification_degrades_instead_of_failing() {
    let config = GlowConfig {
        amplification: f32::NAN,
        ..GlowConfig::default()
    };
    let subject: Image<Rgba<u8>> = Image::from_pixel(50, 50, Rgba([0, 0, 0, 255]));
    let outcome = GlowSynthesizer::new(config).synthesize(subject.clone());
    assert!(matches!(
        outcome.degradation(),
        Some(HaloSynthesisError::InvalidAmplification(_))
    ));
    assert_eq!(outcome.image(), &subject);
}

#[test]
fn zero_area_stages_report_their_name() {
    let empty: Image<Rgba<u8>> = Image::new(0, 0);

    let err = empty
        .clone()
        .remove_background(&SegmentationConfig::default())
        .unwrap_err();
    assert!(matches!(err, CardError::InvalidDimensions { stage: "segment", .. }));

    let err = empty
        .clone()
        .feather_bottom_edge(&FeatherConfig::default())
        .unwrap_err();
    assert!(matches!(err, CardError::InvalidDimensions { stage: "feather", .. }));

    let err = empty.resize_inside(10, 10, false).unwrap_err();
    assert!(err.to_string().starts_with("resize:"));
}

#[test]
fn trimming_a_transparent_image_keeps_it() {
    let image: Image<Rgba<u8>> = Image::new(5, 4);
    assert_eq!(image.content_bounds(0), None);
    assert_eq!(image.clone().trim_alpha(0), image);
}

#[test]
fn undecodable_input_is_a_decode_error() {
    let pipeline = CardPipeline::with_templates(PipelineConfig::default(), solid_templates()).unwrap();
    let err = pipeline.render(b"\x89PNG but truncated", None).unwrap_err();
    assert!(matches!(err, CardError::Decode(_)));

    assert!(matches!(decode_image(&[0u8; 64]), Err(CardError::Decode(_))));
}

#[test]
fn missing_template_is_fatal() {
    let config = PipelineConfig {
        templates: TemplateConfig {
            directory: std::env::temp_dir().join("portrait-card-no-such-dir"),
            names: vec!["template-01.png".to_owned(), "template-02.png".to_owned()],
        },
        ..PipelineConfig::default()
    };
    let pipeline = CardPipeline::new(config).unwrap();
    let subject: Image<Rgba<u8>> = Image::from_pixel(20, 20, Rgba([40, 40, 40, 255]));

    // "b" = 98, 98 mod 2 = 0
    match pipeline.render_image(subject, Some("b")) {
        Err(CardError::TemplateLoad { name, .. }) => assert_eq!(name, "template-01.png"),
        other => panic!("expected TemplateLoad, got {other:?}"),
    }
}

#[test]
fn fully_backdrop_input_renders_a_bare_card() {
    // Everything is background: the subject becomes fully transparent, trim
    // has nothing to crop to, and the card still renders.
    let pipeline = CardPipeline::with_templates(PipelineConfig::default(), solid_templates()).unwrap();
    let subject: Image<Rgba<u8>> = Image::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
    let output = pipeline.render_image(subject, None).unwrap();

    let card = decode_image(&output.png).unwrap();
    assert!(card.pixels().all(|p| p == &Rgba([0, 0, 0, 255])));
}

#[test]
fn zero_area_input_aborts_the_pipeline() {
    let pipeline = CardPipeline::with_templates(PipelineConfig::default(), solid_templates()).unwrap();
    let subject: Image<Rgba<u8>> = Image::new(0, 7);
    assert!(matches!(
        pipeline.render_image(subject, None),
        Err(CardError::InvalidDimensions { .. })
    ));
}

#[test]
fn invalid_configurations_are_rejected() {
    let err = PipelineConfig::from_json_str(r#"{ "layout": { "min_top_fraction": 0.9 } }"#)
        .unwrap_err();
    assert!(matches!(err, CardError::Config(_)));

    let err = PipelineConfig::from_json_str(r#"{ "templates": { "names": [] } }"#).unwrap_err();
    assert!(matches!(err, CardError::Config(_)));

    let err = PipelineConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, CardError::Config(_)));

    let empty = TemplateSet::from_images(Vec::<(String, Image<Rgba<u8>>)>::new());
    assert!(CardPipeline::with_templates(PipelineConfig::default(), empty).is_err());
}

#[test]
fn encode_rejects_empty_raster() {
    let empty: Image<Rgba<u8>> = Image::new(0, 0);
    assert!(matches!(encode_png(&empty), Err(CardError::Encode(_))));
}
