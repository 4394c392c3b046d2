use pdf_sign::*;

#[test]
fn test_default_options() {
    let options = SignOptions::default();
    assert_eq!(options.render_scale, 1.3);
    assert_eq!(options.default_width_fraction, 0.35);
    assert_eq!(options.bottom_margin_px, 30.0);
    assert_eq!(options.filter, FilterMode::Color);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_errors() {
    let cases = [
        SignOptions {
            render_scale: 0.0,
            ..Default::default()
        },
        SignOptions {
            default_width_fraction: 1.5,
            ..Default::default()
        },
        SignOptions {
            bottom_margin_px: -1.0,
            ..Default::default()
        },
        SignOptions {
            min_overlay_px: 0.0,
            ..Default::default()
        },
    ];

    for options in cases {
        match options.validate() {
            Err(SignError::Config(_)) => {}
            other => panic!("Expected Config error for {:?}, got {:?}", options, other),
        }
    }
}

#[test]
fn test_geometry_follows_options() {
    let options = SignOptions {
        default_width_fraction: 0.5,
        bottom_margin_px: 0.0,
        ..Default::default()
    };
    let rect = options
        .geometry()
        .default_rect(SurfaceSize::new(800.0, 600.0), 4.0);

    assert_eq!(rect, PixelRect::new(200.0, 500.0, 400.0, 100.0));
}

#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = SignOptions {
        render_scale: 2.0,
        min_overlay_px: 12.0,
        filter: FilterMode::Bw,
        ..Default::default()
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = SignOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "filter": "gray" }"#).unwrap();

    let loaded = SignOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.filter, FilterMode::Gray);
    assert_eq!(loaded.render_scale, 1.3);
}

#[tokio::test]
async fn test_load_rejects_bad_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "render_scale": -2.0 }"#).unwrap();
    assert!(matches!(
        SignOptions::load(temp_file.path()).await,
        Err(SignError::Config(_))
    ));

    std::fs::write(temp_file.path(), "not json").unwrap();
    match SignOptions::load(temp_file.path()).await {
        Err(SignError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
