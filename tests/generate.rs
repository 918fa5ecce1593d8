use rand::{SeedableRng, rngs::StdRng};

use wallforge::{
    CanvasSize, PipelineConfig, PostFx, WallpaperPipeline,
    sink::{self, OutputFormat},
};

#[test]
fn seeded_generate_fills_the_default_portrait_canvas() {
    // Default 1440x3200 canvas; a small blur radius keeps the test quick
    // without changing the pipeline shape.
    let config = PipelineConfig {
        post: PostFx {
            blur_radius: 2,
            ..PostFx::default()
        },
        ..PipelineConfig::default()
    };
    let pipeline = WallpaperPipeline::new(config).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    let wp = pipeline
        .generate_with_palette(&mut rng, 1, Some("ocean_dream"))
        .unwrap();

    assert_eq!(wp.filename, "wallpaper_001.jpg");
    assert_eq!((wp.frame.width, wp.frame.height), (1440, 3200));
    assert_eq!(wp.frame.data.len(), 1440 * 3200 * 3);
    assert_eq!(wp.params.palette, "ocean_dream");
}

#[test]
fn batch_of_five_yields_sequential_distinct_filenames() {
    let config = PipelineConfig {
        canvas: CanvasSize::new(72, 160).unwrap(),
        post: PostFx {
            blur_radius: 3,
            ..PostFx::default()
        },
        ..PipelineConfig::default()
    };
    let pipeline = WallpaperPipeline::new(config).unwrap();

    let mut filenames = Vec::new();
    for i in 1..=5u32 {
        let mut rng = StdRng::seed_from_u64(7000 + u64::from(i));
        let wp = pipeline.generate(&mut rng, i).unwrap();
        assert_eq!((wp.frame.width, wp.frame.height), (72, 160));
        filenames.push(wp.filename);
    }

    assert_eq!(
        filenames,
        vec![
            "wallpaper_001.jpg",
            "wallpaper_002.jpg",
            "wallpaper_003.jpg",
            "wallpaper_004.jpg",
            "wallpaper_005.jpg",
        ]
    );
}

#[test]
fn generated_wallpaper_writes_and_decodes() {
    let config = PipelineConfig {
        canvas: CanvasSize::new(48, 96).unwrap(),
        post: PostFx {
            blur_radius: 2,
            ..PostFx::default()
        },
        ..PipelineConfig::default()
    };
    let pipeline = WallpaperPipeline::new(config).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let wp = pipeline.generate(&mut rng, 3).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(&wp.filename);
    sink::write_image(&wp.frame, &path, OutputFormat::Jpeg, sink::DEFAULT_JPEG_QUALITY).unwrap();

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (48, 96));
}
