use eframe_sketchpad::export::{export_png, render_export};
use eframe_sketchpad::surface::glyph_fonts;
use eframe_sketchpad::{
    HistoryStore, InputEvent, InputTranslator, RasterSurface, Renderer, SketchAction,
    SketchConfig, Surface, ToolPreview,
};
use egui::{Color32, Pos2};

fn sample_history() -> HistoryStore {
    let mut history = HistoryStore::new();
    history.begin_stroke(Pos2::new(20.0, 20.0), 6.0, Color32::RED);
    history.extend_pending(Pos2::new(120.0, 40.0));
    history.extend_pending(Pos2::new(200.0, 200.0));
    history.end_pending();
    history.begin_stroke(Pos2::new(30.0, 200.0), 2.0, Color32::BLUE);
    history.extend_pending(Pos2::new(220.0, 30.0));
    history.end_pending();
    history.place_sticker("🎉", Pos2::new(128.0, 128.0), 24.0);
    history
}

#[test]
fn test_replay_is_deterministic() {
    let history = sample_history();
    let preview = ToolPreview::Marker {
        radius: 3.0,
        color: Color32::GREEN,
    };
    let render = || {
        let mut surface = RasterSurface::new([256, 256], 1, Color32::WHITE)
            .unwrap()
            .with_fonts(glyph_fonts());
        Renderer::replay(
            &mut surface,
            history.committed(),
            Some((&preview, Pos2::new(64.0, 64.0))),
        );
        surface.into_image()
    };

    let first = render();
    let second = render();
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn test_replay_on_dirty_surface_matches_fresh_surface() {
    let history = sample_history();

    let mut reused = RasterSurface::new([256, 256], 1, Color32::WHITE).unwrap();
    reused.polyline(&[Pos2::new(0.0, 0.0), Pos2::new(255.0, 255.0)], 12.0, Color32::BLACK);
    Renderer::replay(&mut reused, history.committed(), None);
    Renderer::replay(&mut reused, history.committed(), None);

    let mut fresh = RasterSurface::new([256, 256], 1, Color32::WHITE).unwrap();
    Renderer::replay(&mut fresh, history.committed(), None);

    assert_eq!(reused.image().as_raw(), fresh.image().as_raw());
}

#[test]
fn test_later_drawables_paint_over_earlier_ones() {
    let mut history = HistoryStore::new();
    history.begin_stroke(Pos2::new(10.0, 50.0), 8.0, Color32::RED);
    history.extend_pending(Pos2::new(90.0, 50.0));
    history.end_pending();
    history.begin_stroke(Pos2::new(50.0, 10.0), 8.0, Color32::BLUE);
    history.extend_pending(Pos2::new(50.0, 90.0));
    history.end_pending();

    let mut surface = RasterSurface::new([100, 100], 1, Color32::WHITE).unwrap();
    Renderer::replay(&mut surface, history.committed(), None);

    assert_eq!(surface.pixel_at(Pos2::new(50.0, 50.0)), Some([0, 0, 255, 255]));
    assert_eq!(surface.pixel_at(Pos2::new(20.0, 50.0)), Some([255, 0, 0, 255]));
}

#[test]
fn test_export_is_four_times_the_canvas() {
    let config = SketchConfig::default();
    let history = sample_history();

    let bytes = export_png(history.committed(), &config, glyph_fonts()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

    assert_eq!(decoded.dimensions(), (1024, 1024));
    // First stroke starts at logical (20, 20)
    assert_eq!(decoded.get_pixel(80, 80).0, [255, 0, 0, 255]);
    // Untouched corner keeps the background
    assert_eq!(decoded.get_pixel(1020, 1020).0, [255, 255, 255, 255]);
}

#[test]
fn test_export_ignores_preview_and_keeps_history() {
    let config = SketchConfig {
        randomize_color_on_tool_switch: false,
        ..SketchConfig::default()
    };
    let mut sketch = InputTranslator::headless(config.clone());
    sketch.handle_event(InputEvent::PointerDown {
        position: Pos2::new(10.0, 10.0),
    });
    sketch.handle_event(InputEvent::PointerUp {
        position: Pos2::new(10.0, 10.0),
    });
    sketch.apply(SketchAction::SelectSticker("⭐".to_owned()));
    sketch.handle_event(InputEvent::PointerMove {
        position: Pos2::new(200.0, 200.0),
    });
    assert!(sketch.current_preview().is_some());

    let revision = sketch.history().revision();
    let committed = sketch.history().committed().to_vec();
    let bytes = sketch.export_png().unwrap();

    assert_eq!(sketch.history().revision(), revision);
    assert_eq!(sketch.history().committed(), committed.as_slice());
    assert_eq!(sketch.tools().armed_sticker(), Some("⭐"));

    let exported = image::load_from_memory(&bytes).unwrap().to_rgba8();
    let expected = render_export(&committed, &config, Vec::new()).unwrap();
    assert_eq!(exported.as_raw(), expected.as_raw());
}

#[test]
fn test_export_of_empty_canvas_is_background() {
    let config = SketchConfig {
        canvas_size: [16, 16],
        background: [10, 20, 30, 255],
        ..SketchConfig::default()
    };
    let image = render_export(&[], &config, Vec::new()).unwrap();
    assert_eq!(image.dimensions(), (64, 64));
    assert!(image.pixels().all(|p| p.0 == [10, 20, 30, 255]));
}
