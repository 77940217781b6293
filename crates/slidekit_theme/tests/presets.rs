use slidekit_theme::{SlideColors, ThemePreset};

#[test]
fn preset_catalog_contains_expected_presets() {
    let mut ids: Vec<&str> = ThemePreset::all().iter().map(|p| p.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["dark", "light"]);
}

#[test]
fn presets_round_trip_through_ids() {
    for preset in ThemePreset::all() {
        assert_eq!(ThemePreset::from_id(preset.id()), Some(*preset));
    }
    assert_eq!(ThemePreset::from_id("DARK"), Some(ThemePreset::Dark));
    assert_eq!(ThemePreset::from_id("sepia"), None);
}

#[test]
fn presets_distinguish_resting_and_completed_track() {
    for preset in ThemePreset::all() {
        let colors = preset.colors();
        assert_ne!(
            colors.track_color(0.0),
            colors.track_color(1.0),
            "Preset {:?} should change track colour on completion",
            preset
        );
    }
}

#[test]
fn light_and_dark_thumbs_differ() {
    assert_ne!(
        ThemePreset::Light.colors().thumb_color(),
        ThemePreset::Dark.colors().thumb_color()
    );
}
