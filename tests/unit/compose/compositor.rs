use super::*;
use crate::fixtures::{KEYED_GROUPS, temp_dir, write_keyed_set, write_png};

#[test]
fn order_key_reads_between_first_and_second_hash() {
    assert_eq!(
        order_key(Path::new("003#01Body/000#blue_body-10.png")).as_deref(),
        Some("01Body/000")
    );
    assert_eq!(
        order_key(Path::new("blue/eyes#03/a.png")).as_deref(),
        Some("03/a.png")
    );
    assert_eq!(order_key(Path::new("body/x#2#b.png")).as_deref(), Some("2"));
    assert_eq!(order_key(Path::new("set3/plain/c.png")), None);
}

#[test]
fn stacking_order_in_ignores_hash_above_root() {
    let root = Path::new("tmp#9/sets/robot");
    let files = vec![
        root.join("000#05Mouth/001#blue_mouth-1.png"),
        root.join("002#07Accessory/000#blue_accessory-0.png"),
        root.join("003#01Body/004#blue_body-4.png"),
    ];
    let ordered = stacking_order_in(root, &files).unwrap();
    assert_eq!(
        ordered,
        vec![files[2].clone(), files[0].clone(), files[1].clone()]
    );

    // Keyed from the full path, every layer reads "9/sets/robot/00N".
    let unrooted = stacking_order(&files).unwrap();
    assert_eq!(unrooted, files);
}

#[test]
fn directory_key_outranks_file_name() {
    let dir = temp_dir("compose_keyed_order");
    write_keyed_set(&dir, 2);
    let files: Vec<PathBuf> = KEYED_GROUPS
        .iter()
        .map(|(group, part)| dir.join(group).join(format!("001#blue_{part}-1.png")))
        .collect();

    let ordered = stacking_order_in(&dir, &files).unwrap();
    let parts: Vec<String> = ordered
        .iter()
        .map(|p| {
            p.parent()
                .and_then(|d| d.file_name())
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(
        parts,
        ["003#01Body", "004#02Face", "000#05Mouth", "001#06Eyes", "002#07Accessory"]
    );

    // Opaque layers: only the Accessory (group 2, candidate 1) survives.
    let img = Compositor::new().compose_in(&dir, &files).unwrap();
    assert_eq!(img.get_pixel(1, 1).0, [100, 30, 200, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn stacking_order_ignores_input_order() {
    let files = vec![
        PathBuf::from("s/top#02/a.png"),
        PathBuf::from("s/bottom#00/b.png"),
        PathBuf::from("s/middle#01/c.png"),
    ];
    let expected = vec![
        PathBuf::from("s/bottom#00/b.png"),
        PathBuf::from("s/middle#01/c.png"),
        PathBuf::from("s/top#02/a.png"),
    ];
    assert_eq!(stacking_order(&files).unwrap(), expected);

    let mut reversed = files.clone();
    reversed.reverse();
    assert_eq!(stacking_order(&reversed).unwrap(), expected);
}

#[test]
fn stacking_order_breaks_ties_by_path() {
    let a = vec![PathBuf::from("x/a#1.png"), PathBuf::from("y/b#1.png")];
    let b = vec![PathBuf::from("y/b#1.png"), PathBuf::from("x/a#1.png")];
    assert_eq!(stacking_order(&a).unwrap(), stacking_order(&b).unwrap());
}

#[test]
fn unkeyed_layer_is_rejected() {
    let err = stacking_order(&[PathBuf::from("s/plain/a.png")]).unwrap_err();
    assert!(matches!(err, RobohashError::MissingOrderKey { .. }));
}

#[test]
fn empty_layer_list_is_rejected() {
    let err = Compositor::new().compose(&[]).unwrap_err();
    assert!(matches!(err, RobohashError::Validation(_)));
}

#[test]
fn compose_blends_in_key_order_regardless_of_input_order() {
    let dir = temp_dir("compose_order");
    let bg = dir.join("bg#0.png");
    let fg = dir.join("fg#1.png");
    write_png(&bg, 4, 3, [255, 0, 0, 255]);
    write_png(&fg, 4, 3, [0, 0, 255, 128]);

    let comp = Compositor::new();
    let a = comp.compose(&[bg.clone(), fg.clone()]).unwrap();
    let b = comp.compose(&[fg.clone(), bg.clone()]).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.dimensions(), (4, 3));
    assert_eq!(a.get_pixel(0, 0).0, [127, 0, 128, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn output_keeps_canvas_size_for_any_layer_count() {
    let dir = temp_dir("compose_dims");
    let mut files = Vec::new();
    for i in 0..6u8 {
        let path = dir.join(format!("layer#{i}.png"));
        write_png(&path, 5, 7, [i * 40, 0, 0, if i == 0 { 255 } else { 60 }]);
        files.push(path);
        let img = Compositor::new().compose(&files).unwrap();
        assert_eq!(img.dimensions(), (5, 7));
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn mismatched_layer_size_fails_without_image() {
    let dir = temp_dir("compose_mismatch");
    let bg = dir.join("bg#0.png");
    let fg = dir.join("fg#1.png");
    write_png(&bg, 4, 4, [0, 0, 0, 255]);
    write_png(&fg, 2, 2, [255, 255, 255, 255]);

    match Compositor::new().compose(&[bg, fg.clone()]).unwrap_err() {
        RobohashError::LayerDimensions {
            path,
            expected,
            found,
        } => {
            assert_eq!(path, fg);
            assert_eq!(expected, (4, 4));
            assert_eq!(found, (2, 2));
        }
        other => panic!("unexpected error: {other}"),
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_layer_is_asset_load_error() {
    let dir = temp_dir("compose_missing");
    let bg = dir.join("bg#0.png");
    write_png(&bg, 2, 2, [0, 0, 0, 255]);
    let gone = dir.join("fg#1.png");

    let err = Compositor::with_cache().compose(&[bg, gone]).unwrap_err();
    assert!(matches!(err, RobohashError::AssetLoad { .. }));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn cached_base_layer_is_not_mutated_by_blending() {
    let dir = temp_dir("compose_cache");
    let bg = dir.join("bg#0.png");
    let fg = dir.join("fg#1.png");
    write_png(&bg, 2, 2, [255, 0, 0, 255]);
    write_png(&fg, 2, 2, [0, 255, 0, 128]);

    let comp = Compositor::with_cache();
    let first = comp.compose(&[bg.clone(), fg.clone()]).unwrap();
    let second = comp.compose(&[bg.clone(), fg.clone()]).unwrap();
    assert_eq!(first, second);

    let cache = comp.cache().unwrap();
    assert_eq!(cache.decode_count(&bg), 1);
    assert_eq!(cache.decode_count(&fg), 1);
    let base = cache.get_or_load(&bg).unwrap();
    assert_eq!(&base.rgba8_premul[..4], &[255, 0, 0, 255]);

    std::fs::remove_dir_all(&dir).ok();
}
