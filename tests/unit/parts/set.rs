use super::*;
use crate::fixtures::{temp_dir, write_plain_set};

fn group(name: &str, count: usize) -> ChoiceGroup {
    ChoiceGroup::new(
        name,
        format!("/sets/t/{name}"),
        (0..count).map(|i| format!("{i:02}.png")).collect(),
    )
    .unwrap()
}

#[test]
fn ten_candidates_fail_the_entropy_gate() {
    let err = PartSet::new("tiny", "/sets/tiny", vec![group("a", 10)]).unwrap_err();
    match err {
        RobohashError::InsufficientEntropy { set, bits } => {
            assert_eq!(set, "tiny");
            assert!((bits - 3.32).abs() < 0.01);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn exactly_twelve_bits_is_accepted() {
    let set = PartSet::new(
        "ok",
        "/sets/ok",
        vec![group("a", 16), group("b", 16), group("c", 16)],
    )
    .unwrap();
    assert_eq!(set.entropy_bits(), 12.0);
    assert_eq!(set.groups().len(), 3);
}

#[test]
fn single_candidate_groups_add_no_entropy() {
    let err = PartSet::new(
        "flat",
        "/sets/flat",
        vec![group("a", 1), group("b", 1), group("c", 64)],
    )
    .unwrap_err();
    assert!(matches!(err, RobohashError::InsufficientEntropy { .. }));
}

#[test]
fn groups_are_ordered_by_name_not_insertion() {
    let set = PartSet::new(
        "s",
        "/sets/s",
        vec![group("c", 16), group("a", 16), group("b", 16)],
    )
    .unwrap();
    let names: Vec<&str> = set.groups().iter().map(|g| g.name()).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn pick_consumes_one_value_per_group() {
    let set = PartSet::new(
        "s",
        "/sets/s",
        vec![group("c", 16), group("b", 16), group("a", 16)],
    )
    .unwrap();
    let mut stream = RandomStream::with_public_seed(b"foo");
    let sel = set.pick(&mut stream);

    // Low nibbles of the first three words of HMAC-SHA512("", "foo").
    assert_eq!(sel.indices(), [15, 1, 14]);
    assert_eq!(sel.tag_key(), "15,1,14");
    assert_eq!(sel.root(), Path::new("/sets/s"));
    assert_eq!(sel.files()[0], PathBuf::from("/sets/t/a/15.png"));
    assert_eq!(sel.files()[2], PathBuf::from("/sets/t/c/14.png"));

    // The fourth word is next in line.
    assert_eq!(stream.next_u64(), 0xb425_4acf_32ec_7adc);
}

#[test]
fn distinct_inputs_rarely_collide() {
    let set = PartSet::new(
        "s",
        "/sets/s",
        vec![group("a", 16), group("b", 16), group("c", 16), group("d", 16)],
    )
    .unwrap();
    let mut seen = std::collections::HashSet::new();
    for i in 0..200 {
        let mut stream = RandomStream::with_public_seed(format!("user-{i}").as_bytes());
        seen.insert(set.pick(&mut stream).tag_key());
    }
    // 16 bits of choice space; a handful of birthday collisions at most.
    assert!(seen.len() >= 190, "only {} distinct picks", seen.len());
}

#[test]
fn open_scans_set_directory() {
    let sets = temp_dir("partset_open");
    write_plain_set(&sets.join("set2"), &[("bg", 16), ("body", 16), ("eyes", 16)]);

    let set = PartSet::open(&sets, "set2").unwrap();
    assert_eq!(set.name(), "set2");
    assert_eq!(set.root(), sets.join("set2"));
    assert_eq!(set.entropy_bits(), 12.0);
    let names: Vec<&str> = set.groups().iter().map(|g| g.name()).collect();
    assert_eq!(names, ["bg#00", "body#01", "eyes#02"]);

    std::fs::remove_dir_all(&sets).ok();
}

#[test]
fn open_rejects_thin_directory() {
    let sets = temp_dir("partset_thin");
    write_plain_set(&sets.join("thin"), &[("bg", 2), ("body", 5)]);

    let err = PartSet::open(&sets, "thin").unwrap_err();
    assert!(matches!(err, RobohashError::InsufficientEntropy { .. }));

    std::fs::remove_dir_all(&sets).ok();
}
