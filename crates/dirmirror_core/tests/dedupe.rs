use dirmirror_core::dedupe_entries;
use pretty_assertions::assert_eq;

#[test]
fn duplicates_collapse_after_normalization() {
    let entries = vec![
        "/a.txt",
        "a.txt",
        "img/logo%20big.png",
        "img/logo big.png",
        "sub/",
        "",
        "//b.txt",
    ];

    assert_eq!(
        dedupe_entries(entries),
        vec![
            "a.txt".to_string(),
            "img/logo big.png".to_string(),
            "b.txt".to_string(),
        ]
    );
}

#[test]
fn first_seen_order_is_preserved() {
    let entries = vec!["z.bin".to_string(), "a.bin".to_string(), "z.bin".to_string()];
    assert_eq!(dedupe_entries(entries), vec!["z.bin", "a.bin"]);
}
