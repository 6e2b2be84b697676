use std::path::PathBuf;

fn bin() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_versesync")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "versesync.exe"
            } else {
                "versesync"
            });
            p
        })
}

#[test]
fn cli_validates_and_queries_a_sheet() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let sheet_path = dir.join("sheet.json");
    std::fs::write(&sheet_path, include_str!("data/demo_sheet.json")).unwrap();
    let sheet_arg = sheet_path.to_string_lossy().to_string();

    let status = std::process::Command::new(bin())
        .args(["validate", "--in", sheet_arg.as_str()])
        .status()
        .unwrap();
    assert!(status.success());

    let out = std::process::Command::new(bin())
        .args(["at", "--in", sheet_arg.as_str(), "--time", "27.5"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["lyric"]["time_secs"], 26.0);
    assert!(v["images"].as_array().unwrap().is_empty());
}

#[test]
fn cli_rejects_a_broken_sheet() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let sheet_path = dir.join("broken.json");
    std::fs::write(
        &sheet_path,
        r#"{ "templates": {}, "lyrics": [ { "time_secs": 5.0, "text": "x", "template": "nope" } ], "images": [] }"#,
    )
    .unwrap();

    let status = std::process::Command::new(bin())
        .args(["validate", "--in", &sheet_path.to_string_lossy()])
        .status()
        .unwrap();
    assert!(!status.success());
}
