use mdview::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mdviewrc");
    let content = r"
# comment
--no-images

--width 96

";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_images);
    assert_eq!(flags.width, Some(96));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mdviewrc");
    std::fs::write(&path, "--width 72\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "mdview".to_string(),
        "--no-images".to_string(),
        "--width=100".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_images, "cli flags should be applied");
    assert_eq!(effective.width, Some(100), "cli should override width");
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent");
    assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
}
