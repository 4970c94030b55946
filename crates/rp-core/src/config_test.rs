use super::*;
use tempfile::TempDir;

const SAMPLE: &str = r#"
general:
  tester_name: Jane Tester
  tester_id: JT01
  base_folder: /work/releases
prds:
  1234-EDW-01:
    prd_description: PTSB Application
    jira_test_plan: DWH-0123
releases:
  DWH-2345:
    url: https://jira.example.com/browse/DWH-2345
    summary: 1234-EDW-01 PTSB Application 1.0
    developer: Jane Developer
    svn: https://svn.example.com/repo/tag/Release/1234_1.0_PTSB_DWH-2345
    svn3: https://svn.example.com/repo/tag/Release/extra_three/
    svn2: https://svn.example.com/repo/tag/Release/extra_two
    prd_number: 1234-EDW-01
    environment: T05
"#;

fn sample() -> Config {
    serde_yaml::from_str(SAMPLE).unwrap()
}

#[test]
fn test_release_is_validated_into_typed_config() {
    let release = sample()
        .release("DWH-2345", Path::new("relprep.yml"))
        .unwrap();

    assert_eq!(release.id, "DWH-2345");
    assert_eq!(release.environment, "T05");
    assert_eq!(release.developer, "Jane Developer");
    assert_eq!(
        release.work_folder,
        PathBuf::from("/work/releases/1234/1234-EDW-01/DWH-2345")
    );
    assert_eq!(
        release.prd.as_ref().and_then(|p| p.jira_test_plan.as_deref()),
        Some("DWH-0123")
    );
}

#[test]
fn test_svn_locations_in_key_order() {
    let release = sample()
        .release("DWH-2345", Path::new("relprep.yml"))
        .unwrap();

    let keys: Vec<&str> = release.svn_locations.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, vec!["svn", "svn2", "svn3"]);

    let third = &release.svn_locations[2];
    assert_eq!(third.name(), "extra_three");
    assert_eq!(third.suffix(), "_extra_three");
    assert_eq!(
        release.checkout_dir(third),
        PathBuf::from("/work/releases/1234/1234-EDW-01/DWH-2345/extra_three")
    );
}

#[test]
fn test_empty_svn_is_allowed() {
    let yaml = r#"
general: { tester_name: a, tester_id: b, base_folder: /w }
releases:
  DWH-1:
    url: u
    summary: s
    developer: d
    svn:
    prd_number: 9999-X
    environment: T02
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    let release = config.release("DWH-1", Path::new("relprep.yml")).unwrap();
    assert!(release.svn_locations.is_empty());
    assert!(release.prd.is_none());
}

#[test]
fn test_all_problems_are_reported_together() {
    let yaml = r#"
general: { tester_name: a, tester_id: b, base_folder: /w }
releases:
  DWH-1:
    url: ""
    developer: d
    svn: x
    svn2: ""
    svn20: y
    colour: blue
    prd_number: 9999-X
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    let err = config.release("DWH-1", Path::new("relprep.yml")).unwrap_err();

    match err {
        CoreError::ConfigInvalid { section, problems } => {
            assert_eq!(section, "DWH-1");
            assert!(problems.contains(&"key 'url' has no value".to_string()));
            assert!(problems.contains(&"missing required key 'summary'".to_string()));
            assert!(problems.contains(&"missing required key 'environment'".to_string()));
            assert!(problems.contains(&"optional key 'svn2' has no value".to_string()));
            assert!(problems.contains(&"unknown key 'svn20'".to_string()));
            assert!(problems.contains(&"unknown key 'colour'".to_string()));
            assert_eq!(problems.len(), 6);
        }
        other => panic!("expected ConfigInvalid, got {other:?}"),
    }
}

#[test]
fn test_missing_release_section() {
    let err = sample()
        .release("DWH-9999", Path::new("relprep.yml"))
        .unwrap_err();
    assert!(matches!(err, CoreError::ReleaseNotFound { .. }));
    assert!(err.to_string().contains("[DWH-9999] is not in relprep.yml"));
}

#[test]
fn test_unknown_top_level_key_is_rejected() {
    let yaml = r#"
general: { tester_name: a, tester_id: b, base_folder: /w }
extras: true
"#;
    assert!(serde_yaml::from_str::<Config>(yaml).is_err());
}

#[test]
fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(DEFAULT_CONFIG_FILE);
    std::fs::write(&path, SAMPLE).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.general.tester_id, "JT01");
    assert!(config.releases.contains_key("DWH-2345"));
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(&temp.path().join("nope.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_invalid_yaml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(DEFAULT_CONFIG_FILE);
    std::fs::write(&path, "general: [unclosed").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}
