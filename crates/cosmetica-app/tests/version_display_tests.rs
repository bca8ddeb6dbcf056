//! Integration tests for VERSION propagation into runtime display.

use cosmetica_app::app_version;

#[test]
fn version_display_tests_matches_root_version_file() {
    let root_version = include_str!("../../../VERSION");
    assert_eq!(app_version(), root_version.trim());
}
