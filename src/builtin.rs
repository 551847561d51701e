//! Compiled-in profile catalogue.
//!
//! The registration table for the firmware release lines the resolver knows
//! out of the box. Definitions are listed root first; discovery order is the
//! order below.

use serde_json::json;

use crate::definition::ProfileDefinition;
use crate::schema::slots::*;

/// Name of the catalogue root
pub const ROOT: &str = "default";

pub fn definitions() -> Vec<ProfileDefinition> {
    vec![
        ProfileDefinition::new(ROOT)
            .directory("base")
            .unset(BOARD)
            .unset(SHIELD)
            .set(SPLIT, true)
            .set(FIRMWARE_REPO, "https://github.com/zmkfirmware/zmk")
            .set(FIRMWARE_BRANCH, "main")
            .set(BUILD_IMAGE, "zmkfirmware/zmk-build-arm:stable")
            .list(INCLUDES, ["behaviors.dtsi", "dt-bindings/zmk/keys.h"])
            .set(
                CONDITIONAL_INCLUDES,
                json!([
                    {"include": "dt-bindings/zmk/pointing.h", "flag": "ZMK_POINTING"},
                    {"include": "dt-bindings/zmk/rgb.h", "flag": "ZMK_RGB_UNDERGLOW"},
                    {"include": "dt-bindings/zmk/backlight.h", "flag": "ZMK_BACKLIGHT"},
                ]),
            )
            .list(BUILD_FLAGS, ["-DCONFIG_ZMK_KEYBOARD_NAME"])
            .set(KEYMAP_TEMPLATE, "keymap.dtsi.tmpl")
            .set(KCONFIG_TEMPLATE, "kconfig.conf.tmpl")
            .set(BEHAVIORS, "behaviors.yaml")
            .set(LAYOUT, "layout.yaml"),
        ProfileDefinition::new("main")
            .parent(ROOT)
            .pattern("main|HEAD")
            .directory("main"),
        ProfileDefinition::new("pr")
            .parent("main")
            .pattern(r"pr\d+\..+")
            .directory("pr")
            .set(BUILD_IMAGE, "zmkfirmware/zmk-build-arm:latest"),
        ProfileDefinition::new("v1x")
            .parent(ROOT)
            .pattern(r"^v1\d\.\d\d.*")
            .directory("v1x")
            .set(BOARD, "splitkb_v1")
            .set(BEHAVIORS, "behaviors-legacy.yaml"),
        ProfileDefinition::new("v2x")
            .parent(ROOT)
            .pattern(r"^v2\d\.\d\d.*")
            .directory("v2x")
            .set(BOARD, "splitkb_v2")
            .list(INCLUDES, ["dt-bindings/zmk/bt.h"]),
        ProfileDefinition::new("v25.05")
            .parent("v2x")
            .pattern(r"^v25\.05.*")
            .directory("v25")
            .list(INCLUDES, ["extra.h"])
            .list(BUILD_FLAGS, ["-DCONFIG_ZMK_HOLD_TAP_V2"]),
    ]
}
