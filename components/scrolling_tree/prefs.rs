/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Runtime configuration of a scrolling tree.

use serde::{Deserialize, Serialize};

use crate::platform::PlatformInputModel;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Preferences {
    /// Which platform specialization to build frame and overflow scrolling nodes with.
    pub input_model: PlatformInputModel,

    /// Log a dump of the tree after every committed update.
    pub dump_scrolling_tree: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            input_model: PlatformInputModel::platform_default(),
            dump_scrolling_tree: false,
        }
    }
}

impl Preferences {
    /// Parse preferences from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
