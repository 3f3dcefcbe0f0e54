// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Page descriptors supplied by the template.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Dimensions of one template page in document units. Read-only to the
/// editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    #[serde(default)]
    pub index: usize,
    pub width: f64,
    pub height: f64,
}

impl PageDescriptor {
    pub fn new(index: usize, width: f64, height: f64) -> Self {
        Self {
            index,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
