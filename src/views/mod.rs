// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Top-level views: the welcome screen and the editor

mod editor;
mod welcome;

pub use editor::editor_tab;
pub use welcome::welcome;
