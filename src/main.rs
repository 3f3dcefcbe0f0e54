// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Pagefields: a field overlay editor for document templates

use xilem::{EventLoop, winit::error::EventLoopError};

fn main() -> Result<(), EventLoopError> {
    pagefields::run(EventLoop::with_user_event())
}
