// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{clock::Clock, scheduler::Scheduler};

/// A clock paired with a scheduler: everything a wrapper needs from its host.
pub trait Runtime: Clock + Scheduler {}

impl<R> Runtime for R where R: Clock + Scheduler {}
