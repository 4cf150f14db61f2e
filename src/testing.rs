// Copyright 2025 The Axvisor Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use alloc::{sync::Arc, vec::Vec};

use rk8xx_if::{BusError, CpuClockDivider};
use rk8xx_regmap::{ChipHandle, RegisterFile};
use spin::Mutex;

use crate::Rk8xx;

/// Clock divider that remembers every divider it was asked for.
#[derive(Clone, Default)]
pub struct RecordingClock {
    calls: Arc<Mutex<Vec<u32>>>,
    fail: bool,
}

impl RecordingClock {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().clone()
    }
}

impl CpuClockDivider for RecordingClock {
    fn set_divider(&mut self, div: u32) -> Result<(), BusError> {
        self.calls.lock().push(div);
        if self.fail {
            return Err(BusError::Other(-1));
        }
        Ok(())
    }
}

pub type TestPmic = Rk8xx<RegisterFile, RecordingClock>;

/// A PMIC over a fresh register file, plus the probes to inspect it.
pub fn fresh_pmic(chip: &str) -> (TestPmic, ChipHandle<RegisterFile>, RecordingClock) {
    let handle = ChipHandle::new(RegisterFile::new());
    let clk = RecordingClock::default();
    let pmic = Rk8xx::bind(Some(chip), handle.clone(), clk.clone()).unwrap();
    (pmic, handle, clk)
}
