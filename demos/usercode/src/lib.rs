//! Mock devices driven by the demo command tree.

use std::collections::BTreeMap;

pub mod commands;
pub mod events;
pub mod print;

pub const PIN_COUNT: usize = 32;
pub const MEMORY_SIZE: usize = 256;

/// State shared by every command callback.
#[derive(Debug)]
pub struct AppContext {
    pub exit_requested: bool,
    pub pins: [u32; PIN_COUNT],
    pub registers: BTreeMap<u32, u32>,
    pub vref: f32,
    pub sampling: bool,
    pub memory: [u8; MEMORY_SIZE],
    seed: u32,
}

impl Default for AppContext {
    fn default() -> Self {
        Self {
            exit_requested: false,
            pins: [0; PIN_COUNT],
            registers: BTreeMap::new(),
            vref: 3.3,
            sampling: false,
            memory: [0; MEMORY_SIZE],
            seed: 0x2545_F491,
        }
    }
}

impl AppContext {
    /// xorshift32, good enough for fake ADC samples.
    pub fn next_random(&mut self) -> u32 {
        let mut x = self.seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.seed = x;
        x
    }

    /// Memory wraps around at [`MEMORY_SIZE`].
    pub fn write_memory(&mut self, addr: u32, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            self.memory[(addr as usize + i) % MEMORY_SIZE] = byte;
        }
    }

    /// At most [`MEMORY_SIZE`] bytes are returned.
    pub fn read_memory(&self, addr: u32, size: usize) -> Vec<u8> {
        (0..size.min(MEMORY_SIZE))
            .map(|i| self.memory[(addr as usize + i) % MEMORY_SIZE])
            .collect()
    }
}
