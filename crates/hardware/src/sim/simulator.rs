//! Simulator: owns the CPU and the memory behind its two ports.
//!
//! The pipeline borrows the memory for the duration of each tick, so the
//! two halves stay independent values side-by-side.

use tracing::info;

use crate::common::constants::JAL_SELF;
use crate::common::error::{SimError, SimResult};
use crate::config::Config;
use crate::core::Cpu;
use crate::sim::loader;
use crate::soc::memory::Memory;

/// Outcome of a run that reached the halt condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Total ticks simulated, reset ticks included.
    pub cycles: u64,
    /// Instructions retired.
    pub retired: u64,
    /// PC of the halting instruction.
    pub pc: u32,
}

/// Top-level simulator: the pipeline controller plus a unified memory.
///
/// A program halts by retiring `jal x0, 0`, a jump to itself.
#[derive(Debug)]
pub struct Simulator {
    /// The pipeline controller.
    pub cpu: Cpu,
    /// Memory serving both the instruction and the data port.
    pub memory: Memory,
    /// Cycle budget of [`Simulator::run`].
    pub max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator with an empty memory sized by `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(),
            memory: Memory::from_config(&config.memory),
            max_cycles: config.general.max_cycles,
        }
    }

    /// Loads a raw or ELF image and returns its entry point.
    pub fn load(&mut self, image: &[u8]) -> SimResult<u32> {
        loader::load_image(&mut self.memory, image)
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) {
        self.cpu.tick(&mut self.memory);
    }

    /// Holds reset for one tick, then releases it.
    pub fn reset(&mut self) {
        self.cpu.set_reset(true);
        self.tick();
        self.cpu.set_reset(false);
    }

    /// Whether the most recent tick retired the halt instruction.
    pub fn is_halted(&self) -> bool {
        self.cpu
            .last_retired()
            .is_some_and(|r| r.inst == JAL_SELF)
    }

    /// Runs until the program halts.
    ///
    /// # Errors
    ///
    /// [`SimError::CycleLimit`] when `max_cycles` ticks elapse without a halt.
    pub fn run(&mut self) -> SimResult<RunSummary> {
        for _ in 0..self.max_cycles {
            self.tick();
            if let Some(halt) = self.cpu.last_retired().filter(|r| r.inst == JAL_SELF) {
                let summary = RunSummary {
                    cycles: self.cpu.stats.cycles,
                    retired: self.cpu.stats.instructions_retired,
                    pc: halt.pc,
                };
                info!(
                    cycles = summary.cycles,
                    retired = summary.retired,
                    "halted at {:#010x}",
                    summary.pc
                );
                return Ok(summary);
            }
        }
        Err(SimError::CycleLimit(self.max_cycles))
    }
}
