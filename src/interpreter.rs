use crate::display::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::error::ErrorKind;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::options::Options;
use crate::rom::{Rom, MAX_ROM_SIZE, ROM_START_ADDRESS};
use crate::stack::Stack;
use crate::timer::TimerClock;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

mod execute;

/// The number of general-purpose variable registers.
const REGISTER_COUNT: usize = 16;

/// The execution status of the interpreter.
///
/// Only [Status::Running] allows instructions to execute.  [Status::Stopped]
/// records a host-initiated shutdown; [Status::Error] records a fatal fault
/// raised by the machine itself.  Both are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The fetch/decode/execute cycle is active
    Running,
    /// Execution is suspended by the host and can be resumed
    Paused,
    /// The host has shut the machine down
    Stopped,
    /// The machine halted itself on a fatal fault
    Error(ErrorKind),
}

/// An abstraction of the CHIP-8 machine, and the core public interface to
/// the ocho crate.
///
/// This struct aggregates all machine sub-components and exposes methods
/// through which a ROM can be loaded and executed one step at a time,
/// keypad input supplied, the timers driven from a monotonic clock, and the
/// display plus audio gate read back out by the hosting application.
///
/// The host owns the loop: it calls [Interpreter::step] some number of
/// times per frame, then [Interpreter::tick_timers] with a monotonic
/// nanosecond timestamp, then presents [Interpreter::frame] and gates its
/// audio device with [Interpreter::beep_on].
pub struct Interpreter {
    // CHIP-8 COMPONENT STATE FIELDS
    memory: Memory,           // The 4 KiB memory space (fontset + ROM)
    stack: Stack,             // The call stack (holds subroutine return addresses)
    frame_buffer: FrameBuffer, // The 64x32 display frame buffer
    keypad: Keypad,           // The host-maintained keypad snapshot
    program_counter: u16,     // Address of the next opcode to fetch
    index_register: u16,      // The I register (memory addressing)
    registers: [u8; REGISTER_COUNT], // General-purpose registers V0 to VF
    delay_timer: u8,          // Decrements at 60hz while non-zero
    sound_timer: u8,          // Decrements at 60hz while non-zero; beeps while non-zero
    // ADDITIONAL STATE FIELDS
    timer_clock: TimerClock,  // Converts monotonic timestamps into 60hz ticks
    status: Status,           // Current execution status
    // CONFIG AND SETUP FIELDS
    options: Options,         // Quirk configuration
    rng: Box<dyn RngCore>,    // Random source for CXNN (injectable for tests)
    rom: Rom,                 // The loaded ROM image (kept for reset)
}

impl Interpreter {
    /// Constructor that returns a freshly-initialised [Interpreter] with
    /// default options, an entropy-seeded random source and no ROM loaded.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Constructor that returns an [Interpreter] configured with the passed
    /// options.
    pub fn with_options(options: Options) -> Self {
        Self::with_rng(options, Box::new(StdRng::from_entropy()))
    }

    /// Constructor taking an explicit random source, so tests and
    /// reproducible runs can supply a deterministic generator.
    pub fn with_rng(options: Options, rng: Box<dyn RngCore>) -> Self {
        Interpreter {
            memory: Memory::new(),
            stack: Stack::new(),
            frame_buffer: FrameBuffer::new(),
            keypad: Keypad::new(),
            program_counter: ROM_START_ADDRESS as u16,
            index_register: 0x0,
            registers: [0x0; REGISTER_COUNT],
            delay_timer: 0x0,
            sound_timer: 0x0,
            timer_clock: TimerClock::new(),
            status: Status::Running,
            options,
            rng,
            rom: Rom::default(),
        }
    }

    /// Copies the passed ROM image into memory at the program entry point
    /// and keeps it for later resets.  Returns [ErrorKind::RomTooLarge],
    /// leaving the machine untouched, if the image does not fit.  The frame
    /// buffer is deliberately not cleared.
    pub fn load_rom(&mut self, rom: Rom) -> Result<(), ErrorKind> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(ErrorKind::RomTooLarge { size: rom.len() });
        }
        self.memory.write_bytes(ROM_START_ADDRESS, rom.bytes())?;
        self.program_counter = ROM_START_ADDRESS as u16;
        self.rom = rom;
        Ok(())
    }

    /// Returns the machine to its power-on state while preserving the
    /// loaded ROM, which is copied back into fresh memory.
    pub fn reset(&mut self) {
        self.memory = Memory::new();
        if let Err(error) = self.memory.write_bytes(ROM_START_ADDRESS, self.rom.bytes()) {
            // Unreachable for a ROM that passed load_rom validation
            log::error!("failed to restore ROM image on reset: {}", error);
        }
        self.stack = Stack::new();
        self.frame_buffer = FrameBuffer::new();
        self.keypad = Keypad::new();
        self.program_counter = ROM_START_ADDRESS as u16;
        self.index_register = 0x0;
        self.registers = [0x0; REGISTER_COUNT];
        self.delay_timer = 0x0;
        self.sound_timer = 0x0;
        self.timer_clock = TimerClock::new();
        self.status = Status::Running;
    }

    /// Records the specified key (hex ordinal 0x0 to 0xF) as held or
    /// released in the keypad snapshot.
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<(), ErrorKind> {
        self.keypad.set_key(key, pressed)
    }

    /// Executes one fetch/decode/execute step.  Does nothing unless the
    /// machine is running.
    ///
    /// Fatal faults (fetching past the end of memory, exhausting the call
    /// stack) latch [Status::Error] for the host to observe on its next
    /// poll; recoverable faults are logged and skipped.
    pub fn step(&mut self) {
        if self.status != Status::Running {
            return;
        }
        let opcode = match self.memory.read_word(self.program_counter as usize) {
            Ok(opcode) => opcode,
            Err(_) => {
                log::error!(
                    "program counter {:#06X} points outside memory; halting",
                    self.program_counter
                );
                self.status = Status::Error(ErrorKind::PcOutOfBounds {
                    pc: self.program_counter,
                });
                return;
            }
        };
        let instruction = Instruction::decode(opcode);
        log::trace!(
            "{:#05X}: {} ({:#06X})",
            self.program_counter,
            instruction.name(),
            opcode
        );
        self.execute(instruction);
    }

    /// Advances the delay and sound timers against the passed monotonic
    /// nanosecond timestamp.  Zero or more 60hz decrements are applied
    /// depending on the time elapsed since the previous call; timers
    /// saturate at zero and never wrap.
    pub fn tick_timers(&mut self, now_ns: u64) {
        let ticks = self.timer_clock.advance(now_ns);
        if ticks == 0 {
            return;
        }
        let decrement = ticks.min(u8::MAX as u32) as u8;
        self.delay_timer = self.delay_timer.saturating_sub(decrement);
        self.sound_timer = self.sound_timer.saturating_sub(decrement);
    }

    /// Returns the display pixels in row-major order (`index = y * 64 + x`),
    /// true meaning lit.
    pub fn frame(&self) -> &[bool; DISPLAY_WIDTH * DISPLAY_HEIGHT] {
        self.frame_buffer.pixels()
    }

    /// Returns true while the sound timer is non-zero, i.e. while the
    /// hosting application should play its beep tone.
    pub fn beep_on(&self) -> bool {
        self.sound_timer > 0
    }

    /// Returns the current execution status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Suspends execution; subsequent [Interpreter::step] calls do nothing
    /// until [Interpreter::resume].
    pub fn pause(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Paused;
        }
    }

    /// Resumes execution previously suspended with [Interpreter::pause].
    pub fn resume(&mut self) {
        if self.status == Status::Paused {
            self.status = Status::Running;
        }
    }

    /// Shuts the machine down.  Terminal: only [Interpreter::reset] brings
    /// it back.
    pub fn stop(&mut self) {
        if matches!(self.status, Status::Running | Status::Paused) {
            self.status = Status::Stopped;
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
