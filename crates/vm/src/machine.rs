//! Machine state: tape, program, input queue, output buffer, random source.

use std::collections::VecDeque;

use spindle_common::{Cell, Program};
use tracing::debug;

use crate::error::Abort;
use crate::rng::{RandomSource, SeededSource};
use crate::tape::Tape;

/// Default tape size when the caller does not supply one.
pub const DEFAULT_TAPE_SIZE: usize = 30_000;

/// Whether the machine has more work to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The program counter is inside the program.
    Running,
    /// The program counter reached the end of the program.
    Halted,
}

/// Everything a run leaves behind: the final tape, cursor, remaining input,
/// output buffer, final program (its content can differ from the initial
/// one), and final program counter.
///
/// Also attached to [`Abort`] so a failed run can be inspected at the point
/// of failure.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineState {
    pub tape: Vec<Cell>,
    pub tape_pointer: usize,
    pub input: Vec<Cell>,
    pub output: Vec<Cell>,
    pub program: Program,
    pub program_counter: usize,
}

/// The Spindle virtual machine.
///
/// One machine owns one run's state exclusively. Each [`Machine::step`]
/// executes a single instruction to completion; there is no suspension and
/// no sharing. Callers wanting a step or time budget drive [`Machine::step`]
/// themselves instead of calling [`Machine::run`].
pub struct Machine {
    pub(crate) tape: Tape,
    pub(crate) program: Program,
    pub(crate) pc: usize,
    pub(crate) input: VecDeque<Cell>,
    pub(crate) output: Vec<Cell>,
    pub(crate) rng: Box<dyn RandomSource>,
}

impl Machine {
    /// A machine over a zero-filled tape of [`DEFAULT_TAPE_SIZE`] cells,
    /// with an entropy-seeded random source.
    pub fn new(program: Program, input: Vec<Cell>) -> Self {
        Self::with_tape(program, input, None, DEFAULT_TAPE_SIZE)
    }

    /// A machine with an explicit tape. A pre-populated tape longer than
    /// `tape_size` is truncated to it; a shorter one is used as-is.
    pub fn with_tape(
        program: Program,
        input: Vec<Cell>,
        initial_tape: Option<Vec<Cell>>,
        tape_size: usize,
    ) -> Self {
        let tape = match initial_tape {
            Some(cells) => Tape::from_cells(cells, tape_size),
            None => Tape::new(tape_size),
        };
        Self {
            tape,
            program,
            pc: 0,
            input: input.into(),
            output: Vec::new(),
            rng: Box::new(SeededSource::from_entropy()),
        }
    }

    /// Replace the random source, e.g. with a seeded or scripted one for
    /// reproducible runs.
    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Current program counter (token index).
    pub fn program_counter(&self) -> usize {
        self.pc
    }

    /// Execute until the program counter passes the end of the program.
    pub fn run(mut self) -> Result<MachineState, Abort> {
        loop {
            match self.step() {
                Ok(Status::Running) => {}
                Ok(Status::Halted) => return Ok(self.into_state()),
                Err(kind) => {
                    debug!(target: "spindle::vm", %kind, pc = self.pc, "run aborted");
                    return Err(Abort {
                        kind,
                        state: Box::new(self.into_state()),
                    });
                }
            }
        }
    }

    /// Dissolve the machine into its observable state.
    pub fn into_state(self) -> MachineState {
        MachineState {
            tape_pointer: self.tape.cursor(),
            tape: self.tape.into_cells(),
            input: self.input.into(),
            output: self.output,
            program: self.program,
            program_counter: self.pc,
        }
    }
}

/// Run a program to completion: the single entry point the CLI and test
/// harnesses depend on.
///
/// `initial_tape` pre-populates the tape (truncated to `tape_size` when
/// longer); `None` means a zero-filled tape of `tape_size` cells.
pub fn run(
    program: Program,
    input: Vec<Cell>,
    initial_tape: Option<Vec<Cell>>,
    tape_size: usize,
) -> Result<MachineState, Abort> {
    Machine::with_tape(program, input, initial_tape, tape_size).run()
}
